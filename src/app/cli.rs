use crate::simulator::SimulatorArgs;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Device log ingest service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP ingest service backed by the storage socket (default)
    Serve,
    /// Handle one proxy event from stdin via the work queue, response on stdout
    Invoke,
    /// Probe the local service health endpoint
    Healthcheck,
    /// Emulate devices posting random log events
    Simulate(SimulatorArgs),
}
