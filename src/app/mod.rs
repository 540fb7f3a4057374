pub mod cli;
mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::main_router;

use crate::adapter::{QueueTransport, SqsQueueClient, SqsQueueClientConfig};
use crate::config::{self, Settings};
use crate::error::IngestError;
use crate::pipeline::IngestPipeline;
use crate::{healthcheck, invocation, simulator};
use clap::Parser;
use cli::{Cli, Command};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Application entry point. Dispatches the subcommand.
pub async fn run() -> Result<(), IngestError> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Healthcheck => run_healthcheck().await,
        Command::Serve => {
            tracing::init_tracing();
            run_service(load_settings()?).await
        }
        Command::Invoke => {
            tracing::init_tracing();
            run_invoke(load_settings()?).await
        }
        Command::Simulate(args) => {
            tracing::init_tracing();
            let shutdown_token = CancellationToken::new();
            server::cancel_on_signal(shutdown_token.clone());
            simulator::run(args, shutdown_token).await?;
            Ok(())
        }
    }
}

fn load_settings() -> Result<Settings, IngestError> {
    let settings =
        config::get_configuration().map_err(|e| IngestError::Config(e.to_string()))?;
    ::tracing::info!("Loaded settings");
    Ok(settings)
}

async fn run_healthcheck() -> Result<(), IngestError> {
    // Exit codes are the contract with the container runtime
    let port = std::env::var("HTTP_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(4567);
    match healthcheck::healthcheck_with_port(port).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Healthcheck failed: {e}");
            std::process::exit(1)
        }
    }
}

/// Long-running variant: one storage socket shared by every request.
pub async fn run_service(settings: Settings) -> Result<(), IngestError> {
    let app_state = state::AppState::from_settings(&settings);
    ::tracing::info!(
        storage = %app_state.storage.url(),
        "Connecting to storage service"
    );

    let app = main_router(app_state.pipeline.clone());
    let result = server::serve(app, settings.http_port, CancellationToken::new()).await;

    app_state.storage.close().await;
    result
}

/// Event-triggered variant: one proxy event in, one gateway response out.
pub async fn run_invoke(settings: Settings) -> Result<(), IngestError> {
    let queue_name = settings.require_queue_name()?;
    let client = SqsQueueClient::new(SqsQueueClientConfig {
        endpoint: settings.queue_endpoint.clone(),
        ..Default::default()
    })
    .map_err(|e| IngestError::Config(e.to_string()))?;

    let pipeline = IngestPipeline::new(Arc::new(QueueTransport::new(
        Arc::new(client),
        queue_name,
    )));

    let response =
        invocation::run_invocation(tokio::io::stdin(), tokio::io::stdout(), &pipeline).await?;
    ::tracing::info!(status_code = response.status_code, "Invocation complete");
    Ok(())
}
