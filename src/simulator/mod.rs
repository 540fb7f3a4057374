//! Multi-device load generator for the ingest service.

mod device;
mod events;

pub use device::Device;
pub use events::{random_event, sample_messages};

use clap::Args;
use rand::Rng;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SimulatorArgs {
    /// Ingest endpoint receiving the events
    #[arg(long, env = "INGEST_ENDPOINT", default_value = "http://localhost:4567/logs")]
    pub target: String,

    /// Number of emulated devices
    #[arg(long, env = "NO_OF_SIMULATED_DEVICES", default_value = "10")]
    pub devices: u32,

    /// Seconds between two events of one device
    #[arg(
        long,
        env = "EVENT_TRANSMISSION_INTERVAL_SECONDS",
        default_value = "5",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    /// Upper bound of the random start delay (defaults to the device count)
    #[arg(long)]
    pub max_start_delay_secs: Option<u64>,

    /// Stop each device after this many events
    #[arg(long)]
    pub events_per_device: Option<u64>,
}

/// Run every device until cancelled or until each has sent its quota.
///
/// Returns the number of events the service accepted.
pub async fn run(args: SimulatorArgs, shutdown: CancellationToken) -> anyhow::Result<u64> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let max_delay = args.max_start_delay_secs.unwrap_or(u64::from(args.devices));
    let interval = Duration::from_secs(args.interval_secs);

    let mut devices = JoinSet::new();
    for id in 1..=args.devices {
        let device = Device::new(i32::try_from(id)?, client.clone(), args.target.clone());
        let start_delay = Duration::from_secs(random_delay(max_delay));
        info!(
            device_id = device.id(),
            "Device will start transmitting in {}s",
            start_delay.as_secs()
        );
        devices.spawn(run_device(
            device,
            start_delay,
            interval,
            args.events_per_device,
            shutdown.clone(),
        ));
    }

    let mut accepted = 0;
    while let Some(result) = devices.join_next().await {
        accepted += result?;
    }
    info!(accepted, "Simulation finished");
    Ok(accepted)
}

fn random_delay(max_secs: u64) -> u64 {
    if max_secs == 0 {
        0
    } else {
        rand::rng().random_range(0..max_secs)
    }
}

async fn run_device(
    device: Device,
    start_delay: Duration,
    interval: Duration,
    quota: Option<u64>,
    shutdown: CancellationToken,
) -> u64 {
    tokio::select! {
        () = shutdown.cancelled() => return 0,
        () = tokio::time::sleep(start_delay) => {}
    }

    let mut ticker = tokio::time::interval(interval);
    let mut sent = 0;
    let mut accepted = 0;
    while quota.is_none_or(|quota| sent < quota) {
        tokio::select! {
            () = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let event = {
            let now = chrono::Utc::now().timestamp_millis();
            random_event(device.id(), now, &mut rand::rng())
        };
        sent += 1;

        match device.transmit(&event).await {
            Ok(_) => accepted += 1,
            Err(e) => warn!(device_id = device.id(), error = %e, "Transmission failed"),
        }
    }
    accepted
}
