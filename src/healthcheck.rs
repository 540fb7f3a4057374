//! `log-ingest healthcheck`: probe the local service (distroless images have no curl).

use std::time::Duration;
use thiserror::Error;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Health endpoint returned status: {0}")]
    Status(reqwest::StatusCode),
}

/// Probe `GET /v1/health` on the loopback interface.
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(HealthcheckError::Client)?;

    let url = format!("http://127.0.0.1:{port}/v1/health");
    let status = client
        .get(&url)
        .send()
        .await
        .map_err(|source| HealthcheckError::Request { url, source })?
        .status();

    if status.is_success() {
        Ok(())
    } else {
        Err(HealthcheckError::Status(status))
    }
}
