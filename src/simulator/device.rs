use crate::domain::LogEvent;
use crate::response::ResponseBody;
use anyhow::{Context, bail};
use tracing::{debug, info};

/// One emulated device posting to the ingest endpoint.
#[derive(Clone)]
pub struct Device {
    id: i32,
    client: reqwest::Client,
    target: String,
}

impl Device {
    pub fn new(id: i32, client: reqwest::Client, target: impl Into<String>) -> Self {
        Self {
            id,
            client,
            target: target.into(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// POST one event and return the service's answer.
    pub async fn transmit(&self, event: &LogEvent) -> anyhow::Result<ResponseBody> {
        debug!(device_id = self.id, "Radio activated");
        let response = self
            .client
            .post(&self.target)
            .json(event)
            .send()
            .await
            .with_context(|| format!("Device {} could not reach {}", self.id, self.target))?;
        debug!(device_id = self.id, "Radio deactivated");

        let status = response.status();
        let body: ResponseBody = response
            .json()
            .await
            .with_context(|| format!("Device {} got an unreadable response", self.id))?;

        if !status.is_success() {
            bail!(
                "Device {} transmission rejected with {}: {}",
                self.id,
                status,
                body.message
            );
        }

        info!(device_id = self.id, "Transmission successful");
        Ok(body)
    }
}
