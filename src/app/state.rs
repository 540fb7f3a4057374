use crate::adapter::SocketTransport;
use crate::config::Settings;
use crate::pipeline::IngestPipeline;
use crate::port::DeliveryTransport;
use std::sync::Arc;

/// Shared state of the long-running service.
pub struct AppState {
    pub pipeline: IngestPipeline,
    pub storage: Arc<SocketTransport>,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// Starts connecting to the storage service; requests arriving before the
    /// connection opens are answered with a delivery failure.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let storage = SocketTransport::connect(settings.storage_service_address.clone());
        let transport: Arc<dyn DeliveryTransport> = storage.clone();

        Self {
            pipeline: IngestPipeline::new(transport),
            storage,
        }
    }
}
