//! decode → encode → deliver → respond.

use crate::decoder::decode;
use crate::encoder::encode_to_vec;
use crate::port::{DeliveryResult, DeliveryTransport};
use crate::response::{ApiResponse, PipelineOutcome, build};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The ingest pipeline bound to one delivery transport.
///
/// Every failure ends up as an `ApiResponse`; nothing is retried.
#[derive(Clone)]
pub struct IngestPipeline {
    transport: Arc<dyn DeliveryTransport>,
}

impl IngestPipeline {
    pub fn new(transport: Arc<dyn DeliveryTransport>) -> Self {
        Self { transport }
    }

    #[instrument(
        skip_all,
        fields(
            transport = self.transport.kind(),
            body_size = raw_body.map_or(0, <[u8]>::len)
        )
    )]
    pub async fn process(&self, raw_body: Option<&[u8]>) -> ApiResponse {
        let outcome = self.run(raw_body).await;
        let response = build(&outcome);
        if response.is_success() {
            info!(status_code = response.status_code, "{}", response.message);
        } else {
            warn!(status_code = response.status_code, "{}", response.message);
        }
        response
    }

    async fn run(&self, raw_body: Option<&[u8]>) -> PipelineOutcome {
        let event = match decode(raw_body) {
            Ok(event) => event,
            Err(e) => return PipelineOutcome::DecodeFailed(e),
        };
        let device_id = event.device_id;

        let payload = Bytes::from(encode_to_vec(&event));

        match self.transport.deliver(payload).await {
            DeliveryResult::Delivered => PipelineOutcome::Delivered { device_id },
            DeliveryResult::Failed(reason) => PipelineOutcome::DeliveryFailed { device_id, reason },
        }
    }
}
