//! Event-triggered entry point.
//!
//! One invocation handles one proxy event: the request body is pulled out of
//! the event, run through the pipeline and answered with a gateway response.

use crate::error::{DecodeError, IngestError};
use crate::pipeline::IngestPipeline;
use crate::response::{GatewayResponse, PipelineOutcome, build};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, instrument, warn};

/// The subset of an API-gateway proxy event this handler needs.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl GatewayEvent {
    fn body_bytes(&self) -> Result<Option<Vec<u8>>, DecodeError> {
        match &self.body {
            None => Ok(None),
            Some(body) if self.is_base64_encoded => STANDARD
                .decode(body)
                .map(Some)
                .map_err(|e| DecodeError::Malformed(format!("invalid base64 body: {e}"))),
            Some(body) => Ok(Some(body.as_bytes().to_vec())),
        }
    }
}

/// Handle one raw invocation event.
#[instrument(skip_all, fields(event_size = event.len()))]
pub async fn handle_invocation(event: &[u8], pipeline: &IngestPipeline) -> GatewayResponse {
    let event: GatewayEvent = match serde_json::from_slice(event) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Invocation event could not be parsed");
            return build(&PipelineOutcome::DecodeFailed(DecodeError::Malformed(e.to_string())))
                .to_gateway();
        }
    };

    if let Some(body) = &event.body {
        info!(body = %body, "Received request body");
    }

    let body = match event.body_bytes() {
        Ok(body) => body,
        Err(e) => return build(&PipelineOutcome::DecodeFailed(e)).to_gateway(),
    };

    pipeline.process(body.as_deref()).await.to_gateway()
}

/// Read one event from `input`, handle it and write the response to `output`.
pub async fn run_invocation<R, W>(
    mut input: R,
    mut output: W,
    pipeline: &IngestPipeline,
) -> Result<GatewayResponse, IngestError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut event = Vec::new();
    input.read_to_end(&mut event).await?;

    let response = handle_invocation(&event, pipeline).await;

    let json = serde_json::to_vec(&response)
        .map_err(|e| IngestError::Invocation(format!("Failed to serialize response: {e}")))?;
    output.write_all(&json).await?;
    output.flush().await?;

    Ok(response)
}
