//! Caller-facing responses.
//!
//! `build` is a pure function of the pipeline outcome; the two serialized
//! forms are the plain service body and the API-gateway proxy response.

use crate::error::{DecodeError, TransportError};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// What happened to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Delivered { device_id: i32 },
    DecodeFailed(DecodeError),
    DeliveryFailed { device_id: i32, reason: TransportError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub status_code: u16,
}

/// `{"status": ..., "message": ...}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseBody {
    pub status: ResponseStatus,
    pub message: String,
}

/// Proxy-integration response returned by the event-triggered entry point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub is_base64_encoded: bool,
    /// Serialized `ResponseBody`.
    pub body: String,
}

pub const NO_BODY_MESSAGE: &str = "There was no body provided with the request";

impl ApiResponse {
    pub fn new(status: ResponseStatus, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            status,
            message: message.into(),
            status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    pub fn body(&self) -> ResponseBody {
        ResponseBody {
            status: self.status,
            message: self.message.clone(),
        }
    }

    pub fn body_json(&self) -> String {
        // a struct of an enum and a String always serializes
        serde_json::to_string(&self.body()).unwrap_or_default()
    }

    pub fn to_gateway(&self) -> GatewayResponse {
        GatewayResponse {
            status_code: self.status_code,
            is_base64_encoded: false,
            body: self.body_json(),
        }
    }

    pub fn gateway_json(&self) -> String {
        serde_json::to_string(&self.to_gateway()).unwrap_or_default()
    }
}

pub fn build(outcome: &PipelineOutcome) -> ApiResponse {
    match outcome {
        PipelineOutcome::Delivered { device_id } => ApiResponse::new(
            ResponseStatus::Success,
            format!("Message from device:{device_id} successfully processed"),
            200,
        ),
        PipelineOutcome::DecodeFailed(DecodeError::EmptyBody) => {
            ApiResponse::new(ResponseStatus::Error, NO_BODY_MESSAGE, 400)
        }
        PipelineOutcome::DecodeFailed(e) => ApiResponse::new(
            ResponseStatus::Error,
            format!("Request message could not be parsed: {e}"),
            400,
        ),
        PipelineOutcome::DeliveryFailed { device_id, reason } => {
            let status_code = match reason {
                TransportError::NotConnected => 503,
                _ => 502,
            };
            ApiResponse::new(
                ResponseStatus::Error,
                format!("Message from device:{device_id} could not be delivered: {reason}"),
                status_code,
            )
        }
    }
}
