//! SQS JSON-protocol client over `reqwest`.
//!
//! Requests are sent unsigned; the endpoint must be an SQS-compatible
//! service that accepts them (or a signing proxy in front of SQS).

use crate::error::TransportError;
use crate::port::{OutboundMessage, QueueClient};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const CONTENT_TYPE: &str = "application/x-amz-json-1.0";
const TARGET_GET_QUEUE_URL: &str = "AmazonSQS.GetQueueUrl";
const TARGET_SEND_MESSAGE: &str = "AmazonSQS.SendMessage";

#[derive(Debug, Clone)]
pub struct SqsQueueClientConfig {
    pub endpoint: String,
    /// Whole-request timeout of the HTTP client. Unset by default.
    pub timeout: Option<Duration>,
}

impl Default for SqsQueueClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9324".to_string(),
            timeout: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetQueueUrlRequest<'a> {
    queue_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetQueueUrlResponse {
    queue_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessageRequest<'a> {
    queue_url: &'a str,
    message_body: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    message_attributes: BTreeMap<&'a str, MessageAttributeValue>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct MessageAttributeValue {
    data_type: &'static str,
    binary_value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessageResponse {
    message_id: String,
}

/// Error body returned by the JSON protocol on non-2xx replies.
#[derive(Deserialize, Default)]
struct ServiceError {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(alias = "Message", default)]
    message: String,
}

impl ServiceError {
    fn describe(self, status: reqwest::StatusCode) -> String {
        match (self.kind.is_empty(), self.message.is_empty()) {
            (true, true) => format!("HTTP {status}"),
            (false, true) => format!("HTTP {status}: {}", self.kind),
            (true, false) => format!("HTTP {status}: {}", self.message),
            (false, false) => format!("HTTP {status}: {}: {}", self.kind, self.message),
        }
    }
}

#[derive(Clone)]
pub struct SqsQueueClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SqsQueueClient {
    pub fn new(config: SqsQueueClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::Publish(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    /// POST one JSON-protocol action and decode the success body.
    async fn call<Req, Resp>(&self, target: &str, request: &Req) -> Result<Resp, String>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(request).map_err(|e| e.to_string())?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("X-Amz-Target", target)
            .body(body)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let error = response.json::<ServiceError>().await.unwrap_or_default();
            return Err(error.describe(status));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| format!("Unexpected response body: {e}"))
    }
}

impl QueueClient for SqsQueueClient {
    fn queue_url<'a>(
        &'a self,
        queue_name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let response: GetQueueUrlResponse = self
                .call(TARGET_GET_QUEUE_URL, &GetQueueUrlRequest { queue_name })
                .await
                .map_err(|reason| TransportError::Resolve {
                    queue: queue_name.to_string(),
                    reason,
                })?;
            Ok(response.queue_url)
        })
    }

    fn send_message(
        &self,
        message: OutboundMessage,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let message_attributes = message
                .binary_attributes
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str(),
                        MessageAttributeValue {
                            data_type: "Binary",
                            binary_value: STANDARD.encode(value),
                        },
                    )
                })
                .collect();

            let request = SendMessageRequest {
                queue_url: &message.queue_url,
                message_body: &message.body,
                message_attributes,
            };

            let response: SendMessageResponse = self
                .call(TARGET_SEND_MESSAGE, &request)
                .await
                .map_err(TransportError::Publish)?;
            Ok(response.message_id)
        })
    }
}
