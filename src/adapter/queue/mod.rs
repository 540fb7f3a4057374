//! Work-queue delivery for the event-triggered entry point.

mod sqs;

pub use sqs::{SqsQueueClient, SqsQueueClientConfig};

use crate::port::{DeliveryResult, DeliveryTransport, OutboundMessage, QueueClient};
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Message attribute carrying the serialized record.
pub const PAYLOAD_ATTRIBUTE: &str = "GBP-Binary";
/// Placeholder body; queues reject empty bodies and consumers read the attribute.
pub const MESSAGE_BODY: &str = "Log Message";

/// Publishes each record as one queue message.
///
/// Every delivery resolves the queue URL and publishes once. Durability past
/// that point is whatever the queue provider guarantees.
pub struct QueueTransport {
    client: Arc<dyn QueueClient>,
    queue_name: String,
}

impl QueueTransport {
    pub fn new(client: Arc<dyn QueueClient>, queue_name: impl Into<String>) -> Self {
        Self {
            client,
            queue_name: queue_name.into(),
        }
    }

    #[instrument(
        skip(self, payload),
        fields(queue = %self.queue_name, payload_size = payload.len())
    )]
    async fn publish(&self, payload: Bytes) -> DeliveryResult {
        let queue_url = match self.client.queue_url(&self.queue_name).await {
            Ok(url) => url,
            Err(e) => {
                error!(error = %e, "Failed to resolve queue URL");
                return DeliveryResult::Failed(e);
            }
        };

        let message = OutboundMessage {
            queue_url,
            body: MESSAGE_BODY.to_string(),
            binary_attributes: vec![(PAYLOAD_ATTRIBUTE.to_string(), payload)],
        };

        let published = self
            .client
            .send_message(message)
            .await
            .map(|message_id| {
                info!(message_id = %message_id, "Published record to queue");
            })
            .inspect_err(|e| error!(error = %e, "Failed to publish record to queue"));
        DeliveryResult::from(published)
    }
}

impl DeliveryTransport for QueueTransport {
    fn deliver(
        &self,
        payload: Bytes,
    ) -> Pin<Box<dyn Future<Output = DeliveryResult> + Send + '_>> {
        Box::pin(self.publish(payload))
    }

    fn kind(&self) -> &'static str {
        "queue"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::test_support::MockQueueClient;

    #[tokio::test]
    async fn test_deliver_publishes_payload_as_binary_attribute() {
        let client = Arc::new(MockQueueClient::new());
        let transport = QueueTransport::new(client.clone(), "device-logs");

        let result = transport.deliver(Bytes::from_static(b"\x08\x07")).await;

        assert!(result.is_delivered());
        let sent = client.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].queue_url, "mock://queues/device-logs");
        assert_eq!(sent[0].body, MESSAGE_BODY);
        assert_eq!(
            sent[0].binary_attributes,
            vec![(PAYLOAD_ATTRIBUTE.to_string(), Bytes::from_static(b"\x08\x07"))]
        );
    }

    #[tokio::test]
    async fn test_deliver_reports_publish_failure() {
        let client = Arc::new(MockQueueClient::new());
        client.set_fail_send(true);
        let transport = QueueTransport::new(client.clone(), "device-logs");

        let result = transport.deliver(Bytes::from_static(b"x")).await;

        assert!(matches!(
            result,
            DeliveryResult::Failed(TransportError::Publish(_))
        ));
        assert!(client.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_deliver_stops_when_queue_cannot_be_resolved() {
        let client = Arc::new(MockQueueClient::new());
        client.set_fail_resolve(true);
        let transport = QueueTransport::new(client.clone(), "missing");

        let result = transport.deliver(Bytes::from_static(b"x")).await;

        assert!(matches!(
            result,
            DeliveryResult::Failed(TransportError::Resolve { .. })
        ));
        assert_eq!(client.send_attempts(), 0);
    }

    #[tokio::test]
    async fn test_each_delivery_is_a_single_attempt() {
        let client = Arc::new(MockQueueClient::new());
        client.set_fail_send(true);
        let transport = QueueTransport::new(client.clone(), "device-logs");

        let result = transport.deliver(Bytes::from_static(b"x")).await;

        assert!(!result.is_delivered());
        assert_eq!(client.send_attempts(), 1);
    }
}
