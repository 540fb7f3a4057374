use crate::error::TransportError;
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

/// A single message to publish on a work queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub queue_url: String,
    pub body: String,
    /// Binary message attributes, keyed by attribute name.
    pub binary_attributes: Vec<(String, Bytes)>,
}

/// Minimal work-queue API needed by `QueueTransport`.
pub trait QueueClient: Send + Sync {
    /// Resolve a queue name to the URL used for publishing.
    fn queue_url<'a>(
        &'a self,
        queue_name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + 'a>>;

    /// Publish one message and return the provider's message id.
    fn send_message(
        &self,
        message: OutboundMessage,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>>;
}
