//! Shared test support utilities
//!
//! Provides mock `DeliveryTransport` and `QueueClient` implementations for
//! use in unit and integration tests.

use crate::error::TransportError;
use crate::port::{DeliveryResult, DeliveryTransport, OutboundMessage, QueueClient};
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock transport that captures delivered payloads.
pub struct MockTransport {
    delivered: Arc<Mutex<Vec<Bytes>>>,
    attempts: AtomicUsize,
    failure: Mutex<Option<TransportError>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            attempts: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    /// A transport whose every delivery fails with `reason`.
    pub fn failing(reason: TransportError) -> Self {
        let transport = Self::new();
        transport.set_failure(Some(reason));
        transport
    }

    pub fn set_failure(&self, reason: Option<TransportError>) {
        *self.failure.lock().unwrap() = reason;
    }

    pub fn delivered_payloads(&self) -> Vec<Bytes> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryTransport for MockTransport {
    fn deliver(
        &self,
        payload: Bytes,
    ) -> Pin<Box<dyn Future<Output = DeliveryResult> + Send + '_>> {
        Box::pin(async move {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if let Some(reason) = self.failure.lock().unwrap().clone() {
                return DeliveryResult::Failed(reason);
            }
            self.delivered.lock().unwrap().push(payload);
            DeliveryResult::Delivered
        })
    }

    fn kind(&self) -> &'static str {
        "mock"
    }
}

/// Mock queue client that resolves every name to `mock://queues/<name>`.
pub struct MockQueueClient {
    sent: Mutex<Vec<OutboundMessage>>,
    send_attempts: AtomicUsize,
    fail_resolve: AtomicBool,
    fail_send: AtomicBool,
}

impl MockQueueClient {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            send_attempts: AtomicUsize::new(0),
            fail_resolve: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
        }
    }

    pub fn set_fail_resolve(&self, fail: bool) {
        self.fail_resolve.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_attempts(&self) -> usize {
        self.send_attempts.load(Ordering::SeqCst)
    }
}

impl Default for MockQueueClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueClient for MockQueueClient {
    fn queue_url<'a>(
        &'a self,
        queue_name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            if self.fail_resolve.load(Ordering::SeqCst) {
                return Err(TransportError::Resolve {
                    queue: queue_name.to_string(),
                    reason: "Mock queue does not exist".to_string(),
                });
            }
            Ok(format!("mock://queues/{queue_name}"))
        })
    }

    fn send_message(
        &self,
        message: OutboundMessage,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let attempt = self.send_attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail_send.load(Ordering::SeqCst) {
                return Err(TransportError::Publish("Mock publish failure".to_string()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(format!("mock-message-{attempt}"))
        })
    }
}
