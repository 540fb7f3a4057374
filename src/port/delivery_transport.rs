//! Delivery of serialized records to the storage side.
//!
//! Both deployment shapes run the same pipeline and differ only in the
//! `DeliveryTransport` they are wired with.

use crate::error::TransportError;
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Delivered,
    Failed(TransportError),
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered)
    }
}

/// Collapses a transport call into its delivery outcome.
impl From<Result<(), TransportError>> for DeliveryResult {
    fn from(result: Result<(), TransportError>) -> Self {
        match result {
            Ok(()) => DeliveryResult::Delivered,
            Err(e) => DeliveryResult::Failed(e),
        }
    }
}

/// Capability to hand one serialized record to the storage subsystem.
///
/// This trait is dyn-compatible by using boxed futures. `deliver` makes a
/// single attempt and never retries; failures come back as
/// `DeliveryResult::Failed` rather than as an error.
pub trait DeliveryTransport: Send + Sync {
    fn deliver(
        &self,
        payload: Bytes,
    ) -> Pin<Box<dyn Future<Output = DeliveryResult> + Send + '_>>;

    /// Short label used in logs.
    fn kind(&self) -> &'static str;
}
