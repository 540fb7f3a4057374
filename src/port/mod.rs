pub mod delivery_transport;
pub mod queue_client;

pub use delivery_transport::{DeliveryResult, DeliveryTransport};
pub use queue_client::{OutboundMessage, QueueClient};
