pub mod queue;
pub mod socket;

pub use queue::{QueueTransport, SqsQueueClient, SqsQueueClientConfig};
pub use socket::{ConnectionState, SocketTransport};
