//! Persistent WebSocket session to the storage service.

mod state;
mod transport;

pub use state::ConnectionState;
pub use transport::SocketTransport;
