use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid invocation event: {0}")]
    Invocation(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error(transparent)]
    Simulator(#[from] anyhow::Error),
}

/// Reasons a request body cannot be turned into a `LogEvent`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no body provided")]
    EmptyBody,

    #[error("malformed body: {0}")]
    Malformed(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown event type `{0}`")]
    UnknownSeverity(String),
}

/// Delivery failures reported by a `DeliveryTransport`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("not connected")]
    NotConnected,

    #[error("failed to resolve queue `{queue}`: {reason}")]
    Resolve { queue: String, reason: String },

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("send failed: {0}")]
    Send(String),
}
