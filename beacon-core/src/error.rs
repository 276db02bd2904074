use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid connection id '{value}': {source}")]
    InvalidConnectionId {
        value: String,
        #[source]
        source: uuid::Error,
    },
}

/// Failures decoding a frame received from a client.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed signal message: {0}")]
    Malformed(#[from] serde_json::Error),
}
