use thiserror::Error;

/// Errors surfaced by a [`FeatureClient`](crate::FeatureClient) implementation
#[derive(Error, Debug)]
pub enum ClientError {
    /// TCP-level connection failure
    #[error("Connection to {host}:{port} failed: {message}")]
    Connection {
        host: String,
        port: u16,
        message: String,
    },

    /// A feature read or write failed after the request was sent
    #[error("Request for feature {feature} failed: {message}")]
    Request { feature: String, message: String },

    /// The in-flight request was cancelled before the device answered
    ///
    /// Callers performing retryable reads treat this as transient.
    #[error("In-flight request was cancelled")]
    Cancelled,

    /// Operation attempted while the transport is down
    #[error("Client is not connected")]
    NotConnected,

    /// The device sent something the client could not make sense of
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
