use cisip_client::ClientError;
use thiserror::Error;

/// Errors that can occur during session supervision
#[derive(Error, Debug)]
pub enum SessionError {
    /// Initial connect exhausted its retry budget
    ///
    /// Non-fatal by design: the embedder is expected to continue in a
    /// degraded state rather than abort.
    #[error("Failed to connect to {host}:{port} after {attempts} attempts")]
    ConnectFailed {
        host: String,
        port: u16,
        attempts: u32,
    },

    /// The supervisor's background task did not shut down cleanly
    #[error("Supervisor shutdown error: {0}")]
    Shutdown(String),

    /// Error from the underlying feature client
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
