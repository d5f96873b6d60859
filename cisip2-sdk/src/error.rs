use cisip_client::Zone;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error(transparent)]
    Session(#[from] cisip_session::SessionError),

    #[error("No controller for zone {0}")]
    ZoneUnavailable(Zone),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
