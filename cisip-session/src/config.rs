//! Session configuration

use std::time::Duration;

/// Default CIS-IP2 control port
pub const DEFAULT_PORT: u16 = 33336;

/// Configuration for session establishment and supervision
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum attempts per connect/fetch retry loop
    pub max_connect_attempts: u32,
    /// Base duration for exponential backoff between attempts
    pub retry_backoff_base: Duration,
    /// How often the liveness loop checks the connection
    pub liveness_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_connect_attempts: 3,
            retry_backoff_base: Duration::from_secs(2),
            liveness_interval: Duration::from_secs(60),
        }
    }
}
