//! Logging configuration
//!
//! The SDK only emits `tracing` events; installing a subscriber is the
//! embedder's call. This module is a convenience for embedders that don't
//! already run one, with a mode switch so headless services and interactive
//! frontends can share a binary.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different embedders
#[derive(Debug, Clone, Copy)]
pub enum LoggingMode {
    /// No output; all events are dropped
    Silent,
    /// Compact stderr output for development
    Development,
    /// Verbose diagnostics with source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Initialize logging with the specified mode
///
/// Call early, before the first [`ReceiverSystem::connect`]; events emitted
/// before a subscriber exists are lost.
///
/// [`ReceiverSystem::connect`]: crate::ReceiverSystem::connect
///
/// # Environment Variables
///
/// - `CISIP_LOG_LEVEL`: override the log level (error, warn, info, debug,
///   trace), taking precedence over `RUST_LOG`
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter("info");

            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(filter);

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))?;

            Ok(())
        }
        LoggingMode::Debug => {
            let filter = create_env_filter("debug");

            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter);

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))?;

            Ok(())
        }
    }
}

/// Initialize logging from the `CISIP_LOG_MODE` environment variable
///
/// Recognizes `development` and `debug`; anything else (including unset)
/// stays silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("CISIP_LOG_MODE").as_deref() {
        Ok("development") => LoggingMode::Development,
        Ok("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    };

    init_logging(mode)
}

fn create_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("CISIP_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}
