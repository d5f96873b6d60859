//! Connection supervision for CIS-IP2 receiver sessions
//!
//! A receiver session is a single long-lived control connection shared by
//! every zone controller. This crate owns that session: it performs the
//! initial connect with bounded exponential backoff, keeps a liveness loop
//! running in the background to repair drops, and resolves the device's
//! stable identity (MAC address, model, firmware) once at startup.
//!
//! # Architecture
//!
//! ```text
//! SessionSupervisor (background task)
//!   └── every liveness_interval:
//!         connected?  → nothing (cheap steady state)
//!         dropped?    → ReceiverSession::connect_with_retry
//!                       → ReconnectListener::on_reconnected
//!
//! ReceiverSession (shared, Arc)
//!   ├── connectivity flag (supervisor-owned)
//!   ├── connect_with_retry / fetch_with_retry
//!   └── get / set passthrough for consumers
//! ```
//!
//! Retry policy is uniform across connect, fetch and reconnect paths: wait
//! `retry_backoff_base`, double, repeat, up to `max_connect_attempts`.
//! Exhausting retries is never fatal — setup reports it upward and the
//! liveness loop tries again on its next tick, forever, until shutdown.

pub mod config;
pub mod error;
pub mod identity;
pub mod session;
pub mod supervisor;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use identity::{resolve_identity, DeviceIdentity, PresenceRegistry};
pub use session::ReceiverSession;
pub use supervisor::{ReconnectListener, SessionSupervisor};
