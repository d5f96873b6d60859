//! Multi-zone control SDK for Sony CIS-IP2 A/V receivers
//!
//! Maintains a supervised control session with a receiver, projects per-zone
//! state from the device's push notification stream, and exposes per-zone
//! playback controls with the receiver's source and sound-mode vocabularies.
//!
//! # Architecture
//!
//! ```text
//! ReceiverSystem (context object, one per receiver)
//! ├── ReceiverSession       shared connection + connectivity flag
//! ├── SessionSupervisor     background liveness loop, backoff reconnect
//! ├── NotificationRouter    push stream → per-zone state stores
//! └── ZoneController × 3    commands + read model per zone
//! ```
//!
//! The wire protocol is out of scope: bring any [`FeatureClient`]
//! implementation. Reconnection runs concurrently with command issuance and
//! repairs the transport without disturbing the system's identity.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cisip2_sdk::{ReceiverSystem, SystemConfig, Zone};
//!
//! let client = Arc::new(my_wire_client);
//! let system =
//!     ReceiverSystem::connect(client, "10.0.0.40", 33336, SystemConfig::default()).await?;
//!
//! let main = system.controller(Zone::Main)?;
//! main.turn_on().await?;
//! main.select_source("BD/DVD").await?;  // sends the preferred token "bd"
//! main.set_volume_level(0.35).await?;   // step mode: sends 35
//!
//! // Secondary zones can follow the main zone's input.
//! system.controller(Zone::Zone2)?.select_source("MAIN SOURCE").await?;
//!
//! system.shutdown().await?;
//! ```

pub mod controller;
pub mod error;
pub mod logging;
pub mod system;
pub mod vocab;
pub mod volume;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::ZoneController;
pub use error::{Result, SdkError};
pub use system::{ReceiverSystem, SystemConfig};
pub use volume::{VolumeDisplayMode, VOLUME_DB_MAX, VOLUME_DB_MIN};

// Client contract
pub use cisip_client::{
    features, ClientError, FeatureClient, FeatureValue, Notification, NotificationCallback, Zone,
};

// Session supervision
pub use cisip_session::{
    DeviceIdentity, PresenceRegistry, ReceiverSession, SessionConfig, SessionError,
};
pub use cisip_session::config::DEFAULT_PORT;

// Zone state
pub use cisip_state::{NotificationRouter, Power, ZoneState, ZoneStateStore};

// Logging
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::controller::ZoneController;
    pub use crate::error::{Result, SdkError};
    pub use crate::system::{ReceiverSystem, SystemConfig};
    pub use crate::volume::VolumeDisplayMode;
    pub use cisip_client::{FeatureClient, FeatureValue, Notification, Zone};
    pub use cisip_state::{Power, ZoneState};
}
