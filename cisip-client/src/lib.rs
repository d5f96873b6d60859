//! Client contract for the CIS-IP2 feature protocol
//!
//! This crate defines the seam between the SDK and the wire: an opaque async
//! client that reads and writes string-keyed device features and delivers a
//! single stream of push notifications. Everything above this crate is
//! transport-agnostic; everything below it (sockets, framing, request
//! pairing) is someone else's problem.
//!
//! # Architecture
//!
//! ```text
//! cisip-session / cisip-state / cisip2-sdk
//!         │
//!         ▼
//! FeatureClient (trait)         ← this crate
//!   ├── get_feature("main.power")
//!   ├── set_feature("zone2.input", "bd")
//!   └── register_notification_callback(...)
//!         │
//!         ▼
//! wire implementation (external)
//! ```
//!
//! Feature keys are dotted paths with a zone prefix (`main.`, `zone2.`,
//! `zone3.`); a handful of keys such as `audio.soundfield` and
//! `network.macaddress` address the whole unit. The [`Zone`] type owns the
//! prefix rules so no other crate does string surgery on keys.

pub mod client;
pub mod error;
pub mod feature;
pub mod notification;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use client::{FeatureClient, NotificationCallback};
pub use error::{ClientError, Result};
pub use feature::{features, Zone};
pub use notification::Notification;
pub use value::FeatureValue;

#[cfg(any(test, feature = "test-support"))]
pub use mock::MockFeatureClient;
