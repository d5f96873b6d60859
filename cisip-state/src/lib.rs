//! Zone state management for CIS-IP2 receivers
//!
//! A receiver exposes up to three zones, each with its own power, input
//! source, mute and volume, plus a unit-global sound field. This crate keeps
//! an in-memory projection of that state per zone and routes the device's
//! push notifications to the right projection.
//!
//! # Architecture
//!
//! ```text
//! device push stream → NotificationRouter ── main.*  ──→ ZoneStateStore (main)
//!                          (one consumer)  ── zone2.* ──→ ZoneStateStore (zone2)
//!                                          ── zone3.* ──→ ZoneStateStore (zone3)
//!                                          ── other   ──→ dropped
//! ```
//!
//! Updates are last-writer-wins single-field assignments; a store has
//! exactly two mutation paths, the initial bulk read and notification
//! application. Reads never block writers for longer than a field copy.

pub mod router;
pub mod store;
pub mod zone_state;

pub use router::NotificationRouter;
pub use store::ZoneStateStore;
pub use zone_state::{Power, ZoneState};

// Re-export the zone namespace so consumers don't need cisip-client for it
pub use cisip_client::Zone;
