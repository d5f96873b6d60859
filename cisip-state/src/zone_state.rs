//! Zone state model

use serde::{Deserialize, Serialize};

/// Power state of a zone
///
/// Unknown power is modeled as the absence of a value, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

impl Power {
    pub fn is_on(&self) -> bool {
        matches!(self, Power::On)
    }
}

/// Snapshot of one zone's projected state
///
/// Every field starts unknown (`None`) and becomes known through the initial
/// bulk read or a notification. Volume is a normalized fraction derived from
/// the device's 0-100 step encoding, always `step / 100`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Zone power
    pub power: Option<Power>,
    /// Input source, raw device token (e.g. `bd`)
    pub source: Option<String>,
    /// Mute state
    pub mute: Option<bool>,
    /// Volume as a 0.0-1.0 fraction
    pub volume: Option<f32>,
    /// Sound field, raw device token (unit-global on the wire)
    pub sound_mode: Option<String>,
}
