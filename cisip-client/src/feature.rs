//! Zone set and feature-key namespace
//!
//! Feature keys are dotted paths: a zone prefix followed by a bare feature
//! name (`main.power`, `zone2.volumestep`). The main zone uses the literal
//! prefix `main.`, not an empty prefix. Keys under `audio.`, `network.` and
//! `system.` address the unit as a whole and carry no zone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bare feature names and unit-global keys understood by the receiver
pub mod features {
    /// Zone power state, `"on"` / `"off"`
    pub const POWER: &str = "power";
    /// Zone input source token
    pub const INPUT: &str = "input";
    /// Zone mute state, `"on"` / `"off"`
    pub const MUTE: &str = "mute";
    /// Zone volume as a 0-100 integer step
    pub const VOLUME_STEP: &str = "volumestep";
    /// Zone volume in decibels
    pub const VOLUME_DB: &str = "volumedb";
    /// Relative volume increment, written with [`PULSE`]
    pub const VOLUME_UP: &str = "volume+";
    /// Relative volume decrement, written with [`PULSE`]
    pub const VOLUME_DOWN: &str = "volume-";

    /// Content-free value for the relative volume features
    pub const PULSE: &str = "pulse";

    /// Unit-global sound field (not zone-prefixed)
    pub const SOUND_FIELD: &str = "audio.soundfield";
    /// Unit MAC address, the stable device identity
    pub const MAC_ADDRESS: &str = "network.macaddress";
    /// Unit hardware model code (e.g. `Z21`)
    pub const MODEL_TYPE: &str = "system.modeltype";
    /// Unit firmware version string
    pub const VERSION: &str = "system.version";
}

/// One output zone of the receiver
///
/// The zone set is closed. All three zones are always addressable regardless
/// of whether the physical unit implements them; a zone the hardware lacks
/// simply never reports state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Main,
    Zone2,
    Zone3,
}

impl Zone {
    /// All zones, main first
    pub const ALL: [Zone; 3] = [Zone::Main, Zone::Zone2, Zone::Zone3];

    /// The zone's protocol name
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Main => "main",
            Zone::Zone2 => "zone2",
            Zone::Zone3 => "zone3",
        }
    }

    /// The zone's feature-key prefix, dot included
    pub fn prefix(&self) -> &'static str {
        match self {
            Zone::Main => "main.",
            Zone::Zone2 => "zone2.",
            Zone::Zone3 => "zone3.",
        }
    }

    /// Build a full feature key for this zone
    pub fn feature(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    /// Split a feature key into its zone and bare feature name
    ///
    /// Matching is on the exact prefix including the dot, so `zone2.power`
    /// can never be claimed by a hypothetical `zone` prefix and a key like
    /// `zone23.power` matches nothing. Unit-global keys return `None`.
    pub fn split(feature: &str) -> Option<(Zone, &str)> {
        Zone::ALL.iter().find_map(|zone| {
            feature
                .strip_prefix(zone.prefix())
                .map(|name| (*zone, name))
        })
    }

    /// True for the zones other than main
    pub fn is_secondary(&self) -> bool {
        !matches!(self, Zone::Main)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
