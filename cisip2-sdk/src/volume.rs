//! Volume encodings
//!
//! The device speaks two volume dialects: an integer step out of 100 (the
//! default) and an absolute decibel value. The SDK's public surface is a
//! 0.0-1.0 fraction either way; the display mode only changes what goes on
//! the wire.

use serde::{Deserialize, Serialize};

/// Decibel floor of the receiver's volume range
pub const VOLUME_DB_MIN: f64 = -92.0;
/// Decibel ceiling of the receiver's volume range
pub const VOLUME_DB_MAX: f64 = 23.0;

/// Which wire encoding absolute volume commands use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeDisplayMode {
    /// 0-100 integer step on `volumestep`
    #[default]
    Step,
    /// Decibel value on `volumedb`
    Decibel,
}

/// Quantize a 0.0-1.0 fraction to the device's 0-100 step
///
/// Rounded, not truncated, so `step / 100.0` round-trips exactly for every
/// integer step.
pub fn fraction_to_step(fraction: f32) -> i64 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as i64
}

/// Map a 0.0-1.0 fraction linearly onto the receiver's decibel range
pub fn fraction_to_db(fraction: f32) -> f64 {
    VOLUME_DB_MIN + fraction.clamp(0.0, 1.0) as f64 * (VOLUME_DB_MAX - VOLUME_DB_MIN)
}
