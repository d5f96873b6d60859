//! Push notification payloads

use serde::{Deserialize, Serialize};

use crate::value::FeatureValue;

/// An unsolicited state change pushed by the device
///
/// Notifications are delivered unordered with respect to command
/// acknowledgements; consumers treat them as last-writer-wins facts about
/// the feature they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Full feature key, zone prefix included (e.g. `zone2.mute`)
    pub feature: String,
    /// The feature's new value
    pub value: FeatureValue,
}

impl Notification {
    /// Create a notification payload
    pub fn new(feature: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Self {
            feature: feature.into(),
            value: value.into(),
        }
    }
}
