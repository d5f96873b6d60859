//! Per-zone state store
//!
//! One `ZoneStateStore` exists per zone for the life of the integration. The
//! store has exactly two mutation paths: [`initialize`], which bulk-reads
//! the zone after (re)connect, and [`apply_notification`], which folds a
//! single push event into the projection. Nothing else writes the fields.
//!
//! [`initialize`]: ZoneStateStore::initialize
//! [`apply_notification`]: ZoneStateStore::apply_notification

use parking_lot::RwLock;

use cisip_client::{features, FeatureClient, FeatureValue, Notification, Zone};

use crate::zone_state::{Power, ZoneState};

/// In-memory projection of one zone's device state
pub struct ZoneStateStore {
    zone: Zone,
    state: RwLock<ZoneState>,
}

impl ZoneStateStore {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            state: RwLock::new(ZoneState::default()),
        }
    }

    /// The zone this store projects
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Copy of the current projection
    pub fn snapshot(&self) -> ZoneState {
        self.state.read().clone()
    }

    pub fn power(&self) -> Option<Power> {
        self.state.read().power
    }

    /// Raw device source token (not display-mapped)
    pub fn source_token(&self) -> Option<String> {
        self.state.read().source.clone()
    }

    pub fn is_muted(&self) -> Option<bool> {
        self.state.read().mute
    }

    /// Volume as a 0.0-1.0 fraction
    pub fn volume_level(&self) -> Option<f32> {
        self.state.read().volume
    }

    /// Raw device sound-field token (not display-mapped)
    pub fn sound_mode_token(&self) -> Option<String> {
        self.state.read().sound_mode.clone()
    }

    /// Read one feature, collapsing both an unreadable feature and a
    /// transport error to `None` so a read failure never propagates.
    async fn read_feature(&self, client: &dyn FeatureClient, key: &str) -> Option<FeatureValue> {
        match client.get_feature(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    "Failed to read feature {} for zone {}: {}",
                    key,
                    self.zone,
                    err
                );
                None
            }
        }
    }

    /// Bulk-read the zone's state from the device
    ///
    /// Reads `{zone}.power` first. A zone that is on is read fully (input,
    /// volume step, the unit-global sound field, mute, in that order); a
    /// zone that is off records only the power state. An unexpected power
    /// value is logged as an anomaly and leaves the projection unset. Read
    /// failures never propagate — the affected field simply stays unknown
    /// until a notification fills it in.
    pub async fn initialize(&self, client: &dyn FeatureClient) {
        tracing::debug!("Retrieving initial state for zone {}", self.zone);

        let power = self
            .read_feature(client, &self.zone.feature(features::POWER))
            .await;

        match power.as_ref().and_then(FeatureValue::as_str) {
            Some("on") => {
                let source = self
                    .read_feature(client, &self.zone.feature(features::INPUT))
                    .await;
                let volume_step = self
                    .read_feature(client, &self.zone.feature(features::VOLUME_STEP))
                    .await;
                let sound_mode = self.read_feature(client, features::SOUND_FIELD).await;
                let mute = self
                    .read_feature(client, &self.zone.feature(features::MUTE))
                    .await;

                let mut state = self.state.write();
                state.power = Some(Power::On);
                state.source = source.map(|v| v.to_string());
                state.volume = volume_step
                    .and_then(|v| v.as_int())
                    .map(|step| step as f32 / 100.0);
                state.sound_mode = sound_mode.map(|v| v.to_string());
                state.mute = mute.map(|v| v.is_on());
            }
            Some("off") => {
                tracing::debug!("Zone {} is off", self.zone);
                self.state.write().power = Some(Power::Off);
            }
            Some(other) => {
                tracing::error!(
                    "Unexpected power state '{}' for zone {}, leaving state unset",
                    other,
                    self.zone
                );
            }
            None => {
                tracing::warn!("Power state for zone {} unreadable", self.zone);
            }
        }
    }

    /// Fold one push notification into the projection
    ///
    /// Only events whose feature key carries exactly this store's zone
    /// prefix are applied; everything else is ignored without effect, so a
    /// `zone2.` event can never leak into the main store. Feature names
    /// outside the mapped set are accepted silently — the device vocabulary
    /// may grow.
    pub fn apply_notification(&self, note: &Notification) {
        let Some((zone, name)) = Zone::split(&note.feature) else {
            tracing::trace!("Ignoring non-zone notification for {}", note.feature);
            return;
        };
        if zone != self.zone {
            tracing::trace!(
                "Ignoring notification for {}, not for zone {}",
                note.feature,
                self.zone
            );
            return;
        }

        let mut state = self.state.write();
        match name {
            features::POWER => {
                state.power = Some(if note.value.is_on() {
                    Power::On
                } else {
                    Power::Off
                });
            }
            features::INPUT => {
                state.source = Some(note.value.to_string());
            }
            features::MUTE => {
                state.mute = Some(note.value.is_on());
            }
            features::VOLUME_STEP => match note.value.as_int() {
                Some(step) => state.volume = Some(step as f32 / 100.0),
                None => {
                    tracing::warn!(
                        "Non-numeric volume step '{}' for zone {}",
                        note.value,
                        self.zone
                    );
                }
            },
            other => {
                tracing::trace!("Unmapped feature '{}' for zone {}", other, self.zone);
            }
        }
    }
}
