//! Per-zone controller handles
//!
//! A `ZoneController` is the command-and-read surface for one zone, the
//! piece an embedding platform wires its entity to. Controllers share the
//! receiver session and their zone's state store; they hold no state of
//! their own beyond configuration.

use std::sync::Arc;

use cisip_client::{features, Zone};
use cisip_session::{DeviceIdentity, ReceiverSession};
use cisip_state::{Power, ZoneStateStore};

use crate::error::Result;
use crate::vocab;
use crate::volume::{fraction_to_db, fraction_to_step, VolumeDisplayMode};

/// Command surface and read model for one receiver zone
#[derive(Clone)]
pub struct ZoneController {
    zone: Zone,
    session: Arc<ReceiverSession>,
    store: Arc<ZoneStateStore>,
    identity: DeviceIdentity,
    volume_mode: VolumeDisplayMode,
}

impl ZoneController {
    pub(crate) fn new(
        zone: Zone,
        session: Arc<ReceiverSession>,
        store: Arc<ZoneStateStore>,
        identity: DeviceIdentity,
        volume_mode: VolumeDisplayMode,
    ) -> Self {
        Self {
            zone,
            session,
            store,
            identity,
            volume_mode,
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Stable identifier for this zone entity
    pub fn unique_id(&self) -> String {
        self.identity.zone_unique_id(self.zone)
    }

    /// Display name for this zone entity
    pub fn name(&self) -> String {
        format!("{}-{}", self.identity.device_name(), self.zone)
    }

    // ========================================================================
    // Read model
    // ========================================================================

    pub fn power(&self) -> Option<Power> {
        self.store.power()
    }

    /// Current source, display-mapped
    ///
    /// Unknown tokens pass through raw rather than disappearing; a secondary
    /// zone reporting the `source` token displays as `MAIN SOURCE`.
    pub fn source(&self) -> Option<String> {
        let token = self.store.source_token()?;
        if token == vocab::MAIN_SOURCE_TOKEN {
            return Some(vocab::FOLLOW_MAIN.to_string());
        }
        Some(
            vocab::display_source(&token)
                .map(String::from)
                .unwrap_or(token),
        )
    }

    pub fn is_volume_muted(&self) -> Option<bool> {
        self.store.is_muted()
    }

    /// Volume as a 0.0-1.0 fraction
    pub fn volume_level(&self) -> Option<f32> {
        self.store.volume_level()
    }

    /// Current sound mode, display-mapped, raw token if unmapped
    pub fn sound_mode(&self) -> Option<String> {
        let token = self.store.sound_mode_token()?;
        Some(
            vocab::display_sound_mode(&token)
                .map(String::from)
                .unwrap_or(token),
        )
    }

    /// Selectable source names for this zone
    pub fn source_list(&self) -> Vec<&'static str> {
        let names = vocab::source_names();
        if self.zone.is_secondary() {
            let mut list = Vec::with_capacity(names.len() + 1);
            list.push(vocab::FOLLOW_MAIN);
            list.extend(names);
            list
        } else {
            names
        }
    }

    /// Selectable sound-mode names
    pub fn sound_mode_list(&self) -> Vec<&'static str> {
        vocab::sound_mode_names()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub async fn turn_on(&self) -> Result<()> {
        self.session
            .set(&self.zone.feature(features::POWER), "on")
            .await?;
        Ok(())
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.session
            .set(&self.zone.feature(features::POWER), "off")
            .await?;
        Ok(())
    }

    pub async fn set_mute(&self, mute: bool) -> Result<()> {
        self.session
            .set(
                &self.zone.feature(features::MUTE),
                if mute { "on" } else { "off" },
            )
            .await?;
        Ok(())
    }

    /// Set absolute volume from a 0.0-1.0 fraction
    ///
    /// The wire encoding follows the configured display mode.
    pub async fn set_volume_level(&self, fraction: f32) -> Result<()> {
        match self.volume_mode {
            VolumeDisplayMode::Step => {
                self.session
                    .set(
                        &self.zone.feature(features::VOLUME_STEP),
                        fraction_to_step(fraction),
                    )
                    .await?;
            }
            VolumeDisplayMode::Decibel => {
                self.session
                    .set(
                        &self.zone.feature(features::VOLUME_DB),
                        fraction_to_db(fraction),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Nudge volume up one device step
    ///
    /// Sent as a pulse on the dedicated increment feature; the device picks
    /// the new level and reports it back through a notification.
    pub async fn volume_up(&self) -> Result<()> {
        self.session
            .set(&self.zone.feature(features::VOLUME_UP), features::PULSE)
            .await?;
        Ok(())
    }

    /// Nudge volume down one device step
    pub async fn volume_down(&self) -> Result<()> {
        self.session
            .set(&self.zone.feature(features::VOLUME_DOWN), features::PULSE)
            .await?;
        Ok(())
    }

    /// Select an input source by display name
    ///
    /// On secondary zones the synthetic `MAIN SOURCE` name reads the main
    /// zone's current input and forwards that token unchanged. Unknown names
    /// are logged and send nothing.
    pub async fn select_source(&self, source: &str) -> Result<()> {
        let command = if source == vocab::FOLLOW_MAIN && self.zone.is_secondary() {
            match self
                .session
                .get(&Zone::Main.feature(features::INPUT))
                .await?
            {
                Some(value) => {
                    tracing::debug!(
                        "Zone {} following main zone input '{}'",
                        self.zone,
                        value
                    );
                    Some(value.to_string())
                }
                None => {
                    tracing::warn!(
                        "Main zone input unreadable, cannot follow it from zone {}",
                        self.zone
                    );
                    None
                }
            }
        } else {
            vocab::source_command(source).map(String::from)
        };

        match command {
            Some(token) => {
                self.session
                    .set(&self.zone.feature(features::INPUT), token)
                    .await?;
            }
            None => {
                tracing::warn!("Unknown source '{}' selected for zone {}", source, self.zone);
            }
        }
        Ok(())
    }

    /// Select a sound mode by display name
    ///
    /// The sound field is unit-global; the command is not zone-prefixed.
    /// Unknown names are logged and send nothing.
    pub async fn select_sound_mode(&self, mode: &str) -> Result<()> {
        match vocab::sound_mode_command(mode) {
            Some(token) => {
                self.session.set(features::SOUND_FIELD, token).await?;
            }
            None => {
                tracing::warn!("Unsupported sound mode '{}'", mode);
            }
        }
        Ok(())
    }
}
