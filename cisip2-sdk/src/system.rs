//! Receiver system composition
//!
//! `ReceiverSystem` is the context object the embedding platform creates at
//! startup and drops at teardown. It wires the shared pieces together —
//! session, identity, zone stores, notification router, liveness supervisor
//! — and hands out per-zone controllers. Nothing in the SDK reaches for
//! globals; everything flows through this object.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use cisip_client::{FeatureClient, Zone};
use cisip_session::{
    DeviceIdentity, PresenceRegistry, ReceiverSession, ReconnectListener, SessionConfig,
    SessionError, SessionSupervisor,
};
use cisip_state::NotificationRouter;

use crate::controller::ZoneController;
use crate::error::{Result, SdkError};
use crate::volume::VolumeDisplayMode;

/// Configuration for a receiver system
pub struct SystemConfig {
    /// Retry/backoff and liveness settings
    pub session: SessionConfig,
    /// Wire encoding for absolute volume commands
    pub volume_mode: VolumeDisplayMode,
    /// Optional fallback MAC lookup for degraded identity resolution
    pub presence: Option<Arc<dyn PresenceRegistry>>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            volume_mode: VolumeDisplayMode::default(),
            presence: None,
        }
    }
}

/// Re-primes zone state after the liveness loop repairs a drop
///
/// State projected before the outage is stale by an unknown amount; a full
/// re-read is the only way to resynchronize, since notifications sent while
/// disconnected are gone.
struct StateRefresher {
    client: Arc<dyn FeatureClient>,
    router: Arc<NotificationRouter>,
}

#[async_trait]
impl ReconnectListener for StateRefresher {
    async fn on_reconnected(&self) {
        tracing::info!("Session re-established, re-reading zone state");
        for zone in Zone::ALL {
            if let Some(store) = self.router.store(zone) {
                store.initialize(self.client.as_ref()).await;
            }
        }
    }
}

/// A fully wired receiver: session, state, routing, supervision
///
/// # Example
///
/// ```rust,ignore
/// use cisip2_sdk::{ReceiverSystem, SystemConfig, Zone};
///
/// let system = ReceiverSystem::connect(client, "10.0.0.40", 33336, SystemConfig::default())
///     .await?;
///
/// let zone2 = system.controller(Zone::Zone2)?;
/// zone2.turn_on().await?;
/// zone2.select_source("MAIN SOURCE").await?;
///
/// system.shutdown().await?;
/// ```
pub struct ReceiverSystem {
    session: Arc<ReceiverSession>,
    identity: DeviceIdentity,
    router: Arc<NotificationRouter>,
    controllers: HashMap<Zone, ZoneController>,
    supervisor: Option<SessionSupervisor>,
}

impl ReceiverSystem {
    /// Connect to a receiver and bring the whole system up
    ///
    /// Performs the initial connect with retry, resolves device identity,
    /// registers the notification consumer, bulk-reads all three zones, and
    /// starts the liveness supervisor. Exhausted connect retries return
    /// [`SessionError::ConnectFailed`] wrapped in [`SdkError::Session`] with
    /// no background task left running; the embedder may try again later.
    pub async fn connect(
        client: Arc<dyn FeatureClient>,
        host: impl Into<String>,
        port: u16,
        config: SystemConfig,
    ) -> Result<Self> {
        let session = Arc::new(ReceiverSession::new(Arc::clone(&client), host, port));

        if !session
            .connect_with_retry(
                config.session.max_connect_attempts,
                config.session.retry_backoff_base,
            )
            .await
        {
            return Err(SdkError::Session(SessionError::ConnectFailed {
                host: session.host().to_string(),
                port: session.port(),
                attempts: config.session.max_connect_attempts,
            }));
        }

        let identity = cisip_session::identity::resolve_identity(
            &session,
            &config.session,
            config.presence.as_deref(),
        )
        .await;
        tracing::info!(
            "Set up {} ({}, firmware {})",
            identity.device_name(),
            identity.hardware_model,
            identity.software_version.as_deref().unwrap_or("unknown")
        );

        let router = Arc::new(NotificationRouter::with_all_zones());

        // Register before the bulk read so no notification falls in a gap.
        session.register_notification_callback(router.callback());

        for zone in Zone::ALL {
            if let Some(store) = router.store(zone) {
                store.initialize(client.as_ref()).await;
            }
        }

        let refresher = Arc::new(StateRefresher {
            client: Arc::clone(&client),
            router: Arc::clone(&router),
        });
        let supervisor = SessionSupervisor::start(
            Arc::clone(&session),
            config.session.clone(),
            Some(refresher as Arc<dyn ReconnectListener>),
        );

        let controllers = Zone::ALL
            .iter()
            .filter_map(|&zone| {
                router.store(zone).map(|store| {
                    (
                        zone,
                        ZoneController::new(
                            zone,
                            Arc::clone(&session),
                            Arc::clone(store),
                            identity.clone(),
                            config.volume_mode,
                        ),
                    )
                })
            })
            .collect();

        Ok(Self {
            session,
            identity,
            router,
            controllers,
            supervisor: Some(supervisor),
        })
    }

    /// Controller for a zone
    pub fn controller(&self, zone: Zone) -> Result<&ZoneController> {
        self.controllers
            .get(&zone)
            .ok_or(SdkError::ZoneUnavailable(zone))
    }

    /// All zone controllers, in zone order
    pub fn controllers(&self) -> impl Iterator<Item = &ZoneController> + '_ {
        Zone::ALL
            .iter()
            .filter_map(|zone| self.controllers.get(zone))
    }

    /// Device identity resolved at startup
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Whether the session is currently believed healthy
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// The notification router (primarily for advanced embedders)
    pub fn router(&self) -> &Arc<NotificationRouter> {
        &self.router
    }

    /// Tear down the system as a unit
    ///
    /// Cancels the liveness supervisor, including any in-flight reconnect
    /// retry loop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.shutdown().await?;
        }
        Ok(())
    }
}
