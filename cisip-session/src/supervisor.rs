//! Background liveness supervision
//!
//! The supervisor runs a single background task that wakes on a fixed
//! interval, reads the session's connectivity, and repairs the connection
//! when it has dropped. Steady state is cheap: a connected session costs one
//! flag read per tick and no device traffic. The task runs until shutdown
//! and never terminates on its own — a failed reconnect is simply retried at
//! the next tick.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::session::ReceiverSession;

/// Notified after the liveness loop re-establishes a dropped session
///
/// Zone state read during the outage is stale; the listener's job is to
/// re-prime it from the device.
#[async_trait]
pub trait ReconnectListener: Send + Sync {
    async fn on_reconnected(&self);
}

/// Supervisor for the session liveness loop
///
/// # Shutdown
///
/// [`shutdown`](Self::shutdown) signals the background task and waits up to
/// 5 seconds for it to finish; an in-flight reconnect retry is cancelled as
/// part of the task.
pub struct SessionSupervisor {
    background_task: Option<JoinHandle<()>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl SessionSupervisor {
    /// Start the liveness loop for a session
    pub fn start(
        session: Arc<ReceiverSession>,
        config: SessionConfig,
        listener: Option<Arc<dyn ReconnectListener>>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let background_task = tokio::spawn(Self::liveness_task(
            session,
            config,
            listener,
            shutdown_rx,
        ));

        Self {
            background_task: Some(background_task),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Stop the liveness loop
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(()).await;
        }

        if let Some(task) = self.background_task.take() {
            match timeout(Duration::from_secs(5), task).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(SessionError::Shutdown(format!(
                    "Liveness task panicked: {e}"
                ))),
                Err(_) => Err(SessionError::Shutdown(
                    "Liveness task shutdown timed out after 5 seconds".to_string(),
                )),
            }
        } else {
            Ok(())
        }
    }

    async fn liveness_task(
        session: Arc<ReceiverSession>,
        config: SessionConfig,
        listener: Option<Arc<dyn ReconnectListener>>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut check_interval = interval(config.liveness_interval);
        tracing::debug!(
            "Liveness loop started for {}:{} (interval {:?})",
            session.host(),
            session.port(),
            config.liveness_interval
        );

        loop {
            tokio::select! {
                _ = check_interval.tick() => {
                    Self::check_session(&session, &config, listener.as_deref()).await;
                }
                _ = shutdown_rx.recv() => {
                    tracing::debug!("Liveness loop shutting down");
                    break;
                }
            }
        }
    }

    async fn check_session(
        session: &Arc<ReceiverSession>,
        config: &SessionConfig,
        listener: Option<&dyn ReconnectListener>,
    ) {
        if session.transport_connected() {
            session.mark_connected(true);
            return;
        }

        session.mark_connected(false);
        tracing::warn!(
            "Connection to {}:{} lost, attempting to re-establish",
            session.host(),
            session.port()
        );

        if session
            .connect_with_retry(config.max_connect_attempts, config.retry_backoff_base)
            .await
        {
            if let Some(listener) = listener {
                listener.on_reconnected().await;
            }
        } else {
            tracing::warn!(
                "Reconnect to {}:{} failed, will retry at next liveness check",
                session.host(),
                session.port()
            );
        }
    }
}

impl Drop for SessionSupervisor {
    fn drop(&mut self) {
        // Best effort when shutdown() was never awaited.
        if let Some(task) = self.background_task.take() {
            task.abort();
        }
    }
}
