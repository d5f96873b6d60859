//! The shared receiver session
//!
//! One `ReceiverSession` exists per physical receiver. It owns the feature
//! client handle and the connectivity flag; consumers (zone stores, zone
//! controllers) hold an `Arc` and use the narrow `get`/`set` surface. Only
//! supervision code paths mutate the connectivity flag — the session
//! identity survives reconnects even though the transport underneath is
//! repaired.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use cisip_client::{ClientError, FeatureClient, FeatureValue, NotificationCallback};

use crate::error::Result;

/// Shared control session to a single receiver
pub struct ReceiverSession {
    client: Arc<dyn FeatureClient>,
    host: String,
    port: u16,
    /// Supervisor-owned connectivity flag; consumers read it via
    /// [`is_connected`](Self::is_connected)
    connected: AtomicBool,
}

impl ReceiverSession {
    /// Create a session around an unconnected client
    pub fn new(client: Arc<dyn FeatureClient>, host: impl Into<String>, port: u16) -> Self {
        Self {
            client,
            host: host.into(),
            port,
            connected: AtomicBool::new(false),
        }
    }

    /// Host the session targets
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Control port the session targets
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the session is currently believed healthy
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// The transport's own liveness flag
    ///
    /// Non-blocking read, not a probe. The liveness loop uses this to notice
    /// drops the supervisor has not recorded yet.
    pub(crate) fn transport_connected(&self) -> bool {
        self.client.is_connected()
    }

    pub(crate) fn mark_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Attempt connection with exponential backoff
    ///
    /// Tries up to `max_attempts` times, waiting `initial_delay` after the
    /// first failure and doubling the wait after each subsequent one. Client
    /// errors are logged and counted as failed attempts; this method never
    /// returns an error itself.
    pub async fn connect_with_retry(&self, max_attempts: u32, initial_delay: Duration) -> bool {
        let mut delay = initial_delay;

        for attempt in 1..=max_attempts {
            match self.client.connect().await {
                Ok(true) => {
                    self.mark_connected(true);
                    tracing::info!(
                        "Connected to {}:{} on attempt {}/{}",
                        self.host,
                        self.port,
                        attempt,
                        max_attempts
                    );
                    return true;
                }
                Ok(false) => {
                    tracing::warn!(
                        "Connect to {}:{} refused (attempt {}/{})",
                        self.host,
                        self.port,
                        attempt,
                        max_attempts
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Connect to {}:{} failed (attempt {}/{}): {}",
                        self.host,
                        self.port,
                        attempt,
                        max_attempts,
                        e
                    );
                }
            }

            sleep(delay).await;
            delay *= 2;
        }

        self.mark_connected(false);
        false
    }

    /// Read a feature with the same backoff policy as connect
    ///
    /// Used for identity-critical reads at startup. A cancelled in-flight
    /// read counts as a transient failure and is retried, not propagated.
    /// Returns `None` once the retry budget is exhausted.
    pub async fn fetch_with_retry(
        &self,
        key: &str,
        max_attempts: u32,
        initial_delay: Duration,
    ) -> Option<FeatureValue> {
        let mut delay = initial_delay;

        for attempt in 1..=max_attempts {
            match self.client.get_feature(key).await {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {
                    tracing::warn!(
                        "Feature {} unreadable (attempt {}/{})",
                        key,
                        attempt,
                        max_attempts
                    );
                }
                Err(ClientError::Cancelled) => {
                    tracing::warn!(
                        "Read of {} cancelled in flight (attempt {}/{}), retrying",
                        key,
                        attempt,
                        max_attempts
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Read of {} failed (attempt {}/{}): {}",
                        key,
                        attempt,
                        max_attempts,
                        e
                    );
                }
            }

            sleep(delay).await;
            delay *= 2;
        }

        None
    }

    /// Read a feature once, without retry
    pub async fn get(&self, key: &str) -> Result<Option<FeatureValue>> {
        Ok(self.client.get_feature(key).await?)
    }

    /// Write a feature
    pub async fn set(&self, key: &str, value: impl Into<FeatureValue>) -> Result<()> {
        Ok(self.client.set_feature(key, value.into()).await?)
    }

    /// Register the single push-stream consumer with the transport
    pub fn register_notification_callback(&self, callback: NotificationCallback) {
        self.client.register_notification_callback(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cisip_client::MockFeatureClient;
    use tokio::time::Instant;

    fn session(mock: Arc<MockFeatureClient>) -> ReceiverSession {
        ReceiverSession::new(mock, "10.0.0.40", 33336)
    }

    #[tokio::test]
    async fn test_connect_succeeds_first_attempt() {
        let mock = Arc::new(MockFeatureClient::new());
        let session = session(Arc::clone(&mock));

        assert!(
            session
                .connect_with_retry(3, Duration::from_secs(2))
                .await
        );
        assert!(session.is_connected());
        assert_eq!(mock.connect_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_retry_exhausts_after_max_attempts() {
        let mock = Arc::new(MockFeatureClient::new());
        mock.fail_all_connects();
        let session = session(Arc::clone(&mock));

        let start = Instant::now();
        let connected = session
            .connect_with_retry(3, Duration::from_secs(2))
            .await;

        // 2s + 4s + 8s of backoff, exactly three attempts, no panic.
        assert!(!connected);
        assert!(!session.is_connected());
        assert_eq!(mock.connect_calls(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(14));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_recovers_mid_retry() {
        let mock = Arc::new(MockFeatureClient::new());
        mock.fail_next_connects(2);
        let session = session(Arc::clone(&mock));

        assert!(
            session
                .connect_with_retry(3, Duration::from_secs(2))
                .await
        );
        assert_eq!(mock.connect_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_retries_cancelled_read() {
        let mock = Arc::new(MockFeatureClient::with_features([(
            "network.macaddress",
            "AA:BB:CC:DD:EE:FF",
        )]));
        mock.fail_next_get("network.macaddress", ClientError::Cancelled);
        let session = session(Arc::clone(&mock));

        let value = session
            .fetch_with_retry("network.macaddress", 3, Duration::from_secs(2))
            .await;
        assert_eq!(
            value.and_then(|v| v.as_str().map(String::from)),
            Some("AA:BB:CC:DD:EE:FF".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_returns_none_when_exhausted() {
        let mock = Arc::new(MockFeatureClient::new());
        let session = session(Arc::clone(&mock));

        let value = session
            .fetch_with_retry("network.macaddress", 2, Duration::from_secs(2))
            .await;
        assert!(value.is_none());
    }
}
