//! Scripted in-memory client for tests
//!
//! `MockFeatureClient` stands in for a wire implementation: feature reads are
//! answered from a primed map, failures are scripted per call, outbound
//! writes are recorded for assertions, and notifications are injected by the
//! test through the registered callback.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;

use crate::client::{FeatureClient, NotificationCallback};
use crate::error::{ClientError, Result};
use crate::notification::Notification;
use crate::value::FeatureValue;

use async_trait::async_trait;

/// In-memory `FeatureClient` with scripted behavior
#[derive(Default)]
pub struct MockFeatureClient {
    features: Mutex<HashMap<String, FeatureValue>>,
    connected: AtomicBool,
    /// Remaining connect attempts to fail; `u32::MAX` means fail forever
    connect_failures: AtomicU32,
    connect_calls: AtomicU32,
    get_failures: Mutex<HashMap<String, VecDeque<ClientError>>>,
    writes: Mutex<Vec<(String, FeatureValue)>>,
    callback: Mutex<Option<NotificationCallback>>,
}

impl MockFeatureClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with readable features already primed
    pub fn with_features<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FeatureValue>,
    {
        let mock = Self::new();
        for (key, value) in entries {
            mock.prime_feature(key, value);
        }
        mock
    }

    /// Make a feature readable (or change its value)
    pub fn prime_feature(&self, key: impl Into<String>, value: impl Into<FeatureValue>) {
        self.features.lock().insert(key.into(), value.into());
    }

    /// Fail the next `n` connect attempts with a connection error
    pub fn fail_next_connects(&self, n: u32) {
        self.connect_failures.store(n, Ordering::SeqCst);
    }

    /// Fail every connect attempt from now on
    pub fn fail_all_connects(&self) {
        self.connect_failures.store(u32::MAX, Ordering::SeqCst);
    }

    /// Number of times `connect` has been called
    pub fn connect_calls(&self) -> u32 {
        self.connect_calls.load(Ordering::SeqCst)
    }

    /// Queue an error for the next read of `key`
    pub fn fail_next_get(&self, key: impl Into<String>, error: ClientError) {
        self.get_failures
            .lock()
            .entry(key.into())
            .or_default()
            .push_back(error);
    }

    /// All recorded `set_feature` calls, oldest first
    pub fn set_calls(&self) -> Vec<(String, FeatureValue)> {
        self.writes.lock().clone()
    }

    /// The most recent `set_feature` call
    pub fn last_set(&self) -> Option<(String, FeatureValue)> {
        self.writes.lock().last().cloned()
    }

    /// Flip the liveness flag without going through `connect`
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Whether a notification consumer has been registered
    pub fn has_callback(&self) -> bool {
        self.callback.lock().is_some()
    }

    /// Deliver a notification to the registered consumer
    ///
    /// Silently dropped when no consumer is registered, matching a real
    /// transport receiving a push frame before registration.
    pub fn notify(&self, note: Notification) {
        if let Some(cb) = self.callback.lock().as_ref() {
            cb(note);
        }
    }
}

#[async_trait]
impl FeatureClient for MockFeatureClient {
    async fn connect(&self) -> Result<bool> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.connect_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != u32::MAX {
                self.connect_failures.store(remaining - 1, Ordering::SeqCst);
            }
            return Err(ClientError::Connection {
                host: "mock".to_string(),
                port: 0,
                message: "scripted failure".to_string(),
            });
        }

        self.connected.store(true, Ordering::SeqCst);
        Ok(true)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn get_feature(&self, key: &str) -> Result<Option<FeatureValue>> {
        if let Some(queue) = self.get_failures.lock().get_mut(key) {
            if let Some(error) = queue.pop_front() {
                return Err(error);
            }
        }
        Ok(self.features.lock().get(key).cloned())
    }

    async fn set_feature(&self, key: &str, value: FeatureValue) -> Result<()> {
        self.writes
            .lock()
            .push((key.to_string(), value.clone()));
        self.features.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn register_notification_callback(&self, callback: NotificationCallback) {
        *self.callback.lock() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_primed_features_are_readable() {
        let mock = MockFeatureClient::with_features([("main.power", "on")]);
        let value = mock.get_feature("main.power").await.unwrap();
        assert_eq!(value, Some(FeatureValue::from("on")));
        assert_eq!(mock.get_feature("main.input").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scripted_connect_failures_then_success() {
        let mock = MockFeatureClient::new();
        mock.fail_next_connects(2);

        assert!(mock.connect().await.is_err());
        assert!(mock.connect().await.is_err());
        assert!(mock.connect().await.unwrap());
        assert!(mock.is_connected());
        assert_eq!(mock.connect_calls(), 3);
    }

    #[tokio::test]
    async fn test_set_calls_are_recorded() {
        let mock = MockFeatureClient::new();
        mock.set_feature("zone2.input", FeatureValue::from("bd"))
            .await
            .unwrap();

        assert_eq!(
            mock.last_set(),
            Some(("zone2.input".to_string(), FeatureValue::from("bd")))
        );
    }

    #[tokio::test]
    async fn test_notify_reaches_registered_callback() {
        let mock = MockFeatureClient::new();
        let (tx, rx) = std::sync::mpsc::channel();
        mock.register_notification_callback(Box::new(move |note| {
            let _ = tx.send(note);
        }));

        mock.notify(Notification::new("main.mute", "on"));
        let note = rx.recv().unwrap();
        assert_eq!(note.feature, "main.mute");
    }
}
