//! The `FeatureClient` trait

use async_trait::async_trait;

use crate::error::Result;
use crate::notification::Notification;
use crate::value::FeatureValue;

/// Callback invoked for every push notification until the session ends
pub type NotificationCallback = Box<dyn Fn(Notification) + Send + Sync>;

/// Opaque async transport to a CIS-IP2 device
///
/// Implementations own the socket, framing and request/response pairing; the
/// SDK only ever sees string-keyed features. A client serializes its own
/// request/response pairs internally, so callers may issue operations from
/// concurrent tasks without extra locking.
///
/// # Contract
///
/// - [`connect`](Self::connect) fails with a connection error on network
///   failure. It returns or errors in bounded time; it never hangs
///   indefinitely.
/// - [`is_connected`](Self::is_connected) is a readable liveness flag, not a
///   probe; it must not block.
/// - [`get_feature`](Self::get_feature) resolves to `None` for a feature the
///   device cannot read.
/// - [`register_notification_callback`](Self::register_notification_callback)
///   accepts exactly one consumer for the push stream; registering again
///   replaces the previous consumer.
#[async_trait]
pub trait FeatureClient: Send + Sync {
    /// Establish the control session
    async fn connect(&self) -> Result<bool>;

    /// Whether the transport currently believes it is connected
    fn is_connected(&self) -> bool;

    /// Read a feature, `None` if the device reports it unreadable
    async fn get_feature(&self, key: &str) -> Result<Option<FeatureValue>>;

    /// Write a feature
    async fn set_feature(&self, key: &str, value: FeatureValue) -> Result<()>;

    /// Register the single consumer for the push notification stream
    fn register_notification_callback(&self, callback: NotificationCallback);
}
