//! Device identity resolution
//!
//! Identity is resolved once at startup and cached for the life of the
//! session: the MAC address (the stable identifier the embedder keys the
//! device on), the hardware model translated to its marketing name, and the
//! firmware version string.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use cisip_client::features;

use crate::config::SessionConfig;
use crate::session::ReceiverSession;

/// Model code reported on `system.modeltype` mapped to the marketing name
pub const MODEL_NAMES: &[(&str, &str)] = &[
    ("Z11", "STR-ZA1100ES"),
    ("Z21", "STR-ZA2100ES"),
    ("Z31", "STR-ZA3100ES"),
];

/// Marketing name used when the model code is unknown or unreadable
pub const FALLBACK_MODEL: &str = "STR-ZAxx00ES";

/// Translate a model code to its marketing name
pub fn marketing_name(code: &str) -> &'static str {
    MODEL_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(FALLBACK_MODEL)
}

/// Fallback MAC lookup against a network-presence registry
///
/// Consulted only when the device refuses to report its own MAC. Lookups are
/// keyed by host address and are best-effort: the answer races with DHCP
/// lease changes and carries no consistency guarantee.
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    async fn mac_for_host(&self, host: &str) -> Option<String>;
}

/// Stable identity of a receiver, resolved once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// MAC address as reported by the device, `None` in degraded setups
    pub mac_address: Option<String>,
    /// Marketing model name (e.g. `STR-ZA2100ES`)
    pub hardware_model: String,
    /// Firmware version string
    pub software_version: Option<String>,
}

impl DeviceIdentity {
    /// MAC normalized for use in identifiers: lowercase, colons stripped
    pub fn mac_for_id(&self) -> Option<String> {
        self.mac_address
            .as_ref()
            .map(|mac| mac.replace(':', "").to_lowercase())
    }

    /// Display name for the device
    pub fn device_name(&self) -> String {
        match self.mac_for_id() {
            Some(mac) => format!("Sony Receiver {}", mac),
            None => "Sony Receiver MISSINGMAC".to_string(),
        }
    }

    /// Unique identifier for one zone of this device
    pub fn zone_unique_id(&self, zone: cisip_client::Zone) -> String {
        let mac = self
            .mac_for_id()
            .unwrap_or_else(|| "MISSINGMAC".to_string());
        format!("cisip2_{}_{}", mac, zone)
    }
}

/// Resolve identity through the session, degrading instead of failing
///
/// The MAC read uses the full retry budget; if the device still refuses, the
/// presence registry is consulted, and if that also comes up empty the
/// identity is returned unidentified. Model and version reads are one-shot —
/// they are cosmetic and the fallbacks are acceptable.
pub async fn resolve_identity(
    session: &ReceiverSession,
    config: &SessionConfig,
    presence: Option<&dyn PresenceRegistry>,
) -> DeviceIdentity {
    let mut mac_address = session
        .fetch_with_retry(
            features::MAC_ADDRESS,
            config.max_connect_attempts,
            config.retry_backoff_base,
        )
        .await
        .and_then(|v| v.as_str().map(String::from));

    if mac_address.is_none() {
        tracing::warn!(
            "Device at {} did not report a MAC address, consulting presence registry",
            session.host()
        );
        if let Some(presence) = presence {
            mac_address = presence.mac_for_host(session.host()).await;
        }
    }

    if mac_address.is_none() {
        tracing::warn!(
            "No MAC address for {}, continuing with unidentified device",
            session.host()
        );
    }

    let hardware_model = match session.get(features::MODEL_TYPE).await {
        Ok(Some(code)) => marketing_name(&code.to_string()).to_string(),
        _ => FALLBACK_MODEL.to_string(),
    };

    let software_version = session
        .get(features::VERSION)
        .await
        .ok()
        .flatten()
        .map(|v| v.to_string());

    DeviceIdentity {
        mac_address,
        hardware_model,
        software_version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cisip_client::MockFeatureClient;

    #[test]
    fn test_marketing_name_lookup() {
        assert_eq!(marketing_name("Z11"), "STR-ZA1100ES");
        assert_eq!(marketing_name("Z21"), "STR-ZA2100ES");
        assert_eq!(marketing_name("Z99"), "STR-ZAxx00ES");
    }

    #[test]
    fn test_device_naming() {
        let identity = DeviceIdentity {
            mac_address: Some("AA:BB:CC:DD:EE:FF".to_string()),
            hardware_model: "STR-ZA2100ES".to_string(),
            software_version: None,
        };
        assert_eq!(identity.device_name(), "Sony Receiver aabbccddeeff");
        assert_eq!(
            identity.zone_unique_id(cisip_client::Zone::Zone2),
            "cisip2_aabbccddeeff_zone2"
        );
    }

    #[test]
    fn test_device_naming_degraded() {
        let identity = DeviceIdentity {
            mac_address: None,
            hardware_model: FALLBACK_MODEL.to_string(),
            software_version: None,
        };
        assert_eq!(identity.device_name(), "Sony Receiver MISSINGMAC");
    }

    struct FixedPresence(&'static str);

    #[async_trait]
    impl PresenceRegistry for FixedPresence {
        async fn mac_for_host(&self, _host: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_resolve_identity_from_device() {
        let mock = Arc::new(MockFeatureClient::with_features([
            ("network.macaddress", "AA:BB:CC:00:11:22"),
            ("system.modeltype", "Z31"),
            ("system.version", "1.402"),
        ]));
        let session = ReceiverSession::new(mock, "10.0.0.40", 33336);

        let identity = resolve_identity(&session, &SessionConfig::default(), None).await;
        assert_eq!(identity.mac_address.as_deref(), Some("AA:BB:CC:00:11:22"));
        assert_eq!(identity.hardware_model, "STR-ZA3100ES");
        assert_eq!(identity.software_version.as_deref(), Some("1.402"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_identity_falls_back_to_presence() {
        let mock = Arc::new(MockFeatureClient::new());
        let session = ReceiverSession::new(mock, "10.0.0.40", 33336);
        let presence = FixedPresence("aa:bb:cc:dd:ee:00");

        let identity =
            resolve_identity(&session, &SessionConfig::default(), Some(&presence)).await;
        assert_eq!(identity.mac_address.as_deref(), Some("aa:bb:cc:dd:ee:00"));
        assert_eq!(identity.hardware_model, FALLBACK_MODEL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_identity_degrades_without_mac() {
        let mock = Arc::new(MockFeatureClient::new());
        let session = ReceiverSession::new(mock, "10.0.0.40", 33336);

        let identity = resolve_identity(&session, &SessionConfig::default(), None).await;
        assert!(identity.mac_address.is_none());
        assert_eq!(identity.device_name(), "Sony Receiver MISSINGMAC");
    }
}
