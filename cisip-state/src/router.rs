//! Notification routing
//!
//! The device delivers every push event on one stream, regardless of zone.
//! The router is that stream's single registered consumer: it parses the
//! zone prefix off each feature key and hands the event to the owning store
//! with one map lookup. Events for zones nobody registered — including
//! unit-global keys like `audio.soundfield` — are dropped, not errors.

use std::collections::HashMap;
use std::sync::Arc;

use cisip_client::{Notification, NotificationCallback, Zone};

use crate::store::ZoneStateStore;

/// Demultiplexes the push stream to per-zone stores
pub struct NotificationRouter {
    stores: HashMap<Zone, Arc<ZoneStateStore>>,
}

impl NotificationRouter {
    /// Build a router over the given stores
    pub fn new(stores: impl IntoIterator<Item = Arc<ZoneStateStore>>) -> Self {
        Self {
            stores: stores
                .into_iter()
                .map(|store| (store.zone(), store))
                .collect(),
        }
    }

    /// Build a router with fresh stores for all three zones
    pub fn with_all_zones() -> Self {
        Self::new(Zone::ALL.map(|zone| Arc::new(ZoneStateStore::new(zone))))
    }

    /// The store registered for a zone
    pub fn store(&self, zone: Zone) -> Option<&Arc<ZoneStateStore>> {
        self.stores.get(&zone)
    }

    /// Route one event to its owning store
    pub fn on_notification(&self, note: Notification) {
        match Zone::split(&note.feature) {
            Some((zone, _)) => match self.stores.get(&zone) {
                Some(store) => store.apply_notification(&note),
                None => {
                    tracing::trace!("No store registered for zone {}, dropping event", zone);
                }
            },
            None => {
                tracing::trace!("Dropping notification for non-zone feature {}", note.feature);
            }
        }
    }

    /// Package the router as the client's notification callback
    pub fn callback(self: &Arc<Self>) -> NotificationCallback {
        let router = Arc::clone(self);
        Box::new(move |note| router.on_notification(note))
    }
}
