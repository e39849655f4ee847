//! Community marker store
//!
//! Same shape as the route store: one newest-first JSON list under a
//! single key, writers serialized.

use async_trait::async_trait;
use application::ApplicationError;
use application::ports::MarkerStorePort;
use chrono::Utc;
use domain::entities::{CommunityMarker, NewCommunityMarker};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::persistence::key_value::KeyValueStore;

/// Storage key for the marker collection.
const MARKERS_KEY: &str = "saferoute:markers";

/// Sqlite-backed community marker store
#[derive(Debug)]
pub struct SqliteMarkerStore {
    kv: KeyValueStore,
    write_lock: Mutex<()>,
}

impl SqliteMarkerStore {
    /// Create a store over the key-value layer
    #[must_use]
    pub fn new(kv: KeyValueStore) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Vec<CommunityMarker>, ApplicationError> {
        self.kv
            .get::<Vec<CommunityMarker>>(MARKERS_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| ApplicationError::Storage(e.to_string()))
    }
}

#[async_trait]
impl MarkerStorePort for SqliteMarkerStore {
    async fn list(&self) -> Result<Vec<CommunityMarker>, ApplicationError> {
        self.read_all()
    }

    #[instrument(skip(self, marker), fields(tag = ?marker.tag))]
    async fn add(&self, marker: NewCommunityMarker) -> Result<CommunityMarker, ApplicationError> {
        let _guard = self.write_lock.lock().await;

        let mut markers = self.read_all()?;
        let stored = CommunityMarker::from_payload(marker, Uuid::new_v4().to_string(), Utc::now());
        markers.insert(0, stored.clone());
        self.kv
            .set(MARKERS_KEY, &markers)
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;

        info!(id = %stored.id, total = markers.len(), "marker persisted");
        Ok(stored)
    }
}
