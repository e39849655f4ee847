//! Saved-route store
//!
//! Keeps the whole route history as one newest-first JSON list under a
//! single key, read-modify-write. A per-store async lock serializes
//! writers so concurrent saves cannot lose updates.

use async_trait::async_trait;
use application::ApplicationError;
use application::ports::RouteStorePort;
use chrono::Utc;
use domain::entities::{NewSavedRoute, SavedRoute};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::persistence::key_value::KeyValueStore;

/// Storage key for the route collection.
const ROUTES_KEY: &str = "saferoute:routes";

/// Sqlite-backed saved-route store
#[derive(Debug)]
pub struct SqliteRouteStore {
    kv: KeyValueStore,
    write_lock: Mutex<()>,
}

impl SqliteRouteStore {
    /// Create a store over the key-value layer
    #[must_use]
    pub fn new(kv: KeyValueStore) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Vec<SavedRoute>, ApplicationError> {
        self.kv
            .get::<Vec<SavedRoute>>(ROUTES_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| ApplicationError::Storage(e.to_string()))
    }

    fn write_all(&self, routes: &[SavedRoute]) -> Result<(), ApplicationError> {
        self.kv
            .set(ROUTES_KEY, &routes)
            .map_err(|e| ApplicationError::Storage(e.to_string()))
    }
}

#[async_trait]
impl RouteStorePort for SqliteRouteStore {
    async fn list(&self) -> Result<Vec<SavedRoute>, ApplicationError> {
        self.read_all()
    }

    #[instrument(skip(self, route), fields(name = %route.name))]
    async fn add(&self, route: NewSavedRoute) -> Result<SavedRoute, ApplicationError> {
        let _guard = self.write_lock.lock().await;

        let mut routes = self.read_all()?;
        let stored = SavedRoute::from_payload(route, Uuid::new_v4().to_string(), Utc::now());
        routes.insert(0, stored.clone());
        self.write_all(&routes)?;

        info!(id = %stored.id, total = routes.len(), "route persisted");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> Result<bool, ApplicationError> {
        let _guard = self.write_lock.lock().await;

        let mut routes = self.read_all()?;
        let before = routes.len();
        routes.retain(|route| route.id != id);
        if routes.len() == before {
            return Ok(false);
        }
        self.write_all(&routes)?;
        info!(%id, "route deleted");
        Ok(true)
    }
}
