//! Saved-route store port
//!
//! Append-only route history over a key-value JSON collaborator. The store
//! assigns ids and creation timestamps at write time; callers never supply
//! them. Listing returns newest first.

use async_trait::async_trait;
use domain::entities::{NewSavedRoute, SavedRoute};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisting and listing saved routes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RouteStorePort: Send + Sync {
    /// All saved routes, newest first
    async fn list(&self) -> Result<Vec<SavedRoute>, ApplicationError>;

    /// Persist a new route, assigning its id and creation timestamp
    async fn add(&self, route: NewSavedRoute) -> Result<SavedRoute, ApplicationError>;

    /// Delete a route by id; returns whether it existed
    async fn remove(&self, id: &str) -> Result<bool, ApplicationError>;
}
