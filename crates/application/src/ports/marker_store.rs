//! Community marker store port

use async_trait::async_trait;
use domain::entities::{CommunityMarker, NewCommunityMarker};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisting and listing community warnings
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarkerStorePort: Send + Sync {
    /// All markers, newest first
    async fn list(&self) -> Result<Vec<CommunityMarker>, ApplicationError>;

    /// Persist a new marker, assigning its id and creation timestamp
    async fn add(&self, marker: NewCommunityMarker) -> Result<CommunityMarker, ApplicationError>;
}
