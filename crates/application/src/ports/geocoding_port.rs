//! Geocoding port
//!
//! Resolves free address text into coordinates. The planning flow treats
//! "nothing matched" as a normal outcome, distinct from the service being
//! unreachable.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address-to-coordinate resolution
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address to coordinates
    ///
    /// Returns `Ok(None)` when the geocoder found no match for the text.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError>;
}
