//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use integration_geocoding::{GeocodingClient, GeocodingError, NominatimClient};
use tracing::{debug, instrument, warn};

/// Adapter over the Nominatim client
pub struct GeocodingAdapter {
    client: NominatimClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter").finish_non_exhaustive()
    }
}

impl GeocodingAdapter {
    /// Wrap a Nominatim client
    #[must_use]
    pub fn new(client: NominatimClient) -> Self {
        Self { client }
    }

    fn map_error(err: &GeocodingError) -> ApplicationError {
        ApplicationError::GeocodeFailed(err.to_string())
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError> {
        match self.client.geocode(address).await {
            Ok(position) => {
                debug!(%address, %position, "address resolved");
                Ok(Some(position))
            },
            // An address with no match is a normal planning outcome,
            // not a service failure.
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => {
                warn!(%address, error = %err, "geocoding failed");
                Err(Self::map_error(&err))
            },
        }
    }
}
