//! Community warning flow
//!
//! Users pin safety warnings to an address or raw coordinates. The input
//! text goes through the geocoder first; when that fails the text is
//! re-read as a bare "lat, lng" pair before giving up.

use std::sync::Arc;

use domain::entities::{CommunityMarker, MarkerTag, NewCommunityMarker};
use domain::value_objects::Coordinate;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, MarkerStorePort};

/// Minimum length for the location text of a warning.
const MIN_LOCATION_LEN: usize = 3;

/// Creates and lists community safety markers
pub struct WarningService {
    geocoder: Arc<dyn GeocodingPort>,
    markers: Arc<dyn MarkerStorePort>,
}

impl std::fmt::Debug for WarningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarningService").finish_non_exhaustive()
    }
}

impl WarningService {
    /// Create a warning service over the given ports
    pub fn new(geocoder: Arc<dyn GeocodingPort>, markers: Arc<dyn MarkerStorePort>) -> Self {
        Self { geocoder, markers }
    }

    /// Report a warning at an address or "lat, lng" text
    ///
    /// # Errors
    ///
    /// `Domain` validation error for too-short text, `GeocodeFailed` when
    /// neither geocoding nor coordinate parsing can place the warning.
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        tag: MarkerTag,
        location_text: &str,
        description: Option<String>,
    ) -> Result<CommunityMarker, ApplicationError> {
        let text = location_text.trim();
        if text.len() < MIN_LOCATION_LEN {
            return Err(domain::DomainError::ValidationError(
                "warning location must be at least 3 characters".to_string(),
            )
            .into());
        }

        let position = match self.geocoder.geocode(text).await {
            Ok(Some(position)) => position,
            // Geocoding came up empty or errored; the text may be raw
            // coordinates, as typed from the GPS read-out.
            Ok(None) | Err(_) => {
                debug!(%text, "geocoding failed, trying raw coordinate parse");
                Coordinate::parse_pair(text).ok_or_else(|| {
                    ApplicationError::GeocodeFailed(format!(
                        "could not place a warning at '{text}'"
                    ))
                })?
            },
        };

        let marker = NewCommunityMarker {
            tag,
            position,
            description: description
                .unwrap_or_else(|| tag.default_description().to_string()),
            simulated: false,
        };

        let stored = self.markers.add(marker).await?;
        info!(id = %stored.id, tag = ?stored.tag, "warning reported");
        Ok(stored)
    }

    /// Markers within `radius_km` of a point, newest first
    ///
    /// # Errors
    ///
    /// Storage errors pass through.
    pub async fn nearby(
        &self,
        center: &Coordinate,
        radius_km: f64,
    ) -> Result<Vec<CommunityMarker>, ApplicationError> {
        let all = self.markers.list().await?;
        Ok(all
            .into_iter()
            .filter(|marker| marker.is_near(center, radius_km))
            .collect())
    }
}
