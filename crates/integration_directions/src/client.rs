//! Google Directions client

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::DirectionsError;

/// The first candidate route, reduced to what the gateway forwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRoute {
    /// Encoded overview polyline
    pub polyline: String,
    /// First-leg distance text, e.g. "5.2 km"
    pub distance_text: String,
    /// First-leg duration text, e.g. "12 mins"
    pub duration_text: String,
}

/// Trait for directions provider clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Request a walking route between two coordinate pairs
    async fn walking_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<ProviderRoute, DirectionsError>;
}

/// Google Directions API client
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: DirectionsConfig,
}

impl GoogleDirectionsClient {
    /// Create a new directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DirectionsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Reduce the raw provider response to the first route's essentials
    fn extract_route(raw: &RawDirectionsResponse) -> Result<ProviderRoute, DirectionsError> {
        if raw.status == "ZERO_RESULTS" || raw.routes.is_empty() {
            return Err(DirectionsError::NoRouteFound);
        }
        if raw.status != "OK" {
            return Err(DirectionsError::ProviderStatus(raw.status.clone()));
        }

        let route = &raw.routes[0];
        let leg = route
            .legs
            .first()
            .ok_or_else(|| DirectionsError::ParseError("route has no legs".to_string()))?;

        Ok(ProviderRoute {
            polyline: route.overview_polyline.points.clone(),
            distance_text: leg.distance.text.clone(),
            duration_text: leg.duration.text.clone(),
        })
    }
}

#[async_trait]
impl DirectionsClient for GoogleDirectionsClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn walking_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<ProviderRoute, DirectionsError> {
        let Some(ref api_key) = self.config.api_key else {
            warn!("directions API key is not configured");
            return Err(DirectionsError::MissingApiKey);
        };

        let url = format!("{}/maps/api/directions/json", self.config.base_url);
        let params = [
            (
                "origin",
                format!("{},{}", origin.latitude(), origin.longitude()),
            ),
            (
                "destination",
                format!("{},{}", destination.latitude(), destination.longitude()),
            ),
            ("mode", "walking".to_string()),
            ("key", api_key.clone()),
        ];

        debug!(%url, "requesting walking route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DirectionsError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    DirectionsError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(DirectionsError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let raw: RawDirectionsResponse = response
            .json()
            .await
            .map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        let route = Self::extract_route(&raw)?;
        debug!(
            distance = %route.distance_text,
            duration = %route.duration_text,
            "route extracted"
        );
        Ok(route)
    }
}

// --- Raw provider response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    overview_polyline: RawPolyline,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    distance: RawText,
    duration: RawText,
}

#[derive(Debug, Deserialize)]
struct RawText {
    text: String,
}
