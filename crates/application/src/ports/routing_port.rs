//! Routing port
//!
//! One round-trip to the routing gateway: coordinates in, a canonical
//! route preview out. Resolution of free-text endpoints happens before
//! this port is ever invoked.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Canonical route result returned by the gateway
///
/// Distance and duration are display-oriented text as the gateway formats
/// them; the `*_value` fields carry the numeric meaning extracted once at
/// the normalization boundary, with no unit assumption. Fields the gateway
/// omitted are `None`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePreview {
    /// Encoded path, decodable with `domain::polyline::decode`
    pub polyline: String,
    /// Display distance, e.g. "5.2 km"
    pub distance_text: Option<String>,
    /// Display duration, e.g. "12 mins"
    pub duration_text: Option<String>,
    /// Best-effort numeric distance parsed from the display text
    pub distance_value: Option<f64>,
    /// Best-effort numeric duration parsed from the display text
    pub duration_value: Option<f64>,
    /// Optional safety annotation, opaque pass-through
    pub safety_score: Option<f64>,
}

/// Port for requesting a route preview from the gateway
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Request a walking route between two resolved endpoints
    ///
    /// A single attempt with a bounded timeout; no retries.
    async fn preview_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RoutePreview, ApplicationError>;
}
