//! Saved route entity
//!
//! A route the user chose to keep: endpoints, the encoded path as returned
//! by the gateway, display distance/duration, and sharing settings.
//! Saved routes are append-only history; they are never mutated after
//! creation and only removed by explicit deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Who can see a saved route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteVisibility {
    /// Only the owner
    Private,
    /// Shared with the member list
    Group,
    /// Visible to everyone
    Public,
}

impl Default for RouteVisibility {
    fn default() -> Self {
        Self::Private
    }
}

/// A persisted route
///
/// `id` and `created_at` are assigned by the store at write time, never by
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    /// Opaque unique identifier
    pub id: String,
    /// Creation timestamp, assigned at write time
    pub created_at: DateTime<Utc>,
    /// Display name
    pub name: String,
    /// Origin as the user entered it
    pub origin_address: String,
    /// Destination as the user entered it
    pub destination_address: String,
    /// Resolved origin
    pub origin: Coordinate,
    /// Resolved destination
    pub destination: Coordinate,
    /// Encoded path, decodable with [`crate::polyline::decode`]
    pub polyline: String,
    /// Best-effort numeric distance (unit as reported by the gateway)
    pub distance: f64,
    /// Display duration as reported by the gateway
    pub duration: Option<String>,
    /// Optional safety annotation, opaque pass-through from the gateway
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_score: Option<f64>,
    /// Sharing level
    pub visibility: RouteVisibility,
    /// Member emails for group visibility
    pub members: Vec<String>,
    /// Why the user saved this route
    pub reason: String,
}

/// Payload for creating a saved route (everything the caller provides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedRoute {
    pub name: String,
    pub origin_address: String,
    pub destination_address: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub polyline: String,
    pub distance: f64,
    pub duration: Option<String>,
    pub safety_score: Option<f64>,
    pub visibility: RouteVisibility,
    pub members: Vec<String>,
    pub reason: String,
}

impl SavedRoute {
    /// Materialize a payload into a stored entity
    #[must_use]
    pub fn from_payload(payload: NewSavedRoute, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            name: payload.name,
            origin_address: payload.origin_address,
            destination_address: payload.destination_address,
            origin: payload.origin,
            destination: payload.destination,
            polyline: payload.polyline,
            distance: payload.distance,
            duration: payload.duration,
            safety_score: payload.safety_score,
            visibility: payload.visibility,
            members: payload.members,
            reason: payload.reason,
        }
    }
}
