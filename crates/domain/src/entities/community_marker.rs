//! Community safety marker entity
//!
//! Informal warnings users pin to coordinates: a category tag, a free-text
//! description, and where it happened. Simulated markers seed the map in
//! areas without real reports yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Category of a community warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTag {
    /// Suspected robbery in the area
    Assault,
    /// Gunshots heard recently
    Gunshots,
    /// Route with a high count of recent alerts
    CompromisedRoute,
    /// Low street movement
    EmptyStreet,
    /// Potholes, flooding, or uneven ground
    RoughTerrain,
}

impl MarkerTag {
    /// Default description shown when the user does not write one
    #[must_use]
    pub const fn default_description(&self) -> &'static str {
        match self {
            Self::Assault => "Suspected robbery in the area.",
            Self::Gunshots => "Gunshot sounds heard recently.",
            Self::CompromisedRoute => "Route with a high count of recent alerts.",
            Self::EmptyStreet => "Low movement on the street.",
            Self::RoughTerrain => "Street with potholes or uneven ground.",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Assault => "Assault",
            Self::Gunshots => "Gunshots",
            Self::CompromisedRoute => "Compromised route",
            Self::EmptyStreet => "Empty street",
            Self::RoughTerrain => "Rough terrain",
        }
    }

    /// All tags, in the order presented to the user
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Assault,
            Self::Gunshots,
            Self::CompromisedRoute,
            Self::EmptyStreet,
            Self::RoughTerrain,
        ]
    }
}

/// A warning pinned to coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityMarker {
    /// Opaque unique identifier, assigned at write time
    pub id: String,
    /// Creation timestamp, assigned at write time
    pub created_at: DateTime<Utc>,
    /// Warning category
    pub tag: MarkerTag,
    /// Where the warning applies
    pub position: Coordinate,
    /// Free-text detail
    pub description: String,
    /// True for seeded demo markers, false for user reports
    pub simulated: bool,
}

/// Payload for creating a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCommunityMarker {
    pub tag: MarkerTag,
    pub position: Coordinate,
    pub description: String,
    pub simulated: bool,
}

impl NewCommunityMarker {
    /// Create a user report with the tag's default description
    #[must_use]
    pub fn report(tag: MarkerTag, position: Coordinate) -> Self {
        Self {
            tag,
            position,
            description: tag.default_description().to_string(),
            simulated: false,
        }
    }
}

impl CommunityMarker {
    /// Materialize a payload into a stored entity
    #[must_use]
    pub fn from_payload(payload: NewCommunityMarker, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            tag: payload.tag,
            position: payload.position,
            description: payload.description,
            simulated: payload.simulated,
        }
    }

    /// Whether this marker lies within `radius_km` of a point
    #[must_use]
    pub fn is_near(&self, point: &Coordinate, radius_km: f64) -> bool {
        self.position.distance_km(point) <= radius_km
    }
}
