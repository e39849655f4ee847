//! Route endpoint value object
//!
//! An origin or destination for a trip: either coordinates already known
//! (GPS fix, dragged map marker, stored route) or free address text that
//! still needs geocoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Coordinate;

/// Minimum address length worth sending to the geocoder. Shorter strings
/// are typing noise and are rejected before any network call.
pub const MIN_GEOCODABLE_LEN: usize = 4;

/// One end of a route: resolved coordinates or unresolved address text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RouteEndpoint {
    /// Already-resolved coordinates
    Position(Coordinate),
    /// Free-text address, to be geocoded by the orchestration layer
    Address(String),
}

impl RouteEndpoint {
    /// Create an address endpoint
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAddress` if the text is empty after
    /// trimming.
    pub fn address(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidAddress(
                "address must not be empty".to_string(),
            ));
        }
        Ok(Self::Address(text))
    }

    /// Whether this endpoint is already a coordinate
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Position(_))
    }

    /// The coordinate, if resolved
    #[must_use]
    pub const fn position(&self) -> Option<Coordinate> {
        match self {
            Self::Position(c) => Some(*c),
            Self::Address(_) => None,
        }
    }

    /// Whether an address endpoint is long enough to be worth geocoding
    ///
    /// Always true for resolved positions.
    #[must_use]
    pub fn is_geocodable(&self) -> bool {
        match self {
            Self::Position(_) => true,
            Self::Address(text) => text.trim().len() >= MIN_GEOCODABLE_LEN,
        }
    }

    /// Human-readable label for error messages and saved routes
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Position(c) => c.to_string(),
            Self::Address(text) => text.clone(),
        }
    }
}

impl From<Coordinate> for RouteEndpoint {
    fn from(c: Coordinate) -> Self {
        Self::Position(c)
    }
}

impl fmt::Display for RouteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
