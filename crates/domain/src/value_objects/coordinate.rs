//! Geographic coordinate value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A geographic point with latitude and longitude in degrees
///
/// Immutable once constructed; all construction paths enforce the
/// WGS84 ranges unless explicitly marked unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with range validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in
    /// [-90, 90] or longitude is not in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude
    /// in [-180, 180].
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another coordinate in kilometers
    ///
    /// Uses the Haversine formula.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Parse a "lat, lng" free-text pair, as typed into the warning form
    ///
    /// Accepts any separator; takes the first two signed decimal numbers
    /// found. Returns `None` when fewer than two numbers are present or
    /// the values fall outside the valid ranges.
    #[must_use]
    pub fn parse_pair(text: &str) -> Option<Self> {
        let mut numbers = Vec::with_capacity(2);
        let mut current = String::new();

        for ch in text.chars() {
            if ch.is_ascii_digit() || ch == '.' || (ch == '-' && current.is_empty()) {
                current.push(ch);
            } else if !current.is_empty() {
                numbers.push(std::mem::take(&mut current));
            }
            if numbers.len() == 2 {
                break;
            }
        }
        if !current.is_empty() && numbers.len() < 2 {
            numbers.push(current);
        }

        let latitude: f64 = numbers.first()?.parse().ok()?;
        let longitude: f64 = numbers.get(1)?.parse().ok()?;
        Self::new(latitude, longitude).ok()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}
