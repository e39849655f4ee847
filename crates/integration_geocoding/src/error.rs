//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Request timed out
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Whether the address itself is the problem, as opposed to the service
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::AddressNotFound(_))
    }
}
