//! Directions provider error types

use thiserror::Error;

/// Errors that can occur talking to the directions provider
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// The provider API key is not configured
    #[error("Directions API key is not configured")]
    MissingApiKey,

    /// Connection to the provider failed
    #[error("Directions connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Directions request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout in milliseconds
        timeout_ms: u64,
    },

    /// HTTP request to the provider failed
    #[error("Directions request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the provider response
    #[error("Directions parse error: {0}")]
    ParseError(String),

    /// The provider returned zero candidate routes
    #[error("No route found between the given points")]
    NoRouteFound,

    /// The provider reported a non-OK status
    #[error("Directions provider returned status {0}")]
    ProviderStatus(String),
}

impl DirectionsError {
    /// Whether this failure needs operator intervention rather than retry
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}
