//! Application-level errors
//!
//! The taxonomy the planning flow surfaces to the user: geocoding and
//! network failures are recoverable inline; configuration problems are not.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A free-text endpoint could not be resolved to coordinates
    #[error("Geocoding failed: {0}")]
    GeocodeFailed(String),

    /// Transport error or non-success status from the routing gateway
    #[error("Could not reach the routing service: {0}")]
    Network(String),

    /// The gateway answered but no route could be traced
    #[error("Could not trace a route between the chosen points")]
    NoRouteFound,

    /// A required credential or setting is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// A planning session is already active
    #[error("A route is already active; finish it before planning another")]
    SessionActive,

    /// Operation not valid in the current planning phase
    #[error("Invalid operation: {0}")]
    InvalidState(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the user can recover by retrying with different input
    ///
    /// Configuration and internal errors need operator intervention;
    /// everything else is surfaced inline and the flow returns to idle.
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Internal(_))
    }
}
