//! Gateway client error types

use thiserror::Error;

/// Errors that can occur talking to the routing gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection to the gateway failed
    #[error("Gateway connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Gateway request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout in seconds
        timeout_secs: u64,
    },

    /// The gateway answered with a non-success status
    #[error("Gateway request failed with HTTP {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, if any
        message: Option<String>,
    },

    /// The gateway found no route between the endpoints
    #[error("No route found between the given points")]
    NoRouteFound,

    /// Failed to parse the gateway response
    #[error("Gateway parse error: {0}")]
    ParseError(String),
}
