//! API error handling
//!
//! Maps provider failures onto the gateway's HTTP contract: a missing
//! credential is an internal error with a message, zero candidate routes
//! answer with the `no_route_found` code clients use to tell "no route"
//! apart from "service unreachable".

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use integration_directions::DirectionsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No route found between the given points")]
    NoRouteFound,

    #[error("Upstream provider error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Stable error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::NoRouteFound => (
                StatusCode::NOT_FOUND,
                "no_route_found",
                "No route found between the given points".to_string(),
            ),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DirectionsError> for ApiError {
    fn from(err: DirectionsError) -> Self {
        match err {
            DirectionsError::MissingApiKey => Self::Internal(
                "The directions provider API key is not configured".to_string(),
            ),
            DirectionsError::NoRouteFound => Self::NoRouteFound,
            DirectionsError::Timeout { .. }
            | DirectionsError::ConnectionFailed(_)
            | DirectionsError::RequestFailed(_)
            | DirectionsError::ParseError(_)
            | DirectionsError::ProviderStatus(_) => Self::Upstream(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_becomes_internal_error() {
        let err: ApiError = DirectionsError::MissingApiKey.into();
        assert!(matches!(err, ApiError::Internal(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn zero_routes_becomes_not_found() {
        let err: ApiError = DirectionsError::NoRouteFound.into();
        assert!(matches!(err, ApiError::NoRouteFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn provider_timeout_becomes_bad_gateway() {
        let err: ApiError = DirectionsError::Timeout { timeout_ms: 1000 }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn bad_request_keeps_its_message() {
        let err = ApiError::BadRequest("latitude out of range".to_string());
        assert!(err.to_string().contains("latitude out of range"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
