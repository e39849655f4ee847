//! HTTP client for the routing gateway

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::models::RouteData;

/// Trait for routing gateway clients
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Request a route preview between two resolved endpoints
    ///
    /// One attempt, bounded timeout, no retries.
    async fn preview(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteData, GatewayError>;
}

/// Reqwest-based gateway client
#[derive(Debug)]
pub struct HttpGatewayClient {
    client: Client,
    config: GatewayConfig,
}

/// Request body for `POST /routes/preview`
///
/// The gateway's wire contract uses Portuguese field names.
#[derive(Debug, Serialize)]
struct PreviewRequestBody {
    origem: CoordsBody,
    destino: CoordsBody,
}

#[derive(Debug, Serialize)]
struct CoordsBody {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinate> for CoordsBody {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

/// Error body the gateway attaches to non-success responses
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: Option<String>,
    code: Option<String>,
}

impl HttpGatewayClient {
    /// Create a new gateway client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn preview(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteData, GatewayError> {
        let url = format!("{}/routes/preview", self.config.base_url);
        let body = PreviewRequestBody {
            origem: origin.into(),
            destino: destination.into(),
        };

        debug!(%url, "requesting route preview");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GatewayError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(err_body) = serde_json::from_str::<GatewayErrorBody>(&text) {
                if err_body.code.as_deref() == Some("no_route_found") {
                    return Err(GatewayError::NoRouteFound);
                }
                return Err(GatewayError::RequestFailed {
                    status: status.as_u16(),
                    message: err_body.error,
                });
            }
            return Err(GatewayError::RequestFailed {
                status: status.as_u16(),
                message: None,
            });
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        let data = RouteData::from_response(&value)?;
        debug!(
            distance = ?data.distance_text,
            duration = ?data.duration_text,
            "route preview normalized"
        );
        Ok(data)
    }
}
