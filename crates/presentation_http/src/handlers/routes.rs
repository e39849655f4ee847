//! Route preview handler
//!
//! The gateway's single operation: coordinates in, the first candidate
//! walking route out. The wire contract keeps the Portuguese field names
//! deployed clients already send.

use axum::{Json, extract::State};
use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /routes/preview`
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// Origin coordinates
    pub origem: CoordsBody,
    /// Destination coordinates
    pub destino: CoordsBody,
}

/// A coordinate pair on the wire
#[derive(Debug, Deserialize)]
pub struct CoordsBody {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordsBody {
    fn validated(&self, field: &str) -> Result<Coordinate, ApiError> {
        Coordinate::new(self.latitude, self.longitude)
            .map_err(|e| ApiError::BadRequest(format!("{field}: {e}")))
    }
}

/// Success response for `POST /routes/preview`
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Encoded overview polyline
    pub polyline: String,
    /// Display distance, e.g. "5.2 km"
    pub distance: String,
    /// Display duration, e.g. "12 mins"
    pub duration: String,
}

/// POST /routes/preview
#[instrument(skip(state, request))]
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let origin = request.origem.validated("origem")?;
    let destination = request.destino.validated("destino")?;

    let route = state.directions.walking_route(origin, destination).await?;

    info!(
        %origin,
        %destination,
        distance = %route.distance_text,
        "route preview served"
    );

    Ok(Json(PreviewResponse {
        polyline: route.polyline,
        distance: route.distance_text,
        duration: route.duration_text,
    }))
}
