//! Routing adapter - Implements RoutingPort using gateway_client

use application::ApplicationError;
use application::ports::{RoutePreview, RoutingPort};
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use gateway_client::{GatewayClient, GatewayError, HttpGatewayClient, RouteData};
use tracing::instrument;

/// Adapter over the HTTP gateway client
pub struct RoutingAdapter {
    client: HttpGatewayClient,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter").finish_non_exhaustive()
    }
}

impl RoutingAdapter {
    /// Wrap a gateway client
    #[must_use]
    pub fn new(client: HttpGatewayClient) -> Self {
        Self { client }
    }

    fn map_error(err: GatewayError) -> ApplicationError {
        match err {
            GatewayError::NoRouteFound => ApplicationError::NoRouteFound,
            other => ApplicationError::Network(other.to_string()),
        }
    }

    fn map_data(data: RouteData) -> RoutePreview {
        RoutePreview {
            polyline: data.polyline,
            distance_text: data.distance_text,
            duration_text: data.duration_text,
            distance_value: data.distance_value,
            duration_value: data.duration_value,
            safety_score: data.safety_score,
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn preview_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RoutePreview, ApplicationError> {
        self.client
            .preview(origin, destination)
            .await
            .map(Self::map_data)
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_route_maps_to_its_own_variant() {
        let mapped = RoutingAdapter::map_error(GatewayError::NoRouteFound);
        assert!(matches!(mapped, ApplicationError::NoRouteFound));
    }

    #[test]
    fn transport_errors_map_to_network() {
        let mapped = RoutingAdapter::map_error(GatewayError::Timeout { timeout_secs: 8 });
        assert!(matches!(mapped, ApplicationError::Network(_)));

        let mapped = RoutingAdapter::map_error(GatewayError::RequestFailed {
            status: 500,
            message: None,
        });
        assert!(matches!(mapped, ApplicationError::Network(_)));
    }

    #[test]
    fn data_fields_carry_over() {
        let data = RouteData {
            polyline: "_p~iF~ps|U".to_string(),
            distance_text: Some("5.2 km".to_string()),
            duration_text: Some("12 mins".to_string()),
            distance_value: Some(5.2),
            duration_value: Some(12.0),
            safety_score: Some(87.0),
        };
        let preview = RoutingAdapter::map_data(data);
        assert_eq!(preview.polyline, "_p~iF~ps|U");
        assert_eq!(preview.distance_value, Some(5.2));
        assert_eq!(preview.safety_score, Some(87.0));
    }
}
