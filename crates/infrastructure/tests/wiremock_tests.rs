//! End-to-end planning pipeline over real adapters (wiremock-based)
//!
//! Exercises the whole client-side flow: geocoding the destination text,
//! the gateway round-trip, polyline decoding, and persistence, with both
//! HTTP services mocked.

use std::sync::Arc;

use application::{SaveOptions, TripPhase, TripPlanner};
use domain::value_objects::{Coordinate, RouteEndpoint};
use gateway_client::{GatewayConfig, HttpGatewayClient};
use infrastructure::adapters::{GeocodingAdapter, RoutingAdapter};
use infrastructure::config::DatabaseConfig;
use infrastructure::persistence::{KeyValueStore, SqliteRouteStore, create_pool};
use integration_geocoding::{NominatimClient, NominatimConfig};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Three points between Praça da Sé and Avenida Paulista.
fn preview_polyline() -> String {
    domain::polyline::encode(&[
        Coordinate::new_unchecked(-23.5505, -46.6333),
        Coordinate::new_unchecked(-23.5550, -46.6450),
        Coordinate::new_unchecked(-23.5614, -46.6559),
    ])
}

fn route_store(dir: &TempDir) -> Arc<SqliteRouteStore> {
    let config = DatabaseConfig {
        path: dir
            .path()
            .join("pipeline.db")
            .to_string_lossy()
            .into_owned(),
        max_connections: 2,
    };
    Arc::new(SqliteRouteStore::new(KeyValueStore::new(
        create_pool(&config).expect("pool"),
    )))
}

async fn mock_geocoder(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "-23.5614", "lon": "-46.6559", "display_name": "Avenida Paulista"}]"#,
        ))
        .mount(server)
        .await;
}

async fn mock_gateway(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/routes/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "polyline": preview_polyline(),
            "distance": "5.2 km",
            "duration": "12 mins"
        })))
        .mount(server)
        .await;
}

fn planner(geocoding_url: &str, gateway_url: &str, routes: Arc<SqliteRouteStore>) -> TripPlanner {
    let geocoding_config = NominatimConfig {
        base_url: geocoding_url.to_string(),
        ..NominatimConfig::for_testing()
    };
    let geocoder =
        GeocodingAdapter::new(NominatimClient::new(&geocoding_config).expect("geocoder"));

    let gateway_config = GatewayConfig::for_testing(gateway_url);
    let routing = RoutingAdapter::new(HttpGatewayClient::new(&gateway_config).expect("gateway"));

    TripPlanner::new(Arc::new(geocoder), Arc::new(routing), routes)
}

#[tokio::test]
async fn gps_origin_and_text_destination_plan_save_and_reload() {
    let geocoding_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;
    mock_geocoder(&geocoding_server).await;
    mock_gateway(&gateway_server).await;

    let dir = TempDir::new().expect("tempdir");
    let routes = route_store(&dir);
    let planner = planner(&geocoding_server.uri(), &gateway_server.uri(), routes);

    // Plan: GPS origin, free-text destination.
    let trip = planner
        .plan_trip(
            Coordinate::new_unchecked(-23.5505, -46.6333).into(),
            RouteEndpoint::address("Avenida Paulista, 1000").expect("valid"),
        )
        .await
        .expect("plan succeeds")
        .expect("not discarded");

    assert_eq!(trip.path.len(), 3);
    assert_eq!(trip.preview.distance_text.as_deref(), Some("5.2 km"));
    assert_eq!(trip.preview.distance_value, Some(5.2));
    assert!((trip.destination.latitude() + 23.5614).abs() < 1e-6);
    assert!(matches!(planner.phase(), TripPhase::RouteReady(_)));

    // Save, then reload from history without another gateway call.
    let saved = planner
        .save(SaveOptions::QuickStart)
        .await
        .expect("save succeeds");
    assert_eq!(saved.name, "Quick route: Avenida Paulista");
    assert_eq!(planner.phase(), TripPhase::Idle);

    let history = planner.history().await.expect("history");
    assert_eq!(history.len(), 1);

    let reloaded = planner.apply_saved(&history[0]).expect("applies");
    assert_eq!(reloaded.path.len(), 3);
    assert_eq!(reloaded.preview.distance_value, Some(5.2));
}

#[tokio::test]
async fn unreachable_gateway_surfaces_a_network_failure() {
    let geocoding_server = MockServer::start().await;
    mock_geocoder(&geocoding_server).await;

    let dir = TempDir::new().expect("tempdir");
    let routes = route_store(&dir);
    // Point the gateway client at a closed port.
    let planner = planner(
        &geocoding_server.uri(),
        "http://127.0.0.1:9",
        routes,
    );

    let result = planner
        .plan_trip(
            Coordinate::new_unchecked(-23.5505, -46.6333).into(),
            Coordinate::new_unchecked(-23.5614, -46.6559).into(),
        )
        .await;

    assert!(matches!(
        result,
        Err(application::ApplicationError::Network(_))
    ));
    assert!(matches!(planner.phase(), TripPhase::Failed(_)));
}
