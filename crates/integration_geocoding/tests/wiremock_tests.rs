//! Integration tests for the Nominatim client (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_geocoding::{GeocodingClient, GeocodingError, NominatimClient, NominatimConfig};

fn config_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

const PAULISTA_JSON: &str = r#"[
    {
        "place_id": 12345,
        "lat": "-23.5614",
        "lon": "-46.6559",
        "display_name": "Avenida Paulista, Bela Vista, São Paulo"
    }
]"#;

#[tokio::test]
async fn geocode_resolves_an_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Avenida Paulista, 1000"))
        .and(query_param("countrycodes", "br"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAULISTA_JSON))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&config_for_mock(&server.uri())).unwrap();
    let position = client.geocode("Avenida Paulista, 1000").await.unwrap();

    assert!((position.latitude() + 23.5614).abs() < 1e-6);
    assert!((position.longitude() + 46.6559).abs() < 1e-6);
}

#[tokio::test]
async fn geocode_reports_address_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.geocode("definitely nowhere").await;

    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}

#[tokio::test]
async fn geocode_reports_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.geocode("Avenida Paulista, 1000").await;

    assert!(matches!(result, Err(GeocodingError::RequestFailed(_))));
}

#[tokio::test]
async fn geocode_rejects_empty_address_without_a_request() {
    // No mocks mounted: a request would 404 and fail differently.
    let server = MockServer::start().await;
    let client = NominatimClient::new(&config_for_mock(&server.uri())).unwrap();

    let result = client.geocode("   ").await;
    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}

#[tokio::test]
async fn repeated_lookups_are_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAULISTA_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        base_url: server.uri(),
        cache_ttl_hours: 1,
        ..NominatimConfig::default()
    };
    let client = NominatimClient::new(&config).unwrap();

    let first = client.geocode("Avenida Paulista, 1000").await.unwrap();
    // Same address, different case: still one upstream request.
    let second = client.geocode("avenida paulista, 1000").await.unwrap();

    assert_eq!(first, second);
}
