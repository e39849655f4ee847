//! Nominatim geocoding client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to coordinates
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: NominatimConfig,
    cache: Cache<String, (f64, f64)>,
    last_request: Arc<Mutex<Instant>>,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("SafeRoute/0.3 (https://github.com/saferoute-app/saferoute)")
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.cache_ttl_hours > 0 {
            Duration::from_secs(config.cache_ttl_hours * 3600)
        } else {
            Duration::from_millis(1)
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(Instant::now() - Duration::from_secs(2))),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < Duration::from_millis(1100) {
            let wait = Duration::from_millis(1100).saturating_sub(elapsed);
            debug!(?wait, "rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }

    fn to_coordinate(result: &NominatimResult) -> Result<Coordinate, GeocodingError> {
        let latitude: f64 = result
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("invalid latitude".to_string()))?;
        let longitude: f64 = result
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("invalid longitude".to_string()))?;
        Coordinate::new(latitude, longitude).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "address must not be empty".to_string(),
            ));
        }

        let cache_key = address.to_lowercase();
        if let Some((lat, lon)) = self.cache.get(&cache_key).await {
            debug!(%address, "geocoding cache hit");
            return Coordinate::new(lat, lon)
                .map_err(|e| GeocodingError::ParseError(e.to_string()));
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url);
        let mut params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%address, "geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let result = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?;
        let position = Self::to_coordinate(result)?;

        self.cache
            .insert(cache_key, (position.latitude(), position.longitude()))
            .await;
        debug!(%address, %position, "geocoded address");

        Ok(position)
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}
