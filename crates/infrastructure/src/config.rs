//! Application configuration
//!
//! Layered loading: built-in defaults, an optional `saferoute.toml`, then
//! `SAFEROUTE_*` environment overrides (double underscore as the section
//! separator, e.g. `SAFEROUTE_SERVER__PORT=8080`). The provider API key
//! additionally falls back to `GOOGLE_MAPS_API_KEY`.

use gateway_client::GatewayConfig;
use integration_directions::DirectionsConfig;
use integration_geocoding::NominatimConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying loader error
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// HTTP server configuration for the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// The socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path, or ":memory:" for tests
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/saferoute.db".to_string()
}

const fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gateway HTTP server
    #[serde(default)]
    pub server: ServerConfig,
    /// Local persistence
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Directions provider (gateway side)
    #[serde(default)]
    pub directions: DirectionsConfig,
    /// Geocoding service (client side)
    #[serde(default)]
    pub geocoding: NominatimConfig,
    /// Routing gateway endpoint (client side)
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error when the file or environment sources fail to
    /// parse into the expected shape.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("saferoute").required(false))
            .add_source(
                config::Environment::with_prefix("SAFEROUTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: Self = settings.try_deserialize()?;
        if loaded.directions.api_key.is_none() {
            loaded.directions.api_key = std::env::var("GOOGLE_MAPS_API_KEY").ok();
        }
        Ok(loaded)
    }
}
