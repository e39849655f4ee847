//! Geocoding service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Country code filter (e.g., "br" for Brazil; empty for worldwide)
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Preferred languages for results
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_country_filter() -> String {
    "br".to_string()
}

fn default_accept_language() -> String {
    "pt-BR,en".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: default_country_filter(),
            accept_language: default_accept_language(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing (no caching)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }
}
