//! Directions provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Google Directions client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsConfig {
    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key; requests fail with a configuration error when
    /// absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    1000
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl DirectionsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some("test-key".to_string()),
            timeout_ms: 2000,
        }
    }
}
