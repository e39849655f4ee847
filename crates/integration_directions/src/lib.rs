//! Directions provider integration for the SafeRoute gateway
//!
//! Calls the Google Directions API in walking mode and extracts the first
//! candidate route's overview polyline and first-leg distance/duration
//! text. The provider response is otherwise treated as opaque.
//!
//! Each call is a single attempt with a tight timeout (the gateway answers
//! an interactive client); there is no retry or caching here.

mod client;
mod config;
mod error;

pub use client::{DirectionsClient, GoogleDirectionsClient, ProviderRoute};
pub use config::DirectionsConfig;
pub use error::DirectionsError;
