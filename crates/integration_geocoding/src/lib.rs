//! Address geocoding for SafeRoute
//!
//! Converts free-form address text to coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Implements rate limiting (max 1 request/second per Nominatim usage
//! policy) and result caching to keep repeated trip planning from hammering
//! the API. [`GeocodingClient`] defines the interface, implemented by
//! [`NominatimClient`].

mod client;
mod config;
mod error;

pub use client::{GeocodingClient, NominatimClient};
pub use config::NominatimConfig;
pub use error::GeocodingError;
