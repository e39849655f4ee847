//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: sqlite-backed
//! key-value persistence for routes and markers, adapters over the
//! geocoding and gateway clients, configuration loading, and telemetry.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{GeocodingAdapter, RoutingAdapter};
pub use config::{AppConfig, ConfigError, DatabaseConfig, ServerConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, KeyValueStore, SqliteMarkerStore, SqliteRouteStore, create_pool,
};
pub use telemetry::init_tracing;
