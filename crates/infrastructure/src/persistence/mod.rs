//! Persistence module
//!
//! A sqlite-backed key-value JSON store, with saved-route and community
//! marker collections layered on top as append-only, newest-first lists.

pub mod connection;
pub mod key_value;
pub mod marker_store;
pub mod route_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use key_value::KeyValueStore;
pub use marker_store::SqliteMarkerStore;
pub use route_store::SqliteRouteStore;
