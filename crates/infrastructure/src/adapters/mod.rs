//! Port adapters
//!
//! Bridge the integration clients into the application layer's port
//! vocabulary and error taxonomy.

mod geocoding_adapter;
mod routing_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use routing_adapter::RoutingAdapter;
