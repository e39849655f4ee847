//! Port definitions for the application layer
//!
//! Ports are the interfaces through which the planning flow reaches the
//! outside world. Adapters in the infrastructure layer implement them with
//! the geocoding, gateway, and persistence clients.

mod geocoding_port;
mod marker_store;
mod route_store;
mod routing_port;

pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use marker_store::MarkerStorePort;
#[cfg(test)]
pub use marker_store::MockMarkerStorePort;
#[cfg(test)]
pub use route_store::MockRouteStorePort;
pub use route_store::RouteStorePort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{RoutePreview, RoutingPort};
