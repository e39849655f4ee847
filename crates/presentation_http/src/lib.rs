//! SafeRoute routing gateway
//!
//! A single-purpose HTTP service in front of the external directions
//! provider: the mobile client POSTs resolved coordinates to
//! `/routes/preview` and receives the first candidate route's polyline
//! plus display distance and duration. No retries, no caching; every
//! request is independent.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
