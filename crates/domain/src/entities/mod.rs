//! Persisted entities

mod community_marker;
mod saved_route;

pub use community_marker::{CommunityMarker, MarkerTag, NewCommunityMarker};
pub use saved_route::{NewSavedRoute, RouteVisibility, SavedRoute};
