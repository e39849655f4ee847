//! Application state shared across handlers

use std::sync::Arc;

use integration_directions::DirectionsClient;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Directions provider client
    pub directions: Arc<dyn DirectionsClient>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("directions", &"<DirectionsClient>")
            .finish()
    }
}

impl AppState {
    /// Create state over a directions client
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsClient>) -> Self {
        Self { directions }
    }
}
