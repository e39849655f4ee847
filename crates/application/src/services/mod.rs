//! Application services

mod trip_planner;
mod warning_service;

pub use trip_planner::{PlannedTrip, SaveOptions, TripPhase, TripPlanner};
pub use warning_service::WarningService;
