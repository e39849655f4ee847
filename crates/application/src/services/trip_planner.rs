//! Trip-planning orchestration
//!
//! Owns the state machine for building one trip: resolve free-text
//! endpoints, request a route from the gateway, decode the path, and hand
//! the result to rendering and persistence. One planning session is active
//! at a time; the whole flow is a single suspended call with no fan-out.
//!
//! Discarding a session bumps a generation counter. Any geocode or gateway
//! result that lands for an older generation is dropped without touching
//! state, so a late network reply can never corrupt a newer session.

use std::sync::Arc;

use domain::entities::{NewSavedRoute, RouteVisibility, SavedRoute};
use domain::polyline;
use domain::value_objects::{Coordinate, RouteEndpoint};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, RoutePreview, RouteStorePort, RoutingPort};

/// A fully planned trip, ready to draw and save
///
/// Transient and owned by the session that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTrip {
    /// Resolved origin
    pub origin: Coordinate,
    /// Resolved destination
    pub destination: Coordinate,
    /// Origin as the user expressed it
    pub origin_label: String,
    /// Destination as the user expressed it
    pub destination_label: String,
    /// Canonical gateway result
    pub preview: RoutePreview,
    /// Decoded path, always at least one point
    pub path: Vec<Coordinate>,
}

/// Phase of the planning state machine
///
/// A closed enum rather than independent booleans, so combinations like
/// "saved while still resolving" cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum TripPhase {
    /// No session in progress
    Idle,
    /// Geocoding free-text endpoints
    ResolvingEndpoints,
    /// Waiting on the routing gateway
    AwaitingGateway,
    /// A decoded route is ready to start, save, or discard
    RouteReady(Box<PlannedTrip>),
    /// The session failed; the message is the single user-visible error
    Failed(String),
}

/// How to persist a ready route
#[derive(Debug, Clone)]
pub enum SaveOptions {
    /// One-tap save before starting navigation, named after the destination
    QuickStart,
    /// Full configuration form
    Configured {
        name: String,
        visibility: RouteVisibility,
        members: Vec<String>,
        reason: String,
    },
}

impl SaveOptions {
    fn into_payload(self, trip: &PlannedTrip) -> NewSavedRoute {
        let distance = trip.preview.distance_value.unwrap_or(0.0);
        let duration = trip.preview.duration_text.clone();
        let base = NewSavedRoute {
            name: String::new(),
            origin_address: trip.origin_label.clone(),
            destination_address: trip.destination_label.clone(),
            origin: trip.origin,
            destination: trip.destination,
            polyline: trip.preview.polyline.clone(),
            distance,
            duration,
            safety_score: trip.preview.safety_score,
            visibility: RouteVisibility::Private,
            members: Vec::new(),
            reason: String::new(),
        };

        match self {
            Self::QuickStart => {
                let short = trip
                    .destination_label
                    .split(',')
                    .next()
                    .unwrap_or(&trip.destination_label)
                    .trim();
                NewSavedRoute {
                    name: format!("Quick route: {short}"),
                    reason: "Quick start".to_string(),
                    ..base
                }
            },
            Self::Configured {
                name,
                visibility,
                members,
                reason,
            } => NewSavedRoute {
                name,
                visibility,
                members,
                reason,
                ..base
            },
        }
    }
}

struct PlannerState {
    phase: TripPhase,
    generation: u64,
    navigating: bool,
}

/// Coordinates geocoding, the gateway call, polyline decoding, and the
/// hand-off to persistence for a single planning session
pub struct TripPlanner {
    geocoder: Arc<dyn GeocodingPort>,
    routing: Arc<dyn RoutingPort>,
    routes: Arc<dyn RouteStorePort>,
    state: Mutex<PlannerState>,
}

impl std::fmt::Debug for TripPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripPlanner")
            .field("phase", &self.phase())
            .field("navigating", &self.is_navigating())
            .finish_non_exhaustive()
    }
}

impl TripPlanner {
    /// Create a planner over the given ports
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        routing: Arc<dyn RoutingPort>,
        routes: Arc<dyn RouteStorePort>,
    ) -> Self {
        Self {
            geocoder,
            routing,
            routes,
            state: Mutex::new(PlannerState {
                phase: TripPhase::Idle,
                generation: 0,
                navigating: false,
            }),
        }
    }

    /// Current phase of the state machine
    #[must_use]
    pub fn phase(&self) -> TripPhase {
        self.state.lock().phase.clone()
    }

    /// Whether a route is actively being navigated
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        self.state.lock().navigating
    }

    /// Plan a trip between two endpoints
    ///
    /// Resolves the origin before the destination; an origin failure
    /// short-circuits without touching the destination. The gateway is
    /// only called once both ends are coordinates, and success requires a
    /// decodable path of at least one point.
    ///
    /// Returns `Ok(None)` when the session was discarded while a call was
    /// in flight; the late result is dropped and state is untouched.
    ///
    /// # Errors
    ///
    /// `SessionActive` while navigating, `GeocodeFailed` for unresolvable
    /// text, `Network` for transport problems, `NoRouteFound` when the
    /// gateway has no route or the polyline decodes to nothing.
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    pub async fn plan_trip(
        &self,
        origin: RouteEndpoint,
        destination: RouteEndpoint,
    ) -> Result<Option<PlannedTrip>, ApplicationError> {
        let generation = {
            let mut state = self.state.lock();
            if state.navigating {
                return Err(ApplicationError::SessionActive);
            }
            state.generation += 1;
            state.phase = TripPhase::ResolvingEndpoints;
            state.generation
        };

        let origin_position = match self.resolve_endpoint(&origin).await {
            Ok(position) => position,
            Err(e) => return self.fail(generation, e),
        };
        // Only attempted once the origin resolved.
        let destination_position = match self.resolve_endpoint(&destination).await {
            Ok(position) => position,
            Err(e) => return self.fail(generation, e),
        };

        if !self.advance(generation, TripPhase::AwaitingGateway) {
            debug!("session discarded during endpoint resolution");
            return Ok(None);
        }

        let preview = match self
            .routing
            .preview_route(origin_position, destination_position)
            .await
        {
            Ok(preview) => preview,
            Err(e) => return self.fail(generation, e),
        };

        let path = polyline::decode(&preview.polyline);
        if path.is_empty() {
            return self.fail(generation, ApplicationError::NoRouteFound);
        }

        let trip = PlannedTrip {
            origin: origin_position,
            destination: destination_position,
            origin_label: origin.label(),
            destination_label: destination.label(),
            preview,
            path,
        };

        if !self.advance(generation, TripPhase::RouteReady(Box::new(trip.clone()))) {
            debug!("session discarded while awaiting the gateway");
            return Ok(None);
        }

        info!(points = trip.path.len(), "route ready");
        Ok(Some(trip))
    }

    /// Persist the ready route and return the stored entity
    ///
    /// The planner returns to idle afterwards, unless the route is being
    /// navigated, in which case it stays ready until navigation finishes.
    ///
    /// # Errors
    ///
    /// `InvalidState` when no route is ready; storage errors pass through.
    pub async fn save(&self, options: SaveOptions) -> Result<SavedRoute, ApplicationError> {
        let (generation, trip) = {
            let state = self.state.lock();
            let TripPhase::RouteReady(ref trip) = state.phase else {
                return Err(ApplicationError::InvalidState(
                    "no route ready to save".to_string(),
                ));
            };
            (state.generation, trip.as_ref().clone())
        };

        let saved = self.routes.add(options.into_payload(&trip)).await?;

        let mut state = self.state.lock();
        if state.generation == generation && !state.navigating {
            state.generation += 1;
            state.phase = TripPhase::Idle;
        }
        info!(id = %saved.id, name = %saved.name, "route saved");
        Ok(saved)
    }

    /// Discard the current session and release its transient state
    ///
    /// In-flight geocode or gateway calls for this session will find their
    /// generation stale when they land and be ignored.
    pub fn discard(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.phase = TripPhase::Idle;
        debug!("planning session discarded");
    }

    /// Begin navigating the ready route
    ///
    /// While navigating, new planning sessions are rejected.
    ///
    /// # Errors
    ///
    /// `InvalidState` when no route is ready.
    pub fn start_navigation(&self) -> Result<(), ApplicationError> {
        let mut state = self.state.lock();
        if !matches!(state.phase, TripPhase::RouteReady(_)) {
            return Err(ApplicationError::InvalidState(
                "no route ready to navigate".to_string(),
            ));
        }
        state.navigating = true;
        info!("navigation started");
        Ok(())
    }

    /// Finish navigation and return to idle
    pub fn finish_navigation(&self) {
        let mut state = self.state.lock();
        state.navigating = false;
        state.generation += 1;
        state.phase = TripPhase::Idle;
        info!("navigation finished");
    }

    /// Acknowledge a surfaced error and return to idle
    pub fn acknowledge_error(&self) {
        let mut state = self.state.lock();
        if matches!(state.phase, TripPhase::Failed(_)) {
            state.phase = TripPhase::Idle;
        }
    }

    /// Re-open a saved route without a new gateway round-trip
    ///
    /// Decodes the stored polyline and moves straight to `RouteReady`.
    ///
    /// # Errors
    ///
    /// `SessionActive` while navigating; `InvalidState` when the stored
    /// polyline decodes to nothing.
    pub fn apply_saved(&self, route: &SavedRoute) -> Result<PlannedTrip, ApplicationError> {
        if self.is_navigating() {
            return Err(ApplicationError::SessionActive);
        }

        let path = polyline::decode(&route.polyline);
        if path.is_empty() {
            return Err(ApplicationError::InvalidState(
                "saved route has no usable path".to_string(),
            ));
        }

        let trip = PlannedTrip {
            origin: route.origin,
            destination: route.destination,
            origin_label: route.origin_address.clone(),
            destination_label: route.destination_address.clone(),
            preview: RoutePreview {
                polyline: route.polyline.clone(),
                distance_text: None,
                duration_text: route.duration.clone(),
                distance_value: Some(route.distance),
                duration_value: None,
                safety_score: route.safety_score,
            },
            path,
        };

        let mut state = self.state.lock();
        state.generation += 1;
        state.phase = TripPhase::RouteReady(Box::new(trip.clone()));
        info!(id = %route.id, "saved route re-applied");
        Ok(trip)
    }

    /// Saved-route history, newest first
    ///
    /// # Errors
    ///
    /// Storage errors pass through.
    pub async fn history(&self) -> Result<Vec<SavedRoute>, ApplicationError> {
        self.routes.list().await
    }

    /// Delete a saved route by id; returns whether it existed
    ///
    /// # Errors
    ///
    /// Storage errors pass through.
    pub async fn delete_saved(&self, id: &str) -> Result<bool, ApplicationError> {
        self.routes.remove(id).await
    }

    async fn resolve_endpoint(
        &self,
        endpoint: &RouteEndpoint,
    ) -> Result<Coordinate, ApplicationError> {
        match endpoint {
            RouteEndpoint::Position(position) => Ok(*position),
            RouteEndpoint::Address(text) => {
                if !endpoint.is_geocodable() {
                    // Noise heuristic, not a correctness rule: skip the
                    // network entirely for throwaway-short text.
                    return Err(ApplicationError::GeocodeFailed(format!(
                        "address too short to search: '{text}'"
                    )));
                }
                match self.geocoder.geocode(text).await? {
                    Some(position) => Ok(position),
                    None => Err(ApplicationError::GeocodeFailed(format!(
                        "address not found: '{text}'"
                    ))),
                }
            },
        }
    }

    /// Record a failure unless the session was discarded in the meantime
    fn fail(
        &self,
        generation: u64,
        err: ApplicationError,
    ) -> Result<Option<PlannedTrip>, ApplicationError> {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(error = %err, "dropping failure from a discarded session");
            return Ok(None);
        }
        warn!(error = %err, "trip planning failed");
        state.phase = TripPhase::Failed(err.to_string());
        drop(state);
        Err(err)
    }

    /// Apply a transition unless the session was discarded in the meantime
    fn advance(&self, generation: u64, phase: TripPhase) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            return false;
        }
        state.phase = phase;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Notify;

    use super::*;
    use crate::ports::{MockGeocodingPort, MockRouteStorePort, MockRoutingPort};

    fn position(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new_unchecked(latitude, longitude)
    }

    fn sample_path() -> Vec<Coordinate> {
        vec![
            position(-23.5505, -46.6333),
            position(-23.5550, -46.6450),
            position(-23.5614, -46.6559),
        ]
    }

    fn sample_preview() -> RoutePreview {
        RoutePreview {
            polyline: polyline::encode(&sample_path()),
            distance_text: Some("5.2 km".to_string()),
            duration_text: Some("12 mins".to_string()),
            distance_value: Some(5.2),
            duration_value: Some(12.0),
            safety_score: Some(87.0),
        }
    }

    fn planner_with(
        geocoder: MockGeocodingPort,
        routing: MockRoutingPort,
        routes: MockRouteStorePort,
    ) -> TripPlanner {
        TripPlanner::new(Arc::new(geocoder), Arc::new(routing), Arc::new(routes))
    }

    fn echo_store() -> MockRouteStorePort {
        let mut routes = MockRouteStorePort::new();
        routes.expect_add().returning(|payload| {
            Ok(SavedRoute::from_payload(
                payload,
                "route-1".to_string(),
                Utc::now(),
            ))
        });
        routes
    }

    #[tokio::test]
    async fn gps_origin_and_text_destination_reach_route_ready() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_geocode()
            .withf(|address| address == "Avenida Paulista, 1000")
            .times(1)
            .returning(|_| Ok(Some(position(-23.5614, -46.6559))));

        let mut routing = MockRoutingPort::new();
        routing
            .expect_preview_route()
            .times(1)
            .returning(|_, _| Ok(sample_preview()));

        let planner = planner_with(geocoder, routing, MockRouteStorePort::new());
        let trip = planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                RouteEndpoint::address("Avenida Paulista, 1000").expect("valid"),
            )
            .await
            .expect("plan succeeds")
            .expect("not discarded");

        assert_eq!(trip.path.len(), 3);
        assert_eq!(trip.preview.distance_value, Some(5.2));
        assert_eq!(trip.destination_label, "Avenida Paulista, 1000");
        assert!(matches!(planner.phase(), TripPhase::RouteReady(_)));
    }

    #[tokio::test]
    async fn origin_failure_short_circuits_destination() {
        let mut geocoder = MockGeocodingPort::new();
        // Exactly one geocode call: the origin. The destination must
        // never be attempted.
        geocoder
            .expect_geocode()
            .withf(|address| address == "nowhere at all")
            .times(1)
            .returning(|_| Ok(None));

        let planner = planner_with(
            geocoder,
            MockRoutingPort::new(),
            MockRouteStorePort::new(),
        );
        let result = planner
            .plan_trip(
                RouteEndpoint::address("nowhere at all").expect("valid"),
                RouteEndpoint::address("Avenida Paulista, 1000").expect("valid"),
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::GeocodeFailed(_))));
        assert!(matches!(planner.phase(), TripPhase::Failed(_)));
    }

    #[tokio::test]
    async fn short_address_never_triggers_a_geocode_call() {
        // No expectations registered: any geocode call would panic.
        let planner = planner_with(
            MockGeocodingPort::new(),
            MockRoutingPort::new(),
            MockRouteStorePort::new(),
        );
        let result = planner
            .plan_trip(
                RouteEndpoint::address("abc").expect("valid"),
                position(-23.5614, -46.6559).into(),
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::GeocodeFailed(_))));
    }

    #[tokio::test]
    async fn empty_polyline_becomes_no_route_found() {
        let mut routing = MockRoutingPort::new();
        routing.expect_preview_route().returning(|_, _| {
            Ok(RoutePreview {
                polyline: String::new(),
                ..sample_preview()
            })
        });

        let planner = planner_with(
            MockGeocodingPort::new(),
            routing,
            MockRouteStorePort::new(),
        );
        let result = planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                position(-23.5614, -46.6559).into(),
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::NoRouteFound)));
        let TripPhase::Failed(message) = planner.phase() else {
            unreachable!("expected a failed phase");
        };
        assert!(message.contains("trace a route"));
    }

    #[tokio::test]
    async fn gateway_error_surfaces_as_network_failure() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_preview_route()
            .returning(|_, _| Err(ApplicationError::Network("connection refused".to_string())));

        let planner = planner_with(
            MockGeocodingPort::new(),
            routing,
            MockRouteStorePort::new(),
        );
        let result = planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                position(-23.5614, -46.6559).into(),
            )
            .await;

        assert!(matches!(result, Err(ApplicationError::Network(_))));
        planner.acknowledge_error();
        assert_eq!(planner.phase(), TripPhase::Idle);
    }

    #[tokio::test]
    async fn planning_is_rejected_while_navigating() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_preview_route()
            .returning(|_, _| Ok(sample_preview()));

        let planner = planner_with(MockGeocodingPort::new(), routing, echo_store());
        planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                position(-23.5614, -46.6559).into(),
            )
            .await
            .expect("plan succeeds");
        planner.start_navigation().expect("route is ready");

        let result = planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                position(-23.5614, -46.6559).into(),
            )
            .await;
        assert!(matches!(result, Err(ApplicationError::SessionActive)));

        planner.finish_navigation();
        assert_eq!(planner.phase(), TripPhase::Idle);
        assert!(!planner.is_navigating());
    }

    /// Routing stub that holds the reply until the test releases it.
    struct HeldRouting {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl RoutingPort for HeldRouting {
        async fn preview_route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
        ) -> Result<RoutePreview, ApplicationError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(sample_preview())
        }
    }

    #[tokio::test]
    async fn late_gateway_reply_after_discard_is_silently_ignored() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let routing = Arc::new(HeldRouting {
            entered: entered.clone(),
            release: release.clone(),
        });
        let planner = Arc::new(TripPlanner::new(
            Arc::new(MockGeocodingPort::new()),
            routing,
            Arc::new(MockRouteStorePort::new()),
        ));

        let in_flight = {
            let planner = planner.clone();
            tokio::spawn(async move {
                planner
                    .plan_trip(
                        position(-23.5505, -46.6333).into(),
                        position(-23.5614, -46.6559).into(),
                    )
                    .await
            })
        };

        entered.notified().await;
        planner.discard();
        release.notify_one();

        let result = in_flight.await.expect("task completes").expect("no error");
        assert!(result.is_none());
        assert_eq!(planner.phase(), TripPhase::Idle);
    }

    #[tokio::test]
    async fn quick_start_save_names_route_after_destination() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_geocode()
            .returning(|_| Ok(Some(position(-23.5614, -46.6559))));
        let mut routing = MockRoutingPort::new();
        routing
            .expect_preview_route()
            .returning(|_, _| Ok(sample_preview()));

        let planner = planner_with(geocoder, routing, echo_store());
        planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                RouteEndpoint::address("Avenida Paulista, 1000").expect("valid"),
            )
            .await
            .expect("plan succeeds");

        planner.start_navigation().expect("route is ready");
        let saved = planner
            .save(SaveOptions::QuickStart)
            .await
            .expect("save succeeds");

        assert_eq!(saved.name, "Quick route: Avenida Paulista");
        assert_eq!(saved.visibility, RouteVisibility::Private);
        assert_eq!(saved.reason, "Quick start");
        // Still navigating, so the ready route is kept.
        assert!(matches!(planner.phase(), TripPhase::RouteReady(_)));
    }

    #[tokio::test]
    async fn save_returns_to_idle() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_preview_route()
            .returning(|_, _| Ok(sample_preview()));

        let planner = planner_with(MockGeocodingPort::new(), routing, echo_store());
        planner
            .plan_trip(
                position(-23.5505, -46.6333).into(),
                position(-23.5614, -46.6559).into(),
            )
            .await
            .expect("plan succeeds");

        let saved = planner
            .save(SaveOptions::Configured {
                name: "Evening walk".to_string(),
                visibility: RouteVisibility::Group,
                members: vec!["ana@example.com".to_string()],
                reason: "Avoids the dark underpass".to_string(),
            })
            .await
            .expect("save succeeds");

        assert_eq!(saved.id, "route-1");
        assert_eq!(saved.name, "Evening walk");
        assert!((saved.distance - 5.2).abs() < f64::EPSILON);
        assert_eq!(planner.phase(), TripPhase::Idle);
    }

    #[tokio::test]
    async fn save_without_ready_route_is_invalid() {
        let planner = planner_with(
            MockGeocodingPort::new(),
            MockRoutingPort::new(),
            MockRouteStorePort::new(),
        );
        let result = planner.save(SaveOptions::QuickStart).await;
        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }

    #[tokio::test]
    async fn apply_saved_reaches_route_ready_without_gateway() {
        // No routing expectations: any gateway call would panic.
        let planner = planner_with(
            MockGeocodingPort::new(),
            MockRoutingPort::new(),
            MockRouteStorePort::new(),
        );

        let stored = SavedRoute::from_payload(
            NewSavedRoute {
                name: "Evening walk".to_string(),
                origin_address: "Home".to_string(),
                destination_address: "Avenida Paulista, 1000".to_string(),
                origin: position(-23.5505, -46.6333),
                destination: position(-23.5614, -46.6559),
                polyline: polyline::encode(&sample_path()),
                distance: 5.2,
                duration: Some("12 mins".to_string()),
                safety_score: None,
                visibility: RouteVisibility::Private,
                members: Vec::new(),
                reason: "Quick start".to_string(),
            },
            "route-7".to_string(),
            Utc::now(),
        );

        let trip = planner.apply_saved(&stored).expect("applies");
        assert_eq!(trip.path.len(), 3);
        assert_eq!(trip.preview.distance_value, Some(5.2));
        assert!(matches!(planner.phase(), TripPhase::RouteReady(_)));
    }

    #[tokio::test]
    async fn apply_saved_rejects_unusable_polyline() {
        let planner = planner_with(
            MockGeocodingPort::new(),
            MockRoutingPort::new(),
            MockRouteStorePort::new(),
        );
        let stored = SavedRoute::from_payload(
            NewSavedRoute {
                name: "Broken".to_string(),
                origin_address: "A".to_string(),
                destination_address: "B".to_string(),
                origin: position(0.0, 0.0),
                destination: position(0.0, 0.0),
                polyline: String::new(),
                distance: 0.0,
                duration: None,
                safety_score: None,
                visibility: RouteVisibility::Private,
                members: Vec::new(),
                reason: String::new(),
            },
            "route-8".to_string(),
            Utc::now(),
        );

        let result = planner.apply_saved(&stored);
        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }
}
