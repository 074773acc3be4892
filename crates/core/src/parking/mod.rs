//! The parking-location controller: the user-facing save and recall flows.
//!
//! Each flow is one position request and, for recall, one route request.
//! State changes go through [`AppState`]; drawing goes through render plans.

use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use crate::{
    Error, Result,
    config::ParkItConfig,
    directions::{DirectionsService, Route, RouteRequest},
    parking::state::{AppState, FlowKind},
    position::{Coordinates, LocationService, PositionError, PositionOptions},
    storage::{KeyValueStore, read_parked_location, write_parked_location},
    ui::{
        ElementId, Notifier, Page,
        render::{MapView, RenderPlan},
    },
};

pub mod state;

/// The platform collaborators the controller drives.
#[derive(Clone)]
pub struct Services {
    pub location: Arc<dyn LocationService>,
    pub directions: Arc<dyn DirectionsService>,
    pub storage: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
    pub page: Arc<dyn Page>,
    pub map: Arc<dyn MapView>,
}

pub struct ParkingController {
    config: ParkItConfig,
    services: Services,
    state: Mutex<AppState>,
}

/// An outstanding flow. Dropping it before `finish` returns the state to
/// idle, so a cancelled future never blocks the next user action.
struct Flight<'a> {
    state: &'a Mutex<AppState>,
    kind: FlowKind,
    finished: bool,
}

impl Flight<'_> {
    fn update(&self, f: impl FnOnce(&mut AppState)) {
        f(&mut *self.state.lock().unwrap_or_else(PoisonError::into_inner));
    }

    fn finish(mut self, f: impl FnOnce(&mut AppState)) {
        self.update(f);
        self.finished = true;
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!(flow = <&str>::from(self.kind), "flow abandoned");
            self.update(AppState::abandon);
        }
    }
}

impl ParkingController {
    pub fn new(config: ParkItConfig, services: Services) -> Self {
        Self {
            config,
            services,
            state: Mutex::new(AppState::default()),
        }
    }

    pub fn config(&self) -> &ParkItConfig {
        &self.config
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.lock_state().clone()
    }

    /// Saves the device's current position as the parking location and
    /// shows it on the map.
    pub async fn save_current_location(&self) -> Result<Coordinates> {
        let flight = self.begin(FlowKind::Save)?;

        let position = match self.request_position().await {
            Ok(position) => position,
            Err(e) => return Err(self.fail(flight, e)),
        };
        flight.update(|state| state.position_acquired(position));

        if let Err(e) = write_parked_location(self.services.storage.as_ref(), position) {
            return Err(self.fail(flight, e.into()));
        }

        self.services.notifier.alert(&self.config.saved_message);
        RenderPlan::location(position, self.config.map_zoom)
            .apply(self.services.page.as_ref(), self.services.map.as_ref());

        flight.finish(|state| state.saved(position));
        info!(
            latitude = position.latitude,
            longitude = position.longitude,
            "parking location saved"
        );

        Ok(position)
    }

    /// Gets the device's current position and draws the route from there to
    /// the saved parking location.
    pub async fn recall_parking_location(&self) -> Result<Route> {
        let flight = self.begin(FlowKind::Recall)?;

        let current = match self.request_position().await {
            Ok(position) => position,
            Err(e) => return Err(self.fail(flight, e)),
        };
        flight.update(|state| state.position_acquired(current));

        let parked = match read_parked_location(self.services.storage.as_ref()) {
            Ok(Some(parked)) => parked,
            Ok(None) => return Err(self.fail(flight, Error::MissingParkedLocation)),
            Err(e) => return Err(self.fail(flight, e)),
        };
        flight.update(|state| state.route_requested(parked));

        RenderPlan::directions(current, self.config.map_zoom)
            .apply(self.services.page.as_ref(), self.services.map.as_ref());

        debug!(
            distance_m = current.distance_to(parked),
            travel_mode = self.config.travel_mode.as_str(),
            "requesting route to parking location"
        );
        let response = self
            .services
            .directions
            .route(RouteRequest {
                origin: current,
                destination: parked,
                travel_mode: self.config.travel_mode,
            })
            .await;

        let Some(route) = response.drawable_route() else {
            let status = response.status.as_str().to_owned();
            warn!(status, "route calculation failed");
            return Err(self.fail(flight, Error::RouteCalculationFailed { status }));
        };

        let panel = ElementId::Directions;
        self.services.page.clear_content(panel.as_str());
        self.services.map.render_route(route, panel);

        flight.finish(AppState::displayed);
        info!(steps = route.steps.len(), "directions to parking location shown");

        Ok(route.clone())
    }

    /// Shows the saved parking location on the map without asking for the
    /// device position.
    pub fn show_parking_location(&self) -> Result<Coordinates> {
        let remembered = self.lock_state().parked;
        let parked = match remembered {
            Some(parked) => parked,
            None => read_parked_location(self.services.storage.as_ref())?
                .ok_or(Error::MissingParkedLocation)?,
        };

        RenderPlan::location(parked, self.config.map_zoom)
            .apply(self.services.page.as_ref(), self.services.map.as_ref());
        self.lock_state().parked = Some(parked);

        Ok(parked)
    }

    pub fn set_style(&self, element_id: &str, property: &str, value: &str) {
        if ElementId::from_str(element_id).is_err() {
            debug!(element_id, "styling an element the app does not manage");
        }
        self.services.page.set_style(element_id, property, value);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, kind: FlowKind) -> Result<Flight<'_>> {
        if let Err(e) = self.lock_state().begin(kind) {
            debug!(flow = <&str>::from(kind), "ignoring action, request in flight");
            return Err(e);
        }

        Ok(Flight {
            state: &self.state,
            kind,
            finished: false,
        })
    }

    async fn request_position(&self) -> Result<Coordinates> {
        let position = self
            .services
            .location
            .current_position(PositionOptions::high_accuracy())
            .await?;

        if !position.is_finite() {
            return Err(PositionError::new(
                PositionError::POSITION_UNAVAILABLE,
                "Position is not a finite coordinate",
            )
            .into());
        }

        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "position acquired"
        );
        Ok(position)
    }

    fn fail(&self, flight: Flight<'_>, error: Error) -> Error {
        match &error {
            Error::Storage(_) | Error::CorruptParkedLocation { .. } => {
                error!(flow = <&str>::from(flight.kind), %error, "flow failed")
            }
            _ => info!(flow = <&str>::from(flight.kind), %error, "flow failed"),
        }

        if let Some(message) = self.alert_text(&error) {
            self.services.notifier.alert(&message);
        }

        let kind = flight.kind;
        flight.finish(|state| state.failed(kind));
        error
    }

    fn alert_text(&self, error: &Error) -> Option<String> {
        match error {
            Error::LocationUnavailable(_)
            | Error::RouteCalculationFailed { .. }
            | Error::Storage(_) => Some(error.to_string()),
            Error::MissingParkedLocation | Error::CorruptParkedLocation { .. } => {
                Some(self.config.missing_location_message.clone())
            }
            Error::RequestInFlight | Error::Config(_) => None,
        }
    }
}
