//! Route calculation between two coordinates.

use futures_core::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::position::Coordinates;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub travel_mode: TravelMode,
}

/// Status string returned by the directions service.
///
/// Only the literal `"OK"` is a success. Everything else, known or not, is an
/// undifferentiated failure that keeps its raw text for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteStatus {
    Ok,
    Failed(String),
}

impl RouteStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => RouteStatus::Ok,
            other => RouteStatus::Failed(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteStatus::Ok => "OK",
            RouteStatus::Failed(status) => status,
        }
    }
}

/// A calculated route: the polyline to draw and the turn-by-turn text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    pub path: Vec<Coordinates>,
    pub steps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionsResponse {
    pub status: RouteStatus,
    pub route: Option<Route>,
}

impl DirectionsResponse {
    pub fn ok(route: Route) -> Self {
        Self {
            status: RouteStatus::Ok,
            route: Some(route),
        }
    }

    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            status: RouteStatus::parse(&status.into()),
            route: None,
        }
    }

    /// The route to draw, if the status allows drawing one.
    pub fn drawable_route(&self) -> Option<&Route> {
        match self.status {
            RouteStatus::Ok => self.route.as_ref(),
            RouteStatus::Failed(_) => None,
        }
    }
}

pub trait DirectionsService: Send + Sync {
    fn route(&self, request: RouteRequest) -> BoxFuture<'_, DirectionsResponse>;
}
