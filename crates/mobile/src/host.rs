//! Interfaces the Kotlin/Swift host implements.
//!
//! Asynchronous platform APIs keep their native callback shape: the host is
//! handed a callback object and completes it once, from any thread.

use std::sync::Arc;

use park_it_core::{directions::Route, position::Coordinates, ui::render::MapSpec};

use crate::bridge::{PositionCallback, RouteCallback};

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for Position {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}

impl From<Position> for Coordinates {
    fn from(position: Position) -> Self {
        Coordinates::new(position.latitude, position.longitude)
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct MapOptions {
    pub center: Position,
    pub zoom: u8,
    pub marker: Option<Position>,
}

impl From<&MapSpec> for MapOptions {
    fn from(spec: &MapSpec) -> Self {
        Self {
            center: spec.center.into(),
            zoom: spec.zoom,
            marker: spec.marker.map(Position::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct RouteOptions {
    pub origin: Position,
    pub destination: Position,
    /// `DRIVING`, `WALKING`, `BICYCLING` or `TRANSIT`.
    pub travel_mode: String,
}

/// A calculated route as the host's directions API reports it.
#[derive(Clone, Debug, Default, PartialEq, uniffi::Record)]
pub struct RouteResult {
    pub path: Vec<Position>,
    pub steps: Vec<String>,
}

impl From<RouteResult> for Route {
    fn from(result: RouteResult) -> Self {
        Route {
            path: result.path.into_iter().map(Coordinates::from).collect(),
            steps: result.steps,
        }
    }
}

impl From<Route> for RouteResult {
    fn from(route: Route) -> Self {
        Self {
            path: route.path.into_iter().map(Position::from).collect(),
            steps: route.steps,
        }
    }
}

/// A route ready to draw: the path as a GeoJSON `LineString` geometry.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct RouteOverlay {
    pub path_geojson: String,
    pub steps: Vec<String>,
}

#[uniffi::export(with_foreign)]
pub trait HostGeolocation: Send + Sync {
    /// Must eventually call `success` or `failure` on `callback`, once.
    fn request_position(&self, high_accuracy: bool, callback: Arc<PositionCallback>);
}

#[uniffi::export(with_foreign)]
pub trait HostDirections: Send + Sync {
    /// Must eventually call `complete` on `callback`, once.
    fn request_route(&self, options: RouteOptions, callback: Arc<RouteCallback>);
}

#[uniffi::export(with_foreign)]
pub trait HostStorage: Send + Sync {
    fn get_item(&self, key: String) -> Option<String>;
    fn set_item(&self, key: String, value: String);
    fn remove_item(&self, key: String);
}

#[uniffi::export(with_foreign)]
pub trait HostNotifier: Send + Sync {
    fn alert(&self, message: String);
}

#[uniffi::export(with_foreign)]
pub trait HostPage: Send + Sync {
    fn append_stylesheet(&self, rel: String, mime_type: String, href: String);
    fn set_style(&self, element_id: String, property: String, value: String);
    fn clear_content(&self, element_id: String);
}

#[uniffi::export(with_foreign)]
pub trait HostMap: Send + Sync {
    fn show_map(&self, options: MapOptions);
    fn render_route(&self, overlay: RouteOverlay, panel_id: String);
}

#[uniffi::export(with_foreign)]
pub trait HostStatusBar: Send + Sync {
    fn overlays_web_view(&self, overlays: bool);
    fn style_default(&self);
    fn background_color_by_hex_string(&self, color: String);
}
