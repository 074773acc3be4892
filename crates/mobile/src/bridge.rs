//! Adapters from the host interfaces to the core collaborator traits.

use std::sync::{Arc, Mutex, PoisonError};

use futures_core::future::BoxFuture;
use park_it_core::{
    directions::{DirectionsResponse, DirectionsService, Route, RouteRequest},
    platform::StatusBar,
    position::{Coordinates, LocationService, PositionError, PositionOptions},
    storage::{KeyValueStore, StorageError},
    ui::{
        ElementId, Notifier, Page, StylesheetLink,
        render::{MapSpec, MapView},
    },
};
use tokio::sync::oneshot;
use tracing::{error, warn};

use crate::host::{
    HostDirections, HostGeolocation, HostMap, HostNotifier, HostPage, HostStatusBar, HostStorage,
    MapOptions, RouteOptions, RouteOverlay, RouteResult,
};

/// Reported when the host drops a route callback without completing it.
const ABANDONED_ROUTE_STATUS: &str = "UNKNOWN_ERROR";

/// One-shot completion handle for a position request.
#[derive(uniffi::Object)]
pub struct PositionCallback {
    sender: Mutex<Option<oneshot::Sender<Result<Coordinates, PositionError>>>>,
}

impl PositionCallback {
    fn new(sender: oneshot::Sender<Result<Coordinates, PositionError>>) -> Self {
        Self {
            sender: Mutex::new(Some(sender)),
        }
    }

    fn complete(&self, result: Result<Coordinates, PositionError>) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            Some(sender) => {
                let _ = sender.send(result);
            }
            None => warn!("position callback completed twice, ignoring"),
        }
    }
}

#[uniffi::export]
impl PositionCallback {
    /// Non-finite coordinates are reported as position-unavailable.
    pub fn success(&self, latitude: f64, longitude: f64) {
        let position = Coordinates::new(latitude, longitude);
        if !position.is_finite() {
            warn!(latitude, longitude, "host reported a non-finite position");
            self.complete(Err(PositionError::new(
                PositionError::POSITION_UNAVAILABLE,
                "Position is not a finite coordinate",
            )));
            return;
        }

        self.complete(Ok(position));
    }

    pub fn failure(&self, code: u16, message: String) {
        self.complete(Err(PositionError::new(code, message)));
    }
}

/// One-shot completion handle for a route request.
#[derive(uniffi::Object)]
pub struct RouteCallback {
    sender: Mutex<Option<oneshot::Sender<DirectionsResponse>>>,
}

impl RouteCallback {
    fn new(sender: oneshot::Sender<DirectionsResponse>) -> Self {
        Self {
            sender: Mutex::new(Some(sender)),
        }
    }
}

#[uniffi::export]
impl RouteCallback {
    /// `route` is only looked at when `status` is `"OK"`.
    pub fn complete(&self, status: String, route: Option<RouteResult>) {
        let response = match route {
            Some(route) if status == "OK" => DirectionsResponse::ok(route.into()),
            _ => DirectionsResponse::failed(status),
        };

        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            Some(sender) => {
                let _ = sender.send(response);
            }
            None => warn!("route callback completed twice, ignoring"),
        }
    }
}

pub(crate) struct GeolocationBridge(pub Arc<dyn HostGeolocation>);

impl LocationService for GeolocationBridge {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<Coordinates, PositionError>> {
        let (sender, receiver) = oneshot::channel();
        self.0.request_position(
            options.enable_high_accuracy,
            Arc::new(PositionCallback::new(sender)),
        );

        Box::pin(async move {
            receiver.await.unwrap_or_else(|_| {
                Err(PositionError::new(
                    PositionError::POSITION_UNAVAILABLE,
                    "location request was abandoned",
                ))
            })
        })
    }
}

pub(crate) struct DirectionsBridge(pub Arc<dyn HostDirections>);

impl DirectionsService for DirectionsBridge {
    fn route(&self, request: RouteRequest) -> BoxFuture<'_, DirectionsResponse> {
        let (sender, receiver) = oneshot::channel();
        self.0.request_route(
            RouteOptions {
                origin: request.origin.into(),
                destination: request.destination.into(),
                travel_mode: request.travel_mode.as_str().to_owned(),
            },
            Arc::new(RouteCallback::new(sender)),
        );

        Box::pin(async move {
            receiver
                .await
                .unwrap_or_else(|_| DirectionsResponse::failed(ABANDONED_ROUTE_STATUS))
        })
    }
}

pub(crate) struct StorageBridge(pub Arc<dyn HostStorage>);

impl KeyValueStore for StorageBridge {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.get_item(key.to_owned()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set_item(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove_item(key.to_owned());
        Ok(())
    }
}

pub(crate) struct NotifierBridge(pub Arc<dyn HostNotifier>);

impl Notifier for NotifierBridge {
    fn alert(&self, message: &str) {
        self.0.alert(message.to_owned());
    }
}

pub(crate) struct PageBridge(pub Arc<dyn HostPage>);

impl Page for PageBridge {
    fn append_stylesheet(&self, link: &StylesheetLink) {
        self.0.append_stylesheet(
            link.rel.to_owned(),
            link.mime_type.to_owned(),
            link.href.clone(),
        );
    }

    fn set_style(&self, element_id: &str, property: &str, value: &str) {
        self.0
            .set_style(element_id.to_owned(), property.to_owned(), value.to_owned());
    }

    fn clear_content(&self, element_id: &str) {
        self.0.clear_content(element_id.to_owned());
    }
}

pub(crate) struct MapBridge(pub Arc<dyn HostMap>);

impl MapView for MapBridge {
    fn show_map(&self, spec: &MapSpec) {
        self.0.show_map(MapOptions::from(spec));
    }

    fn render_route(&self, route: &Route, panel: ElementId) {
        match route_overlay(route) {
            Ok(overlay) => self.0.render_route(overlay, panel.as_str().to_owned()),
            Err(e) => error!(%e, "failed to encode route path"),
        }
    }
}

pub(crate) fn route_overlay(route: &Route) -> Result<RouteOverlay, serde_json::Error> {
    let line = route
        .path
        .iter()
        .map(|point| vec![point.longitude, point.latitude])
        .collect();
    let geometry = geojson::Geometry::new(geojson::Value::LineString(line));

    Ok(RouteOverlay {
        path_geojson: serde_json::to_string(&geometry)?,
        steps: route.steps.clone(),
    })
}

pub(crate) struct StatusBarBridge(pub Arc<dyn HostStatusBar>);

impl StatusBar for StatusBarBridge {
    fn overlays_web_view(&self, overlays: bool) {
        self.0.overlays_web_view(overlays);
    }

    fn style_default(&self) {
        self.0.style_default();
    }

    fn background_color_by_hex_string(&self, color: &str) {
        self.0.background_color_by_hex_string(color.to_owned());
    }
}
