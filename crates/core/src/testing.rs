//! Recording and scripted collaborators for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_core::future::BoxFuture;
use tokio::sync::Notify;

use crate::{
    directions::{DirectionsResponse, DirectionsService, Route, RouteRequest},
    platform::StatusBar,
    position::{Coordinates, LocationService, PositionError, PositionOptions},
    storage::{KeyValueStore, StorageError, memory::MemoryStore},
    ui::{
        ElementId, Notifier, Page, StylesheetLink,
        render::{MapSpec, MapView},
    },
};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Stylesheet(StylesheetLink),
    Style {
        element: String,
        property: String,
        value: String,
    },
    Clear(String),
    Map(MapSpec),
    Route {
        route: Route,
        panel: ElementId,
    },
    Alert(String),
    OverlaysWebView(bool),
    StyleDefault,
    StatusBarColor(String),
}

impl Event {
    pub fn style(element: &str, property: &str, value: &str) -> Self {
        Event::Style {
            element: element.to_owned(),
            property: property.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Page, map, notifier and status bar in one, logging every call in order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn maps(&self) -> Vec<MapSpec> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Map(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Route { route, .. } => Some(route),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

impl Page for Recorder {
    fn append_stylesheet(&self, link: &StylesheetLink) {
        self.push(Event::Stylesheet(link.clone()));
    }

    fn set_style(&self, element_id: &str, property: &str, value: &str) {
        self.push(Event::style(element_id, property, value));
    }

    fn clear_content(&self, element_id: &str) {
        self.push(Event::Clear(element_id.to_owned()));
    }
}

impl MapView for Recorder {
    fn show_map(&self, spec: &MapSpec) {
        self.push(Event::Map(spec.clone()));
    }

    fn render_route(&self, route: &Route, panel: ElementId) {
        self.push(Event::Route {
            route: route.clone(),
            panel,
        });
    }
}

impl Notifier for Recorder {
    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_owned()));
    }
}

impl StatusBar for Recorder {
    fn overlays_web_view(&self, overlays: bool) {
        self.push(Event::OverlaysWebView(overlays));
    }

    fn style_default(&self) {
        self.push(Event::StyleDefault);
    }

    fn background_color_by_hex_string(&self, color: &str) {
        self.push(Event::StatusBarColor(color.to_owned()));
    }
}

/// Hands out queued positions in order. A gated instance holds each request
/// until `release` is called.
#[derive(Default)]
pub struct ScriptedLocation {
    responses: Mutex<VecDeque<Result<Coordinates, PositionError>>>,
    requests: Mutex<Vec<PositionOptions>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedLocation {
    pub fn new(responses: Vec<Result<Coordinates, PositionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn gated(responses: Vec<Result<Coordinates, PositionError>>) -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::new(responses)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn requests(&self) -> Vec<PositionOptions> {
        self.requests.lock().unwrap().clone()
    }
}

impl LocationService for ScriptedLocation {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<Coordinates, PositionError>> {
        self.requests.lock().unwrap().push(options);
        let gate = self.gate.clone();

        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PositionError::new(2, "no scripted position")))
        })
    }
}

pub struct ScriptedDirections {
    response: DirectionsResponse,
    requests: Mutex<Vec<RouteRequest>>,
}

impl ScriptedDirections {
    pub fn new(response: DirectionsResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for ScriptedDirections {
    fn default() -> Self {
        Self::new(DirectionsResponse::failed("NOT_SCRIPTED"))
    }
}

impl DirectionsService for ScriptedDirections {
    fn route(&self, request: RouteRequest) -> BoxFuture<'_, DirectionsResponse> {
        self.requests.lock().unwrap().push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

/// Memory store whose n-th `set_item` call (1-based) fails.
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: usize,
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: MemoryStore::default(),
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(StorageError::Backend("disk full".to_owned()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key)
    }
}
