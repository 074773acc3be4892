use std::sync::Arc;

use park_it_core::{
    config::ParkItConfig,
    parking::{ParkingController, Services},
    platform::{DeviceFamily, bootstrap::{Bootstrap, ReadyOutcome}},
};

use crate::{
    bridge::{
        DirectionsBridge, GeolocationBridge, MapBridge, NotifierBridge, PageBridge,
        StatusBarBridge, StorageBridge,
    },
    host::{
        HostDirections, HostGeolocation, HostMap, HostNotifier, HostPage, HostStatusBar,
        HostStorage, Position, RouteResult,
    },
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ParkItError {
    #[error("{0}")]
    LocationUnavailable(String),
    #[error("{0}")]
    RouteCalculationFailed(String),
    #[error("{0}")]
    MissingParkedLocation(String),
    #[error("{0}")]
    RequestInFlight(String),
    #[error("{0}")]
    Storage(String),
    #[error("{0}")]
    Config(String),
}

impl From<park_it_core::Error> for ParkItError {
    fn from(error: park_it_core::Error) -> Self {
        use park_it_core::Error;

        let message = error.to_string();
        match error {
            Error::LocationUnavailable(_) => ParkItError::LocationUnavailable(message),
            Error::RouteCalculationFailed { .. } => ParkItError::RouteCalculationFailed(message),
            Error::MissingParkedLocation | Error::CorruptParkedLocation { .. } => {
                ParkItError::MissingParkedLocation(message)
            }
            Error::RequestInFlight => ParkItError::RequestInFlight(message),
            Error::Storage(_) => ParkItError::Storage(message),
            Error::Config(_) => ParkItError::Config(message),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum Platform {
    Ios,
    Android,
}

impl From<DeviceFamily> for Platform {
    fn from(family: DeviceFamily) -> Self {
        match family {
            DeviceFamily::Ios => Platform::Ios,
            DeviceFamily::Android => Platform::Android,
        }
    }
}

/// The whole app, as seen from Kotlin/Swift.
#[derive(uniffi::Object)]
pub struct ParkItApp {
    bootstrap: Bootstrap,
    controller: ParkingController,
}

#[uniffi::export]
impl ParkItApp {
    /// `config_json` overrides any subset of the defaults; `None` keeps them all.
    #[uniffi::constructor]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config_json: Option<String>,
        geolocation: Arc<dyn HostGeolocation>,
        directions: Arc<dyn HostDirections>,
        storage: Arc<dyn HostStorage>,
        notifier: Arc<dyn HostNotifier>,
        page: Arc<dyn HostPage>,
        map: Arc<dyn HostMap>,
        status_bar: Arc<dyn HostStatusBar>,
    ) -> Result<Self, ParkItError> {
        let config = match config_json {
            Some(json) => ParkItConfig::from_json(&json).map_err(park_it_core::Error::from)?,
            None => ParkItConfig::default(),
        };

        let page = Arc::new(PageBridge(page));
        let services = Services {
            location: Arc::new(GeolocationBridge(geolocation)),
            directions: Arc::new(DirectionsBridge(directions)),
            storage: Arc::new(StorageBridge(storage)),
            notifier: Arc::new(NotifierBridge(notifier)),
            page: page.clone(),
            map: Arc::new(MapBridge(map)),
        };

        Ok(Self {
            bootstrap: Bootstrap::new(
                config.clone(),
                page,
                Arc::new(StatusBarBridge(status_bar)),
            ),
            controller: ParkingController::new(config, services),
        })
    }

    /// Call once from the page's load handler. Returns `false` on repeats.
    pub fn initialize(&self) -> bool {
        self.bootstrap.initialize()
    }

    /// Call from the platform's device-ready event. Returns the styling that
    /// was applied, or `None` if the event was ignored.
    pub fn on_device_ready(&self, platform_id: String) -> Option<Platform> {
        match self.bootstrap.on_device_ready(&platform_id) {
            ReadyOutcome::Configured(family) => Some(family.into()),
            ReadyOutcome::NotListening | ReadyOutcome::AlreadyReady(_) => None,
        }
    }

    /// The "Park" button.
    pub async fn set_parking_location(&self) -> Result<Position, ParkItError> {
        Ok(self.controller.save_current_location().await?.into())
    }

    /// The "Find my car" button.
    pub async fn get_parking_location(&self) -> Result<RouteResult, ParkItError> {
        Ok(self.controller.recall_parking_location().await?.into())
    }

    pub fn show_parking_location(&self) -> Result<Position, ParkItError> {
        Ok(self.controller.show_parking_location()?.into())
    }

    pub fn set_css(&self, element_id: String, property: String, value: String) {
        self.controller.set_style(&element_id, &property, &value);
    }
}
