//! # park-it-core
//!
//! Platform-independent core of the Park It app: remember where the car was
//! parked and get driving directions back to it.
//!
//! Every platform API the app touches (geolocation, key-value storage, the
//! page, the map, the status bar, alerts) is a trait. The mobile crate
//! implements them over Kotlin/Swift host callbacks; tests implement them
//! with recording doubles.
//!
//! ## Example
//!
//! ```
//! use park_it_core::prelude::*;
//!
//! let store = MemoryStore::default();
//! write_parked_location(&store, Coordinates::new(37.0, -122.0)).unwrap();
//!
//! assert_eq!(store.get_item(PARKED_LATITUDE_KEY).unwrap().as_deref(), Some("37"));
//! assert_eq!(
//!     read_parked_location(&store).unwrap(),
//!     Some(Coordinates::new(37.0, -122.0))
//! );
//! ```

pub mod config;
pub mod directions;
pub mod error;
pub mod parking;
pub mod platform;
pub mod position;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::config::ParkItConfig;
    pub use crate::directions::{
        DirectionsResponse, DirectionsService, Route, RouteRequest, RouteStatus, TravelMode,
    };
    pub use crate::error::{Error, Result};
    pub use crate::parking::{
        ParkingController, Services,
        state::{AppState, FlowKind, FlowPhase},
    };
    pub use crate::platform::{
        DeviceFamily, StatusBar, StatusBarConfig,
        bootstrap::{Bootstrap, ReadyOutcome},
    };
    pub use crate::position::{Coordinates, LocationService, PositionError, PositionOptions};
    pub use crate::storage::{
        KeyValueStore, PARKED_LATITUDE_KEY, PARKED_LONGITUDE_KEY, StorageError,
        file::JsonFileStore, memory::MemoryStore, read_parked_location, write_parked_location,
    };
    pub use crate::ui::{
        ElementId, Notifier, Page, StyleChange, StylesheetLink,
        render::{MapSpec, MapView, RenderPlan},
    };
}
