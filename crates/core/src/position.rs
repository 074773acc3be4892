//! Device geolocation: the coordinate type and the location service seam.

use std::fmt;

use futures_core::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        use geo::{Distance, Haversine};

        Haversine.distance(geo::Point::from(*self), geo::Point::from(other))
    }
}

impl From<Coordinates> for geo::Point {
    fn from(coordinates: Coordinates) -> Self {
        geo::Point::new(coordinates.longitude, coordinates.latitude)
    }
}

impl From<geo::Point> for Coordinates {
    fn from(point: geo::Point) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
}

impl PositionOptions {
    pub fn high_accuracy() -> Self {
        Self {
            enable_high_accuracy: true,
        }
    }
}

/// Failure reported by the platform location service.
///
/// Codes follow the W3C geolocation API: 1 permission denied, 2 position
/// unavailable, 3 timeout. Hosts may report other codes; they are passed
/// through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionError {
    pub code: u16,
    pub message: String,
}

impl PositionError {
    pub const PERMISSION_DENIED: u16 = 1;
    pub const POSITION_UNAVAILABLE: u16 = 2;
    pub const TIMEOUT: u16 = 3;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error code: {}\nError message: {}",
            self.code, self.message
        )
    }
}

impl std::error::Error for PositionError {}

/// Source of the device's current position.
pub trait LocationService: Send + Sync {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<Coordinates, PositionError>>;
}
