//! App configuration. Every field has a default, so an empty JSON object is
//! a complete configuration.

use serde::{Deserialize, Serialize};

use crate::directions::TravelMode;

#[derive(Debug, thiserror::Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ParkItConfig {
    /// Zoom level of every map the app draws.
    pub map_zoom: u8,
    pub travel_mode: TravelMode,
    /// Status bar background on the Android family.
    pub status_bar_color: String,
    pub ios_stylesheet: String,
    pub android_stylesheet: String,
    pub saved_message: String,
    pub missing_location_message: String,
}

impl Default for ParkItConfig {
    fn default() -> Self {
        Self {
            map_zoom: 16,
            travel_mode: TravelMode::Driving,
            status_bar_color: "#1565C0".to_owned(),
            ios_stylesheet: "parkItIOS.css".to_owned(),
            android_stylesheet: "parkItAndroid.css".to_owned(),
            saved_message: "The parking location is successfully saved".to_owned(),
            missing_location_message: "No parking location has been saved yet".to_owned(),
        }
    }
}

impl ParkItConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
