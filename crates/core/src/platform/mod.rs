//! Per-platform presentation: which stylesheet to load and how the native
//! status bar looks.

use crate::{config::ParkItConfig, ui::StylesheetLink};

pub mod bootstrap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceFamily {
    Ios,
    Android,
}

impl DeviceFamily {
    /// Unrecognised platform ids get the Android treatment.
    pub fn from_platform_id(platform_id: &str) -> Self {
        match platform_id {
            "ios" => DeviceFamily::Ios,
            _ => DeviceFamily::Android,
        }
    }

    pub fn is_recognized(platform_id: &str) -> bool {
        matches!(platform_id, "ios" | "android")
    }

    pub fn stylesheet(&self, config: &ParkItConfig) -> StylesheetLink {
        match self {
            DeviceFamily::Ios => StylesheetLink::css(&config.ios_stylesheet),
            DeviceFamily::Android => StylesheetLink::css(&config.android_stylesheet),
        }
    }

    pub fn status_bar(&self, config: &ParkItConfig) -> StatusBarConfig {
        match self {
            DeviceFamily::Ios => StatusBarConfig::Inset,
            DeviceFamily::Android => StatusBarConfig::Background {
                color: config.status_bar_color.clone(),
            },
        }
    }
}

/// The native status bar plugin.
pub trait StatusBar: Send + Sync {
    fn overlays_web_view(&self, overlays: bool);
    fn style_default(&self);
    fn background_color_by_hex_string(&self, color: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusBarConfig {
    /// Status bar sits above the web view, default (dark on light) style.
    Inset,
    Background { color: String },
}

impl StatusBarConfig {
    pub fn apply(&self, status_bar: &dyn StatusBar) {
        match self {
            StatusBarConfig::Inset => {
                status_bar.overlays_web_view(false);
                status_bar.style_default();
            }
            StatusBarConfig::Background { color } => {
                status_bar.background_color_by_hex_string(color);
            }
        }
    }
}
