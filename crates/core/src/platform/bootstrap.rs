//! App start-up: wait for the platform to be ready, then load the device
//! stylesheet and set up the status bar. Runs once per process.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::{
    config::ParkItConfig,
    platform::{DeviceFamily, StatusBar},
    ui::Page,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Created,
    Listening,
    Ready(DeviceFamily),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyOutcome {
    Configured(DeviceFamily),
    /// Readiness arrived before `initialize`.
    NotListening,
    /// Readiness already handled; nothing was touched.
    AlreadyReady(DeviceFamily),
}

pub struct Bootstrap {
    config: ParkItConfig,
    page: Arc<dyn Page>,
    status_bar: Arc<dyn StatusBar>,
    phase: Mutex<Phase>,
}

impl Bootstrap {
    pub fn new(config: ParkItConfig, page: Arc<dyn Page>, status_bar: Arc<dyn StatusBar>) -> Self {
        Self {
            config,
            page,
            status_bar,
            phase: Mutex::new(Phase::Created),
        }
    }

    /// Starts listening for readiness. Returns `false` if already called.
    pub fn initialize(&self) -> bool {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase != Phase::Created {
            return false;
        }

        *phase = Phase::Listening;
        true
    }

    pub fn on_device_ready(&self, platform_id: &str) -> ReadyOutcome {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        match *phase {
            Phase::Created => {
                warn!(platform_id, "device ready before initialize, ignoring");
                return ReadyOutcome::NotListening;
            }
            Phase::Ready(family) => {
                warn!(platform_id, "device ready delivered twice, ignoring");
                return ReadyOutcome::AlreadyReady(family);
            }
            Phase::Listening => {}
        }

        if !DeviceFamily::is_recognized(platform_id) {
            warn!(platform_id, "unrecognized platform, using android styling");
        }

        let family = DeviceFamily::from_platform_id(platform_id);
        self.page.append_stylesheet(&family.stylesheet(&self.config));
        family.status_bar(&self.config).apply(self.status_bar.as_ref());

        *phase = Phase::Ready(family);
        info!(platform_id, family = <&str>::from(family), "device ready");

        ReadyOutcome::Configured(family)
    }

    pub fn device_family(&self) -> Option<DeviceFamily> {
        match *self.phase.lock().unwrap_or_else(PoisonError::into_inner) {
            Phase::Ready(family) => Some(family),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{Event, Recorder},
        ui::StylesheetLink,
    };

    fn bootstrap(recorder: &Recorder) -> Bootstrap {
        Bootstrap::new(
            ParkItConfig::default(),
            Arc::new(recorder.clone()),
            Arc::new(recorder.clone()),
        )
    }

    #[test]
    fn test_initialize_once() {
        let recorder = Recorder::default();
        let bootstrap = bootstrap(&recorder);

        assert!(bootstrap.initialize());
        assert!(!bootstrap.initialize());
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_ios_ready() {
        let recorder = Recorder::default();
        let bootstrap = bootstrap(&recorder);
        bootstrap.initialize();

        assert_eq!(
            bootstrap.on_device_ready("ios"),
            ReadyOutcome::Configured(DeviceFamily::Ios)
        );
        assert_eq!(
            recorder.events(),
            vec![
                Event::Stylesheet(StylesheetLink::css("parkItIOS.css")),
                Event::OverlaysWebView(false),
                Event::StyleDefault,
            ]
        );
        assert_eq!(bootstrap.device_family(), Some(DeviceFamily::Ios));
    }

    #[test]
    fn test_unrecognized_platform_takes_android_path() {
        for platform_id in ["android", "browser", "electron"] {
            let recorder = Recorder::default();
            let bootstrap = bootstrap(&recorder);
            bootstrap.initialize();

            assert_eq!(
                bootstrap.on_device_ready(platform_id),
                ReadyOutcome::Configured(DeviceFamily::Android)
            );
            assert_eq!(
                recorder.events(),
                vec![
                    Event::Stylesheet(StylesheetLink::css("parkItAndroid.css")),
                    Event::StatusBarColor("#1565C0".to_owned()),
                ]
            );
        }
    }

    #[test]
    fn test_ready_is_handled_once() {
        let recorder = Recorder::default();
        let bootstrap = bootstrap(&recorder);

        assert_eq!(bootstrap.on_device_ready("ios"), ReadyOutcome::NotListening);
        assert!(recorder.events().is_empty());

        bootstrap.initialize();
        bootstrap.on_device_ready("ios");
        assert_eq!(
            bootstrap.on_device_ready("android"),
            ReadyOutcome::AlreadyReady(DeviceFamily::Ios)
        );

        let stylesheets = recorder
            .events()
            .into_iter()
            .filter(|event| matches!(event, Event::Stylesheet(_)))
            .count();
        assert_eq!(stylesheets, 1);
    }
}
