use crate::{Error, position::Coordinates};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum FlowKind {
    Save,
    Recall,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowPhase {
    #[default]
    Idle,
    AwaitingPosition(FlowKind),
    /// Recall only: the position is in, the directions service is working.
    AwaitingRoute,
    Saved,
    Displayed,
    Failed(FlowKind),
}

impl FlowPhase {
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            FlowPhase::AwaitingPosition(_) | FlowPhase::AwaitingRoute
        )
    }
}

/// Everything the controller remembers between user actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Last position reported by the location service.
    pub current: Option<Coordinates>,
    /// Last parked location this process saved or read back.
    pub parked: Option<Coordinates>,
    pub phase: FlowPhase,
}

impl AppState {
    pub fn begin(&mut self, kind: FlowKind) -> Result<(), Error> {
        if self.phase.in_flight() {
            return Err(Error::RequestInFlight);
        }

        self.phase = FlowPhase::AwaitingPosition(kind);
        Ok(())
    }

    pub fn position_acquired(&mut self, position: Coordinates) {
        self.current = Some(position);
    }

    pub fn route_requested(&mut self, parked: Coordinates) {
        self.parked = Some(parked);
        self.phase = FlowPhase::AwaitingRoute;
    }

    pub fn saved(&mut self, parked: Coordinates) {
        self.parked = Some(parked);
        self.phase = FlowPhase::Saved;
    }

    pub fn displayed(&mut self) {
        self.phase = FlowPhase::Displayed;
    }

    pub fn failed(&mut self, kind: FlowKind) {
        self.phase = FlowPhase::Failed(kind);
    }

    /// Drops an outstanding request without an outcome.
    pub fn abandon(&mut self) {
        if self.phase.in_flight() {
            self.phase = FlowPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_transitions() {
        let mut state = AppState::default();
        let here = Coordinates::new(37.0, -122.0);

        state.begin(FlowKind::Save).unwrap();
        assert_eq!(state.phase, FlowPhase::AwaitingPosition(FlowKind::Save));

        state.position_acquired(here);
        state.saved(here);
        assert_eq!(state.current, Some(here));
        assert_eq!(state.parked, Some(here));
        assert_eq!(state.phase, FlowPhase::Saved);
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut state = AppState::default();
        state.begin(FlowKind::Save).unwrap();

        assert!(matches!(state.begin(FlowKind::Recall), Err(Error::RequestInFlight)));

        state.position_acquired(Coordinates::new(1.0, 1.0));
        state.route_requested(Coordinates::new(2.0, 2.0));
        assert!(matches!(state.begin(FlowKind::Save), Err(Error::RequestInFlight)));
    }

    #[test]
    fn test_failure_allows_next_flow() {
        let mut state = AppState::default();
        state.begin(FlowKind::Recall).unwrap();
        state.failed(FlowKind::Recall);

        assert_eq!(state.phase, FlowPhase::Failed(FlowKind::Recall));
        assert!(state.begin(FlowKind::Save).is_ok());
    }

    #[test]
    fn test_abandon_only_resets_in_flight() {
        let mut state = AppState::default();
        state.begin(FlowKind::Save).unwrap();
        state.abandon();
        assert_eq!(state.phase, FlowPhase::Idle);

        state.phase = FlowPhase::Displayed;
        state.abandon();
        assert_eq!(state.phase, FlowPhase::Displayed);
    }
}
