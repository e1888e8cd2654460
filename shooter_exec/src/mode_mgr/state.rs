//! Mode manager state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::Serialize;
use std::collections::VecDeque;

// Internal
use super::{ButtonEdges, ModeEvent, OperatingMode, TuningMode};
use comms_if::tc::{Button, OperatorInputs};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Mode manager, owner of the current operating mode.
#[derive(Debug, Default)]
pub struct ModeMgr {
    mode: OperatingMode,

    /// The shooter mode to return to when tuning is left.
    pre_tuning_mode: OperatingMode,

    /// The tuning sub-mode, remembered between tuning sessions.
    tuning_mode: TuningMode,

    edges: ButtonEdges,

    /// Events queued by the host, consumed one per cycle.
    queued: VecDeque<ModeEvent>,
}

/// A change of operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeChange {
    pub from: OperatingMode,
    pub to: OperatingMode,
    pub event: ModeEvent,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ModeMgr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Queue an event to be applied on a later cycle.
    pub fn queue_event(&mut self, event: ModeEvent) {
        debug!("Mode event {:?} queued", event);
        self.queued.push_back(event);
    }

    /// Drop every queued event.
    pub fn clear_queue(&mut self) {
        if !self.queued.is_empty() {
            debug!("Dropping {} queued mode events", self.queued.len());
            self.queued.clear();
        }
    }

    /// Track the button levels without acting on them.
    ///
    /// Used while the robot is disabled, so that a button held across the
    /// disable does not fire once the robot is enabled again.
    pub fn observe(&mut self, inputs: &OperatorInputs) {
        self.edges.update(inputs);
    }

    /// Process one cycle's operator inputs, returning the mode change if one
    /// occurred.
    pub fn proc(&mut self, inputs: &OperatorInputs) -> Option<ModeChange> {
        let rising = self.edges.update(inputs);

        // Select the single highest priority edge which applies to the
        // current mode.
        let in_tuning = self.mode.is_tuning();
        let selected = if rising.is_rising(Button::ToggleTuning) {
            Some(ModeEvent::ToggleTuning)
        }
        else if in_tuning && rising.is_rising(Button::CycleTuningMode) {
            Some(ModeEvent::CycleTuningMode)
        }
        else if !in_tuning && rising.is_rising(Button::ToggleShooterMode) {
            Some(ModeEvent::ToggleShooterMode)
        }
        else {
            None
        };

        for button in rising.iter() {
            let event = ModeEvent::from(button);
            if Some(event) != selected {
                debug!("Mode event {:?} discarded in {}", event, self.mode);
            }
        }

        let event = match selected {
            Some(e) => e,
            None => self.queued.pop_front()?,
        };

        self.apply(event)
    }

    /// Apply a single event to the current mode.
    fn apply(&mut self, event: ModeEvent) -> Option<ModeChange> {
        let from = self.mode;

        let to = match (event, from) {
            (ModeEvent::ToggleTuning, OperatingMode::Tuning(_)) => self.pre_tuning_mode,
            (ModeEvent::ToggleTuning, shooter_mode) => {
                self.pre_tuning_mode = shooter_mode;
                OperatingMode::Tuning(self.tuning_mode)
            },
            (ModeEvent::CycleTuningMode, OperatingMode::Tuning(t)) => {
                self.tuning_mode = t.next();
                OperatingMode::Tuning(self.tuning_mode)
            },
            (ModeEvent::ToggleShooterMode, OperatingMode::Manual) => OperatingMode::AutoTrack,
            (ModeEvent::ToggleShooterMode, OperatingMode::AutoTrack) => OperatingMode::Manual,
            (e, m) => {
                debug!("Mode event {:?} ignored in {}", e, m);
                return None;
            }
        };

        self.mode = to;

        info!("Mode change {} -> {}", from, to);

        Some(ModeChange { from, to, event })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn press(mgr: &mut ModeMgr, button: Button) -> Option<ModeChange> {
        let mut inputs = OperatorInputs::default();
        mgr.proc(&inputs);
        inputs.set_button(button, true);
        mgr.proc(&inputs)
    }

    #[test]
    fn test_shooter_toggle() {
        let mut mgr = ModeMgr::new();
        assert_eq!(mgr.mode(), OperatingMode::Manual);

        let change = press(&mut mgr, Button::ToggleShooterMode).unwrap();
        assert_eq!(change.from, OperatingMode::Manual);
        assert_eq!(change.to, OperatingMode::AutoTrack);

        press(&mut mgr, Button::ToggleShooterMode);
        assert_eq!(mgr.mode(), OperatingMode::Manual);
    }

    #[test]
    fn test_held_button_fires_once() {
        let mut mgr = ModeMgr::new();
        let inputs = OperatorInputs {
            toggle_shooter_mode: true,
            ..Default::default()
        };

        assert!(mgr.proc(&inputs).is_some());
        for _ in 0..10 {
            assert!(mgr.proc(&inputs).is_none());
        }
        assert_eq!(mgr.mode(), OperatingMode::AutoTrack);
    }

    #[test]
    fn test_tuning_returns_to_previous_mode() {
        let mut mgr = ModeMgr::new();
        press(&mut mgr, Button::ToggleShooterMode);

        press(&mut mgr, Button::ToggleTuning);
        assert_eq!(mgr.mode(), OperatingMode::Tuning(TuningMode::TurretGain));

        // Shooter toggle is ignored while tuning
        assert!(press(&mut mgr, Button::ToggleShooterMode).is_none());

        press(&mut mgr, Button::CycleTuningMode);
        assert_eq!(mgr.mode(), OperatingMode::Tuning(TuningMode::FlywheelGain));

        press(&mut mgr, Button::ToggleTuning);
        assert_eq!(mgr.mode(), OperatingMode::AutoTrack);

        // Sub-mode remembered
        press(&mut mgr, Button::ToggleTuning);
        assert_eq!(mgr.mode(), OperatingMode::Tuning(TuningMode::FlywheelGain));
    }

    #[test]
    fn test_cycle_ignored_outside_tuning() {
        let mut mgr = ModeMgr::new();
        assert!(press(&mut mgr, Button::CycleTuningMode).is_none());
        assert_eq!(mgr.mode(), OperatingMode::Manual);
    }

    #[test]
    fn test_one_event_per_cycle() {
        let mut mgr = ModeMgr::new();
        let inputs = OperatorInputs {
            toggle_shooter_mode: true,
            toggle_tuning: true,
            cycle_tuning_mode: true,
            ..Default::default()
        };

        let change = mgr.proc(&inputs).unwrap();
        assert_eq!(change.event, ModeEvent::ToggleTuning);
        assert_eq!(mgr.mode(), OperatingMode::Tuning(TuningMode::TurretGain));
    }

    #[test]
    fn test_queued_events() {
        let mut mgr = ModeMgr::new();
        mgr.queue_event(ModeEvent::ToggleTuning);
        mgr.queue_event(ModeEvent::CycleTuningMode);

        let inputs = OperatorInputs::default();
        mgr.proc(&inputs);
        assert_eq!(mgr.mode(), OperatingMode::Tuning(TuningMode::TurretGain));
        mgr.proc(&inputs);
        assert_eq!(mgr.mode(), OperatingMode::Tuning(TuningMode::FlywheelGain));
        assert!(mgr.proc(&inputs).is_none());
    }

    #[test]
    fn test_clear_queue() {
        let mut mgr = ModeMgr::new();
        mgr.queue_event(ModeEvent::ToggleShooterMode);
        mgr.queue_event(ModeEvent::ToggleShooterMode);
        mgr.clear_queue();

        assert!(mgr.proc(&OperatorInputs::default()).is_none());
        assert_eq!(mgr.mode(), OperatingMode::Manual);
    }

    #[test]
    fn test_observe_swallows_edges() {
        let mut mgr = ModeMgr::new();
        let inputs = OperatorInputs {
            toggle_shooter_mode: true,
            ..Default::default()
        };

        mgr.observe(&inputs);
        assert!(mgr.proc(&inputs).is_none());
        assert_eq!(mgr.mode(), OperatingMode::Manual);
    }
}
