//! # Mode manager
//!
//! Resolves the shooter operating mode from edge-triggered operator events.
//! At most one event is consumed per cycle.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod edge;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::fmt;

use comms_if::tc::Button;

pub use edge::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The operating mode of the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    /// Operator drives both axes open-loop and fires with the trigger.
    Manual,

    /// Both axes track the vision target and the feeder fires on convergence.
    AutoTrack,

    /// One of the tuning diagnostics is running.
    Tuning(TuningMode),
}

/// Tuning diagnostic sub-modes, cycled in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TuningMode {
    TurretGain,
    FlywheelGain,
    ColorFilter,
    ShapeFilter,
}

/// Events which may change the operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModeEvent {
    ToggleShooterMode,
    ToggleTuning,
    CycleTuningMode,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for OperatingMode {
    fn default() -> Self {
        OperatingMode::Manual
    }
}

impl OperatingMode {
    pub fn is_tuning(&self) -> bool {
        matches!(self, OperatingMode::Tuning(_))
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Manual => write!(f, "MANUAL"),
            OperatingMode::AutoTrack => write!(f, "AUTO_TRACK"),
            OperatingMode::Tuning(t) => write!(f, "TUNING({})", t),
        }
    }
}

impl Default for TuningMode {
    fn default() -> Self {
        TuningMode::TurretGain
    }
}

impl TuningMode {
    /// The next sub-mode, wrapping after the last.
    pub fn next(self) -> Self {
        match self {
            TuningMode::TurretGain => TuningMode::FlywheelGain,
            TuningMode::FlywheelGain => TuningMode::ColorFilter,
            TuningMode::ColorFilter => TuningMode::ShapeFilter,
            TuningMode::ShapeFilter => TuningMode::TurretGain,
        }
    }
}

impl fmt::Display for TuningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TuningMode::TurretGain => "TURRET_GAIN",
            TuningMode::FlywheelGain => "FLYWHEEL_GAIN",
            TuningMode::ColorFilter => "COLOR_FILTER",
            TuningMode::ShapeFilter => "SHAPE_FILTER",
        };
        write!(f, "{}", s)
    }
}

impl From<Button> for ModeEvent {
    fn from(button: Button) -> Self {
        match button {
            Button::ToggleShooterMode => ModeEvent::ToggleShooterMode,
            Button::ToggleTuning => ModeEvent::ToggleTuning,
            Button::CycleTuningMode => ModeEvent::CycleTuningMode,
        }
    }
}
