//! # Telecommand module
//!
//! This module provides the operator telecommands and the per-cycle snapshot of the operator's
//! controls that the telecommands build up.
//!
//! Telecommands are JSON objects with a `type` and, for most types, a `payload`:
//!
//! ```json
//! {"type": "STICK", "payload": {"turret": 0.2, "flywheel": -0.4}}
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the shooter by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tc {
    /// Robot enabled by the driver station.
    Enable,

    /// Robot disabled by the driver station or referee.
    Disable,

    /// A button has been pressed and is being held.
    Press { button: Button },

    /// A held button has been released.
    Release { button: Button },

    /// Stick position, each axis in [-1, 1].
    Stick { turret: f64, flywheel: f64 },

    /// Feeder trigger state.
    Trigger { held: bool },

    /// Set a named tuning parameter.
    SetParam { name: String, value: f64 },
}

/// Mode buttons on the operator's stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Button {
    /// Toggles between manual and automatic target tracking.
    ToggleShooterMode,

    /// Toggles tuning mode on and off.
    ToggleTuning,

    /// Cycles through the tuning sub-modes.
    CycleTuningMode,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC stick axis {0} is outside [-1, 1]: {1}")]
    StickOutOfRange(&'static str, f64),

    #[error("TC parameter value for {0:?} is not a finite number")]
    NonFiniteParam(String),

    #[error("TC parameter name is empty")]
    EmptyParamName,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Snapshot of the operator's controls for one control cycle.
///
/// Buttons are held levels, the control core performs its own edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatorInputs {
    /// Turret open-loop command (stick X), in [-1, 1].
    pub turret_axis: f64,

    /// Flywheel open-loop command (stick Y), in [-1, 1].
    pub flywheel_axis: f64,

    /// Feeder trigger held.
    pub trigger: bool,

    pub toggle_shooter_mode: bool,
    pub toggle_tuning: bool,
    pub cycle_tuning_mode: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        let tc: Tc = serde_json::from_str(json_str)
            .map_err(TcParseError::InvalidJson)?;

        tc.validate()?;

        Ok(tc)
    }

    /// Check that the values carried by the TC are usable.
    fn validate(&self) -> Result<(), TcParseError> {
        match self {
            Tc::Stick { turret, flywheel } => {
                for &(axis, value) in [("turret", *turret), ("flywheel", *flywheel)].iter() {
                    if !(-1.0..=1.0).contains(&value) {
                        return Err(TcParseError::StickOutOfRange(axis, value));
                    }
                }
                Ok(())
            },
            Tc::SetParam { name, value } => {
                if name.trim().is_empty() {
                    Err(TcParseError::EmptyParamName)
                }
                else if !value.is_finite() {
                    Err(TcParseError::NonFiniteParam(name.clone()))
                }
                else {
                    Ok(())
                }
            },
            _ => Ok(())
        }
    }
}

impl OperatorInputs {
    /// Get the held level of a button.
    pub fn button(&self, button: Button) -> bool {
        match button {
            Button::ToggleShooterMode => self.toggle_shooter_mode,
            Button::ToggleTuning => self.toggle_tuning,
            Button::CycleTuningMode => self.cycle_tuning_mode,
        }
    }

    /// Set the held level of a button.
    pub fn set_button(&mut self, button: Button, held: bool) {
        match button {
            Button::ToggleShooterMode => self.toggle_shooter_mode = held,
            Button::ToggleTuning => self.toggle_tuning = held,
            Button::CycleTuningMode => self.cycle_tuning_mode = held,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_tcs() {
        assert_eq!(Tc::from_json(r#"{"type": "ENABLE"}"#).unwrap(), Tc::Enable);
        assert_eq!(
            Tc::from_json(r#"{"type": "RELEASE", "payload": {"button": "CYCLE_TUNING_MODE"}}"#)
                .unwrap(),
            Tc::Release { button: Button::CycleTuningMode }
        );
        assert_eq!(
            Tc::from_json(r#"{"type": "SET_PARAM", "payload": {"name": "turret_p", "value": 0.04}}"#)
                .unwrap(),
            Tc::SetParam { name: "turret_p".into(), value: 0.04 }
        );
        assert_eq!(
            Tc::from_json(r#"{"type": "TRIGGER", "payload": {"held": true}}"#).unwrap(),
            Tc::Trigger { held: true }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Tc::from_json(r#"{"type": "FIRE"}"#),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "STICK", "payload": {"turret": 1.5, "flywheel": 0.0}}"#),
            Err(TcParseError::StickOutOfRange("turret", _))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "SET_PARAM", "payload": {"name": " ", "value": 1.0}}"#),
            Err(TcParseError::EmptyParamName)
        ));
    }

    #[test]
    fn test_operator_buttons() {
        let mut inputs = OperatorInputs::default();
        inputs.set_button(Button::ToggleTuning, true);

        assert!(inputs.button(Button::ToggleTuning));
        assert!(!inputs.button(Button::ToggleShooterMode));
        assert!(!inputs.button(Button::CycleTuningMode));
    }
}
