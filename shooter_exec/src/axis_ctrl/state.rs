//! # Axis loop state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use super::{Gains, Params, PidController};
use util::maths::norm_dem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single closed-loop axis.
///
/// While enabled the loop drives its output towards the setpoint. While
/// disabled the output is either zero or a direct manual demand.
#[derive(Debug, Clone, Serialize)]
pub struct AxisLoop {
    /// Name used in log messages
    name: &'static str,

    pid: PidController,

    tolerance: f64,

    enabled: bool,

    setpoint: Option<f64>,

    /// Error at the most recent update, `None` until the loop has run since
    /// being enabled.
    last_error: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AxisLoop {
    /// Create a new, disabled, loop.
    pub fn new(name: &'static str, params: &Params) -> Self {
        Self {
            name,
            pid: PidController::new(params.gains(), params.min_output, params.max_output),
            tolerance: params.tolerance.abs(),
            enabled: false,
            setpoint: None,
            last_error: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Enable closed-loop control.
    ///
    /// Enabling an already enabled loop has no effect. Enabling a disabled
    /// loop starts from a clean integrator.
    pub fn enable(&mut self) {
        if !self.enabled {
            debug!("{} loop enabled", self.name);
            self.pid.reset();
            self.last_error = None;
            self.enabled = true;
        }
    }

    /// Disable closed-loop control, clearing the setpoint and all controller
    /// history.
    pub fn disable(&mut self) {
        if self.enabled {
            debug!("{} loop disabled", self.name);
        }
        self.enabled = false;
        self.pid.reset();
        self.setpoint = None;
        self.last_error = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the value the loop drives towards.
    ///
    /// Non-finite setpoints are ignored and the previous setpoint is kept.
    pub fn set_setpoint(&mut self, setpoint: f64) {
        if setpoint.is_finite() {
            self.setpoint = Some(setpoint);
        }
    }

    pub fn setpoint(&self) -> Option<f64> {
        self.setpoint
    }

    pub fn gains(&self) -> Gains {
        self.pid.gains()
    }

    /// Replace the gains. The controller history is cleared but the loop
    /// keeps its enabled state and setpoint.
    pub fn set_gains(&mut self, gains: Gains) {
        if gains != self.pid.gains() {
            debug!("{} loop gains set to {:?}", self.name, gains);
            self.pid.set_gains(gains);
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        if tolerance.is_finite() {
            self.tolerance = tolerance.abs();
        }
    }

    /// Run one cycle of the loop against the latest measurement, returning the
    /// output demand.
    ///
    /// A disabled loop, or one without a setpoint, outputs zero.
    pub fn update(&mut self, measurement: f64, dt_s: f64) -> f64 {
        let setpoint = match (self.enabled, self.setpoint) {
            (true, Some(s)) => s,
            _ => {
                self.last_error = None;
                return 0.0;
            }
        };

        let error = setpoint - measurement;
        self.last_error = Some(error);

        self.pid.get(error, setpoint, dt_s)
    }

    /// Bypass the loop with a direct demand, normalised to `[-1, 1]`.
    ///
    /// An enabled loop is disabled first so that no stale integrator state
    /// survives into the next closed-loop period.
    pub fn manual(&mut self, demand: f64) -> f64 {
        if self.enabled {
            self.disable();
        }
        norm_dem(demand)
    }

    /// Stop the axis, returning the zero demand.
    pub fn stop(&mut self) -> f64 {
        self.disable();
        0.0
    }

    /// Whether the loop is enabled and within tolerance of its setpoint.
    pub fn on_target(&self) -> bool {
        match (self.enabled, self.last_error) {
            (true, Some(e)) => e.abs() <= self.tolerance,
            _ => false,
        }
    }
}
