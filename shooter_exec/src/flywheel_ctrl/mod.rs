//! # Flywheel control module
//!
//! Closed-loop control of the flywheel spin-rate. While tracking, the setpoint
//! comes from the ballistic calculator.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use crate::axis_ctrl::{self, AxisLoop, Gains};
use crate::ballistics::{Ballistics, BallisticsError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Flywheel spin-rate controller.
#[derive(Debug, Clone)]
pub struct FlywheelCtrl {
    axis: AxisLoop,
    ballistics: Ballistics,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FlywheelCtrl {
    pub fn new(params: &axis_ctrl::Params, ballistics: Ballistics) -> Self {
        Self {
            axis: AxisLoop::new("Flywheel", params),
            ballistics,
        }
    }

    /// Set the spin-rate setpoint required to hit a target at `range_m`.
    ///
    /// On failure the previous setpoint is kept.
    pub fn set_calculated_setpoint(&mut self, range_m: f64) -> Result<f64, BallisticsError> {
        let spin_rate_rps = self.ballistics.spin_rate_rps(range_m)?;
        self.axis.set_setpoint(spin_rate_rps);

        trace!("Flywheel setpoint {:.3} rps for range {:.3} m", spin_rate_rps, range_m);

        Ok(spin_rate_rps)
    }

    /// Set the spin-rate setpoint directly.
    ///
    /// Units: revolutions/second
    pub fn set_setpoint(&mut self, spin_rate_rps: f64) {
        self.axis.set_setpoint(spin_rate_rps)
    }

    /// Run the spin-rate loop, returning the flywheel demand.
    pub fn proc(&mut self, spin_rate_rps: f64, dt_s: f64) -> f64 {
        self.axis.update(spin_rate_rps, dt_s)
    }

    /// Drive the flywheel open-loop.
    pub fn manual(&mut self, demand: f64) -> f64 {
        self.axis.manual(demand)
    }

    pub fn stop(&mut self) -> f64 {
        self.axis.stop()
    }

    pub fn enable(&mut self) {
        self.axis.enable()
    }

    pub fn is_enabled(&self) -> bool {
        self.axis.is_enabled()
    }

    pub fn on_target(&self) -> bool {
        self.axis.on_target()
    }

    pub fn setpoint_rps(&self) -> Option<f64> {
        self.axis.setpoint()
    }

    /// Replace the gains and tolerance, as done when entering gain tuning.
    pub fn configure(&mut self, gains: Gains, tolerance_rps: f64) {
        self.axis.set_gains(gains);
        self.axis.set_tolerance(tolerance_rps);
    }

    pub fn axis(&self) -> &AxisLoop {
        &self.axis
    }

    pub fn ballistics(&self) -> &Ballistics {
        &self.ballistics
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn flywheel() -> FlywheelCtrl {
        FlywheelCtrl::new(
            &axis_ctrl::Params {
                k_p: 0.02,
                k_f: 1.0 / 80.0,
                tolerance: 1.0,
                ..Default::default()
            },
            Ballistics::default()
        )
    }

    #[test]
    fn test_calculated_setpoint() {
        let mut fw = flywheel();
        fw.enable();

        let rps = fw.set_calculated_setpoint(5.0).unwrap();
        assert!(rps > 0.0 && rps.is_finite());
        assert_eq!(fw.setpoint_rps(), Some(rps));
    }

    #[test]
    fn test_failed_calculation_holds_setpoint() {
        let mut fw = flywheel();
        fw.enable();

        let rps = fw.set_calculated_setpoint(5.0).unwrap();
        assert!(fw.set_calculated_setpoint(500.0).is_err());
        assert_eq!(fw.setpoint_rps(), Some(rps));
    }

    #[test]
    fn test_failed_first_calculation_outputs_zero() {
        let mut fw = flywheel();
        fw.enable();

        assert!(fw.set_calculated_setpoint(-1.0).is_err());
        assert_eq!(fw.setpoint_rps(), None);
        assert_eq!(fw.proc(0.0, 0.02), 0.0);
    }
}
