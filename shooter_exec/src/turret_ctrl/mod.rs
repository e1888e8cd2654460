//! # Turret control module
//!
//! Closed-loop control of the turret heading. While tracking, the setpoint is
//! recalculated every cycle as the current heading plus the angular error
//! reported by vision, so errors are never accumulated across cycles.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use crate::axis_ctrl::{self, AxisLoop, Gains};
use comms_if::eqpt::vision::TargetEstimate;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Turret heading controller.
#[derive(Debug, Clone)]
pub struct TurretCtrl {
    axis: AxisLoop,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TurretCtrl {
    pub fn new(params: &axis_ctrl::Params) -> Self {
        Self {
            axis: AxisLoop::new("Turret", params),
        }
    }

    /// Point the turret at the target, if the estimate is usable.
    ///
    /// Returns the new heading setpoint in degrees, or `None` if the estimate
    /// was not usable and the previous setpoint is held.
    pub fn track(&mut self, heading_deg: f64, target: &TargetEstimate) -> Option<f64> {
        if !target.is_valid() {
            return None;
        }

        let setpoint_deg = heading_deg + target.angular_error_deg;
        self.axis.set_setpoint(setpoint_deg);

        trace!("Turret setpoint {:.3} deg", setpoint_deg);

        Some(setpoint_deg)
    }

    /// Run the heading loop, returning the turret demand.
    pub fn proc(&mut self, heading_deg: f64, dt_s: f64) -> f64 {
        self.axis.update(heading_deg, dt_s)
    }

    /// Drive the turret open-loop.
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

    pub fn setpoint_deg(&self) -> Option<f64> {
        self.axis.setpoint()
    }

    /// Replace the gains and tolerance, as done when entering gain tuning.
    pub fn configure(&mut self, gains: Gains, tolerance_deg: f64) {
        self.axis.set_gains(gains);
        self.axis.set_tolerance(tolerance_deg);
    }

    pub fn axis(&self) -> &AxisLoop {
        &self.axis
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params() -> axis_ctrl::Params {
        axis_ctrl::Params {
            k_p: 0.05,
            tolerance: 1.0,
            ..Default::default()
        }
    }

    fn target(angular_error_deg: f64) -> TargetEstimate {
        TargetEstimate {
            angular_error_deg,
            horizontal_range_m: 5.0,
            found: true,
        }
    }

    #[test]
    fn test_setpoint_is_heading_plus_error() {
        let mut turret = TurretCtrl::new(&params());
        turret.enable();

        assert_eq!(turret.track(30.0, &target(-5.0)), Some(25.0));

        // A second estimate does not accumulate on the first
        assert_eq!(turret.track(28.0, &target(-3.0)), Some(25.0));
        assert_eq!(turret.setpoint_deg(), Some(25.0));
    }

    #[test]
    fn test_lost_target_holds_setpoint() {
        let mut turret = TurretCtrl::new(&params());
        turret.enable();
        turret.track(0.0, &target(10.0));

        assert_eq!(turret.track(5.0, &TargetEstimate::not_found()), None);
        assert_eq!(turret.setpoint_deg(), Some(10.0));

        let nan_target = TargetEstimate {
            angular_error_deg: f64::NAN,
            ..target(0.0)
        };
        assert_eq!(turret.track(5.0, &nan_target), None);
        assert_eq!(turret.setpoint_deg(), Some(10.0));
    }

    #[test]
    fn test_proc_drives_towards_target() {
        let mut turret = TurretCtrl::new(&params());
        turret.enable();
        turret.track(0.0, &target(10.0));

        assert!((turret.proc(0.0, 0.02) - 0.5).abs() < 1e-12);
        assert!(!turret.on_target());

        turret.proc(9.5, 0.02);
        assert!(turret.on_target());
    }
}
