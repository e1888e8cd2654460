//! # Simulated shooter plant
//!
//! A simple model of the turret, flywheel and camera, used to run the
//! executable without hardware and to test the control core in closed loop.
//!
//! - The turret slews at a rate proportional to its demand.
//! - The flywheel spin-rate follows its demand with a first order lag.
//! - The camera sees the target while it is inside the field of view.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Internal
use comms_if::eqpt::{
    shooter::{HeadingSensor, ShooterActuators, ShooterDems, SpinRateSensor},
    vision::{FilterTuning, TargetEstimate, VisionPipeline},
};
use util::maths::{norm_dem, wrap_180};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the simulated plant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    /// Turret slew rate at full demand.
    ///
    /// Units: degrees/second
    pub turret_max_rate_dps: f64,

    /// Flywheel steady state spin-rate at full demand.
    ///
    /// Units: revolutions/second
    pub flywheel_max_rps: f64,

    /// Flywheel time constant.
    ///
    /// Units: seconds
    pub flywheel_tau_s: f64,

    /// Full width of the camera's horizontal field of view.
    ///
    /// Units: degrees
    pub camera_fov_deg: f64,

    /// Bearing of the target from the launcher, in the same frame as the
    /// initial turret heading.
    ///
    /// Units: degrees
    pub target_bearing_deg: f64,

    /// Horizontal distance to the target.
    ///
    /// Units: meters
    pub target_range_m: f64,
}

/// True state of the simulated world.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimTruth {
    pub heading_deg: f64,
    pub spin_rate_rps: f64,
    pub target_bearing_deg: f64,
    pub target_range_m: f64,
    pub target_visible: bool,

    /// Demands most recently written by the control core.
    pub dems: ShooterDems,

    /// Total time the feeder has been driven forwards.
    ///
    /// Units: seconds
    pub feed_time_s: f64,

    /// Heading at the last sensor reset.
    heading_zero_deg: f64,
}

/// The simulated turret, flywheel and feeder.
pub struct SimPlant {
    params: SimParams,
    truth: Arc<Mutex<SimTruth>>,
}

/// Simulated camera pipeline observing the same world as a [`SimPlant`].
pub struct SimVisionPipeline {
    truth: Arc<Mutex<SimTruth>>,
    half_fov_deg: f64,
    filter: Option<FilterTuning>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            turret_max_rate_dps: 180.0,
            flywheel_max_rps: 80.0,
            flywheel_tau_s: 0.5,
            camera_fov_deg: 60.0,
            target_bearing_deg: 20.0,
            target_range_m: 5.0,
        }
    }
}

impl SimPlant {
    pub fn new(params: SimParams) -> Self {
        let truth = SimTruth {
            target_bearing_deg: params.target_bearing_deg,
            target_range_m: params.target_range_m,
            target_visible: true,
            ..Default::default()
        };

        Self {
            params,
            truth: Arc::new(Mutex::new(truth)),
        }
    }

    /// Create a camera pipeline observing this plant.
    pub fn vision_pipeline(&self) -> SimVisionPipeline {
        SimVisionPipeline {
            truth: self.truth.clone(),
            half_fov_deg: self.params.camera_fov_deg.abs() / 2.0,
            filter: None,
        }
    }

    /// Advance the plant by `dt_s` using the last written demands.
    pub fn step(&mut self, dt_s: f64) {
        let mut truth = self.truth();

        let dems = truth.dems;

        truth.heading_deg += dems.turret * self.params.turret_max_rate_dps * dt_s;

        let target_rps = dems.flywheel * self.params.flywheel_max_rps;
        let alpha = 1.0 - (-dt_s / self.params.flywheel_tau_s).exp();
        truth.spin_rate_rps += (target_rps - truth.spin_rate_rps) * alpha;

        if dems.feeder > 0.0 {
            truth.feed_time_s += dt_s;
        }
    }

    /// Move the target.
    pub fn set_target(&mut self, bearing_deg: f64, range_m: f64) {
        let mut truth = self.truth();
        truth.target_bearing_deg = bearing_deg;
        truth.target_range_m = range_m;
    }

    /// Hide or show the target to the camera.
    pub fn set_target_visible(&mut self, visible: bool) {
        debug!("Sim target visible: {}", visible);
        self.truth().target_visible = visible;
    }

    /// Get a copy of the true state.
    pub fn snapshot(&self) -> SimTruth {
        self.truth().clone()
    }

    fn truth(&self) -> MutexGuard<'_, SimTruth> {
        self.truth.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimPlant {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}

impl HeadingSensor for SimPlant {
    fn current_heading_deg(&self) -> f64 {
        let truth = self.truth();
        truth.heading_deg - truth.heading_zero_deg
    }

    fn reset_heading(&mut self) {
        let mut truth = self.truth();
        truth.heading_zero_deg = truth.heading_deg;
    }
}

impl SpinRateSensor for SimPlant {
    fn current_revs_per_second(&self) -> f64 {
        self.truth().spin_rate_rps
    }

    fn reset_encoder(&mut self) {}
}

impl ShooterActuators for SimPlant {
    fn set_turret_output(&mut self, percent: f64) {
        self.truth().dems.turret = norm_dem(percent);
    }

    fn set_flywheel_output(&mut self, percent: f64) {
        self.truth().dems.flywheel = norm_dem(percent);
    }

    fn set_feeder_output(&mut self, percent: f64) {
        self.truth().dems.feeder = norm_dem(percent);
    }
}

impl SimVisionPipeline {
    /// The filter settings last applied to the camera.
    pub fn filter(&self) -> Option<FilterTuning> {
        self.filter
    }
}

impl VisionPipeline for SimVisionPipeline {
    fn process(&mut self) -> TargetEstimate {
        let truth = self.truth.lock().unwrap_or_else(PoisonError::into_inner);

        let angular_error_deg = wrap_180(truth.target_bearing_deg - truth.heading_deg);

        if truth.target_visible && angular_error_deg.abs() <= self.half_fov_deg {
            TargetEstimate {
                angular_error_deg,
                horizontal_range_m: truth.target_range_m,
                found: true,
            }
        }
        else {
            TargetEstimate::not_found()
        }
    }

    fn apply_filter_tuning(&mut self, tuning: &FilterTuning) {
        debug!("Sim camera filter set to {:?}", tuning);
        self.filter = Some(*tuning);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::shooter::ShooterEqpt;

    #[test]
    fn test_turret_slews() {
        let mut plant = SimPlant::default();
        plant.set_turret_output(0.5);
        plant.step(1.0);
        assert!((plant.current_heading_deg() - 90.0).abs() < 1e-9);

        plant.reset_heading();
        assert_eq!(plant.current_heading_deg(), 0.0);
    }

    #[test]
    fn test_flywheel_lag() {
        let mut plant = SimPlant::default();
        plant.write_dems(&ShooterDems { turret: 0.0, flywheel: 0.5, feeder: 0.0 });

        plant.step(0.5);
        let rps = plant.current_revs_per_second();
        assert!((rps - 40.0 * (1.0 - (-1f64).exp())).abs() < 1e-9);

        for _ in 0..100 {
            plant.step(0.1);
        }
        assert!((plant.current_revs_per_second() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_camera_field_of_view() {
        let mut plant = SimPlant::default();
        let mut camera = plant.vision_pipeline();

        let est = camera.process();
        assert!(est.found);
        assert!((est.angular_error_deg - 20.0).abs() < 1e-9);
        assert_eq!(est.horizontal_range_m, 5.0);

        plant.set_target(-170.0, 5.0);
        assert!(!camera.process().found);

        plant.set_target(10.0, 5.0);
        plant.set_target_visible(false);
        assert!(!camera.process().found);
    }
}
