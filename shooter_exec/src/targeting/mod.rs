//! # Targeting coordinator
//!
//! Per-cycle behaviour of each operating mode. In automatic tracking the
//! coordinator reads the latest vision estimate, derives both axis setpoints,
//! evaluates convergence and drives the feeder gate. In manual it forwards the
//! operator's commands. In tuning it runs the active diagnostic.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod tuning;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;

// Internal
pub use tuning::*;
use crate::mode_mgr::{OperatingMode, TuningMode};
use crate::shooter_ctrl::{ShooterInput, ShooterMechs};
use comms_if::eqpt::{
    shooter::ShooterDems,
    vision::FilterTuning
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Coordinates the axes and feeder according to the operating mode.
#[derive(Debug, Clone)]
pub struct TargetingCoordinator {
    tuning: TuningParams,

    /// Whether the target was valid on the previous tracking cycle.
    target_found: bool,

    /// Whether the current run of ballistic failures has been reported.
    ballistics_warned: bool,

    /// The filter settings last handed to the vision pipeline.
    last_filter: Option<FilterTuning>,
}

/// Result of one cycle of the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TargetingOutput {
    pub dems: ShooterDems,

    /// New filter settings to hand to the vision pipeline, only present when
    /// they have changed.
    pub filter_tuning: Option<FilterTuning>,

    pub turret_on_target: bool,
    pub flywheel_on_target: bool,

    /// Both axes on target on this cycle.
    pub converged: bool,

    pub target_found: bool,

    /// The ballistic calculation failed on this cycle.
    pub ballistics_failed: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TargetingCoordinator {
    pub fn new(tuning: TuningParams) -> Self {
        Self {
            tuning,
            target_found: false,
            ballistics_warned: false,
            last_filter: None,
        }
    }

    /// Set a named tuning value.
    pub fn set_tuning_param(&mut self, name: &str, value: f64) {
        debug!("Tuning param {} = {}", name, value);
        self.tuning.set(name, value);
    }

    /// Forget per-mode history, called on every mode change.
    pub fn reset(&mut self) {
        self.target_found = false;
        self.ballistics_warned = false;
    }

    /// Run one cycle of the given mode.
    pub fn proc(
        &mut self,
        mode: OperatingMode,
        mechs: &mut ShooterMechs,
        input: &ShooterInput,
        dt_s: f64
    ) -> TargetingOutput {
        let mut output = match mode {
            OperatingMode::Manual => self.manual(mechs, input),
            OperatingMode::AutoTrack => self.auto_track(mechs, input, dt_s),
            OperatingMode::Tuning(TuningMode::TurretGain) => 
                self.tune_turret(mechs, input, dt_s),
            OperatingMode::Tuning(TuningMode::FlywheelGain) => 
                self.tune_flywheel(mechs, input, dt_s),
            OperatingMode::Tuning(TuningMode::ColorFilter) => {
                let filter = self.tuning.color_filter();
                self.tune_filter(mechs, input, filter)
            },
            OperatingMode::Tuning(TuningMode::ShapeFilter) => {
                let filter = self.tuning.shape_filter();
                self.tune_filter(mechs, input, filter)
            },
        };

        output.turret_on_target = mechs.turret.on_target();
        output.flywheel_on_target = mechs.flywheel.on_target();
        output.converged = output.turret_on_target && output.flywheel_on_target;

        output.dems.feeder = mechs.feeder.proc(
            mode, 
            input.operator.trigger, 
            output.converged
        );

        trace!("{} dems: {:?}", mode, output.dems);

        output
    }

    /// Operator commands go straight to the axes.
    fn manual(&mut self, mechs: &mut ShooterMechs, input: &ShooterInput) -> TargetingOutput {
        let mut output = TargetingOutput::default();
        output.dems.turret = mechs.turret.manual(input.operator.turret_axis);
        output.dems.flywheel = mechs.flywheel.manual(input.operator.flywheel_axis);
        output
    }

    fn auto_track(
        &mut self, 
        mechs: &mut ShooterMechs, 
        input: &ShooterInput, 
        dt_s: f64
    ) -> TargetingOutput {
        let mut output = TargetingOutput::default();

        mechs.turret.enable();
        mechs.flywheel.enable();

        output.target_found = self.update_target_found(input);

        if output.target_found {
            mechs.turret.track(input.heading_deg, &input.target);

            match mechs.flywheel.set_calculated_setpoint(input.target.horizontal_range_m) {
                Ok(_) => self.ballistics_warned = false,
                Err(e) => {
                    output.ballistics_failed = true;
                    if self.ballistics_warned {
                        debug!("Holding flywheel setpoint: {}", e);
                    }
                    else {
                        warn!("Holding flywheel setpoint: {}", e);
                        self.ballistics_warned = true;
                    }
                }
            }
        }

        output.dems.turret = mechs.turret.proc(input.heading_deg, dt_s);
        output.dems.flywheel = mechs.flywheel.proc(input.spin_rate_rps, dt_s);

        output
    }

    /// Track the target with the turret using the tuning gains, flywheel
    /// stopped.
    fn tune_turret(
        &mut self, 
        mechs: &mut ShooterMechs, 
        input: &ShooterInput, 
        dt_s: f64
    ) -> TargetingOutput {
        let mut output = TargetingOutput::default();

        if !mechs.turret.is_enabled() {
            let gains = self.tuning.turret_gains();
            info!("Turret gain tuning with {:?}", gains);
            mechs.turret.configure(gains, self.tuning.turret_tolerance_deg());
            mechs.turret.enable();
        }

        output.target_found = self.update_target_found(input);
        if output.target_found {
            mechs.turret.track(input.heading_deg, &input.target);
        }

        output.dems.turret = mechs.turret.proc(input.heading_deg, dt_s);
        output.dems.flywheel = mechs.flywheel.stop();

        output
    }

    /// Hold the flywheel at the tuning setpoint using the tuning gains, turret
    /// stopped.
    fn tune_flywheel(
        &mut self, 
        mechs: &mut ShooterMechs, 
        input: &ShooterInput, 
        dt_s: f64
    ) -> TargetingOutput {
        let mut output = TargetingOutput::default();

        if !mechs.flywheel.is_enabled() {
            let gains = self.tuning.flywheel_gains();
            info!("Flywheel gain tuning with {:?}", gains);
            mechs.flywheel.configure(gains, self.tuning.flywheel_tolerance_rps());
            mechs.flywheel.enable();
        }

        mechs.flywheel.set_setpoint(self.tuning.flywheel_setpoint_rps());

        output.dems.turret = mechs.turret.stop();
        output.dems.flywheel = mechs.flywheel.proc(input.spin_rate_rps, dt_s);

        output
    }

    /// Manual axis control while the operator adjusts a vision filter stage.
    fn tune_filter(
        &mut self,
        mechs: &mut ShooterMechs,
        input: &ShooterInput,
        filter: FilterTuning
    ) -> TargetingOutput {
        let mut output = self.manual(mechs, input);
        output.target_found = input.target.is_valid();

        if self.last_filter != Some(filter) {
            debug!("Handing filter tuning to vision: {:?}", filter);
            self.last_filter = Some(filter);
            output.filter_tuning = Some(filter);
        }

        output
    }

    /// Update the found/lost state, logging only when it changes.
    fn update_target_found(&mut self, input: &ShooterInput) -> bool {
        let found = input.target.is_valid();

        match (self.target_found, found) {
            (false, true) => info!(
                "Target acquired at {:.2} deg, {:.2} m", 
                input.target.angular_error_deg,
                input.target.horizontal_range_m
            ),
            (true, false) => warn!("Target lost, holding setpoints"),
            _ => ()
        }

        self.target_found = found;
        found
    }
}

impl Default for TargetingCoordinator {
    fn default() -> Self {
        Self::new(TuningParams::default())
    }
}
