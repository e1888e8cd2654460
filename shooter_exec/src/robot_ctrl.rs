//! # Robot control
//!
//! Owns the control core together with the equipment it is wired to, and exposes the per-cycle
//! `tick` entry point used by the host loop.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, trace, warn};
use serde::Serialize;

use crate::{
    mode_mgr::{ModeEvent, OperatingMode},
    shooter_ctrl::{ShooterCtrl, ShooterInput, StatusReport},
};
use comms_if::{
    eqpt::{
        shooter::{ShooterDems, ShooterEqpt},
        vision::VisionProvider,
    },
    tc::OperatorInputs,
};
use util::module::State;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The control core and its equipment.
pub struct RobotControl<V, E> {
    ctrl: ShooterCtrl,
    vision: V,
    eqpt: E,
    robot_enabled: bool,
    dems: ShooterDems,
    report: StatusReport,
}

/// Telemetry produced by every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShooterTm {
    pub turret_on_target: bool,
    pub flywheel_on_target: bool,
    pub mode: OperatingMode,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<V, E> RobotControl<V, E>
where
    V: VisionProvider,
    E: ShooterEqpt,
{
    /// Create a new, disabled, robot.
    pub fn new(ctrl: ShooterCtrl, vision: V, eqpt: E) -> Self {
        Self {
            ctrl,
            vision,
            eqpt,
            robot_enabled: false,
            dems: ShooterDems::default(),
            report: StatusReport::default(),
        }
    }

    /// Enable or disable the robot. A disabled robot holds every actuator at
    /// zero.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.robot_enabled {
            info!("Robot {}", if enabled { "enabled" } else { "disabled" });
        }
        self.robot_enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.robot_enabled
    }

    /// Zero the heading and spin-rate sensors.
    pub fn zero_sensors(&mut self) {
        info!("Zeroing shooter sensors");
        self.eqpt.zero_sensors();
    }

    /// Run one control cycle.
    pub fn tick(&mut self, operator: &OperatorInputs) -> ShooterTm {
        let input = ShooterInput {
            robot_enabled: self.robot_enabled,
            operator: *operator,
            heading_deg: self.eqpt.current_heading_deg(),
            spin_rate_rps: self.eqpt.current_revs_per_second(),
            target: self.vision.poll_target(),
        };

        let dems = match self.ctrl.proc(&input) {
            Ok((output, report)) => {
                self.report = report;

                if let Some(tuning) = output.filter_tuning {
                    self.vision.apply_filter_tuning(tuning);
                }

                output.dems
            },
            Err(e) => {
                warn!("Error during ShooterCtrl processing, stopping: {}", e);

                self.report = StatusReport {
                    mode: self.ctrl.mode(),
                    ..Default::default()
                };

                self.ctrl.make_safe()
            }
        };

        trace!("Shooter dems: {:?}", dems);

        self.eqpt.write_dems(&dems);
        self.dems = dems;

        self.tm()
    }

    /// Telemetry from the most recent tick.
    pub fn tm(&self) -> ShooterTm {
        ShooterTm {
            turret_on_target: self.report.turret_on_target,
            flywheel_on_target: self.report.flywheel_on_target,
            mode: self.report.mode,
        }
    }

    /// Queue a mode event, applied on a later tick.
    pub fn queue_mode_event(&mut self, event: ModeEvent) {
        self.ctrl.queue_mode_event(event);
    }

    pub fn toggle_shooter_mode(&mut self) {
        self.queue_mode_event(ModeEvent::ToggleShooterMode)
    }

    pub fn toggle_tuning(&mut self) {
        self.queue_mode_event(ModeEvent::ToggleTuning)
    }

    pub fn cycle_tuning_mode(&mut self) {
        self.queue_mode_event(ModeEvent::CycleTuningMode)
    }

    /// Set a named tuning value.
    pub fn set_tuning_param(&mut self, name: &str, value: f64) {
        self.ctrl.set_tuning_param(name, value);
    }

    pub fn mode(&self) -> OperatingMode {
        self.ctrl.mode()
    }

    /// Demands written on the most recent tick.
    pub fn dems(&self) -> ShooterDems {
        self.dems
    }

    /// Full status report of the most recent tick.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    pub fn ctrl(&self) -> &ShooterCtrl {
        &self.ctrl
    }

    pub fn eqpt(&self) -> &E {
        &self.eqpt
    }

    pub fn eqpt_mut(&mut self) -> &mut E {
        &mut self.eqpt
    }

    pub fn vision_mut(&mut self) -> &mut V {
        &mut self.vision
    }

    /// Stop all actuators and release the vision provider and equipment.
    pub fn into_parts(mut self) -> (V, E) {
        let dems = self.ctrl.make_safe();
        self.eqpt.write_dems(&dems);
        (self.vision, self.eqpt)
    }
}
