//! Implementations for the ShooterCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::{Params, ShooterCtrlError};
use crate::{
    axis_ctrl,
    ballistics::Ballistics,
    feeder::FeederGate,
    flywheel_ctrl::FlywheelCtrl,
    mode_mgr::{ModeChange, ModeEvent, ModeMgr, OperatingMode},
    targeting::{TargetingCoordinator, TuningParams},
    turret_ctrl::TurretCtrl,
};
use comms_if::{
    eqpt::{
        shooter::ShooterDems,
        vision::{FilterTuning, TargetEstimate},
    },
    tc::OperatorInputs,
};
use util::{
    maths::norm_dem,
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Shooter control module state
pub struct ShooterCtrl {
    params: Params,

    mode_mgr: ModeMgr,

    mechs: ShooterMechs,

    coordinator: TargetingCoordinator,

    report: StatusReport,
}

/// The mechanisms owned by the control core.
#[derive(Debug, Clone)]
pub struct ShooterMechs {
    pub turret: TurretCtrl,
    pub flywheel: FlywheelCtrl,
    pub feeder: FeederGate,

    /// Configured turret loop parameters, restored after gain tuning.
    turret_params: axis_ctrl::Params,

    /// Configured flywheel loop parameters, restored after gain tuning.
    flywheel_params: axis_ctrl::Params,
}

/// Input data to ShooterCtrl.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ShooterInput {
    /// False while the robot is disabled, which forces all demands to zero.
    pub robot_enabled: bool,

    /// The operator's controls on this cycle.
    pub operator: OperatorInputs,

    /// Current turret heading.
    ///
    /// Units: degrees
    pub heading_deg: f64,

    /// Current flywheel spin-rate.
    ///
    /// Units: revolutions/second
    pub spin_rate_rps: f64,

    /// The latest estimate published by the vision pipeline.
    pub target: TargetEstimate,
}

/// Output data from ShooterCtrl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputData {
    /// Actuator demands, each in [-1, 1].
    pub dems: ShooterDems,

    /// Filter settings to hand to the vision pipeline, if they changed.
    pub filter_tuning: Option<FilterTuning>,
}

/// Status report for ShooterCtrl processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// The mode at the end of the cycle.
    pub mode: OperatingMode,

    /// The mode change made on this cycle, if any.
    pub mode_change: Option<ModeChange>,

    pub turret_on_target: bool,
    pub flywheel_on_target: bool,
    pub converged: bool,
    pub target_found: bool,
    pub ballistics_failed: bool,
    pub robot_disabled: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ShooterMechs {
    pub fn new(params: &Params) -> Self {
        Self {
            turret: TurretCtrl::new(&params.turret),
            flywheel: FlywheelCtrl::new(
                &params.flywheel, 
                Ballistics::new(params.ballistics.clone())
            ),
            feeder: FeederGate::new(params.feeder_speed),
            turret_params: params.turret.clone(),
            flywheel_params: params.flywheel.clone(),
        }
    }

    /// Put the configured gains and tolerances back on both axes.
    pub fn restore_configured(&mut self) {
        self.turret.configure(
            self.turret_params.gains(), 
            self.turret_params.tolerance
        );
        self.flywheel.configure(
            self.flywheel_params.gains(), 
            self.flywheel_params.tolerance
        );
    }

    /// Stop every mechanism, returning the zero demands.
    pub fn stop(&mut self) -> ShooterDems {
        ShooterDems {
            turret: self.turret.stop(),
            flywheel: self.flywheel.stop(),
            feeder: self.feeder.stop(),
        }
    }
}

impl ShooterCtrl {
    pub fn new(params: Params) -> Self {
        let mechs = ShooterMechs::new(&params);
        let coordinator = TargetingCoordinator::new(
            TuningParams::new(&params.turret, &params.flywheel)
        );

        Self {
            params,
            mode_mgr: ModeMgr::new(),
            mechs,
            coordinator,
            report: StatusReport::default(),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode_mgr.mode()
    }

    pub fn mechs(&self) -> &ShooterMechs {
        &self.mechs
    }

    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Queue a mode event from the host, applied on a later cycle.
    pub fn queue_mode_event(&mut self, event: ModeEvent) {
        self.mode_mgr.queue_event(event);
    }

    /// Set a named tuning value.
    pub fn set_tuning_param(&mut self, name: &str, value: f64) {
        self.coordinator.set_tuning_param(name, value);
    }

    /// Stop every mechanism outside of the normal cycle, returning the zero
    /// demands. The mode is kept.
    pub fn make_safe(&mut self) -> ShooterDems {
        debug!("ShooterCtrl made safe");
        self.mechs.stop()
    }
}

impl Default for ShooterCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl State for ShooterCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = ShooterInput;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = ShooterCtrlError;

    /// Initialise the ShooterCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load(init_data)?;

        info!(
            "ShooterCtrl initialised with a {} s cycle", 
            params.cycle_period_s
        );

        *self = Self::new(params);

        Ok(())
    }

    /// Perform cyclic processing of ShooterCtrl.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();
        self.report.mode = self.mode();

        let mut output = OutputData::default();

        // Disabled overrides every mode, but the buttons are still tracked.
        if !input_data.robot_enabled {
            self.mode_mgr.observe(&input_data.operator);
            self.mode_mgr.clear_queue();
            output.dems = self.mechs.stop();

            self.report.robot_disabled = true;

            return Ok((output, self.report));
        }

        if !input_data.heading_deg.is_finite() || !input_data.spin_rate_rps.is_finite() {
            self.mode_mgr.observe(&input_data.operator);

            return Err(ShooterCtrlError::NonFiniteInput {
                heading_deg: input_data.heading_deg,
                spin_rate_rps: input_data.spin_rate_rps,
            });
        }

        // A mode change stops everything, the new mode runs from the next
        // cycle.
        if let Some(change) = self.mode_mgr.proc(&input_data.operator) {
            output.dems = self.mechs.stop();
            self.coordinator.reset();

            if change.from.is_tuning() && !change.to.is_tuning() {
                self.mechs.restore_configured();
            }

            self.report.mode = change.to;
            self.report.mode_change = Some(change);

            return Ok((output, self.report));
        }

        let mode = self.mode();
        let targeting = self.coordinator.proc(
            mode, 
            &mut self.mechs, 
            input_data, 
            self.params.cycle_period_s
        );

        output.dems = ShooterDems {
            turret: norm_dem(targeting.dems.turret),
            flywheel: norm_dem(targeting.dems.flywheel),
            feeder: norm_dem(targeting.dems.feeder),
        };
        output.filter_tuning = targeting.filter_tuning;

        self.report = StatusReport {
            mode,
            mode_change: None,
            turret_on_target: targeting.turret_on_target,
            flywheel_on_target: targeting.flywheel_on_target,
            converged: targeting.converged,
            target_found: targeting.target_found,
            ballistics_failed: targeting.ballistics_failed,
            robot_disabled: false,
        };

        trace!("ShooterCtrl output: {:?}", output);

        Ok((output, self.report))
    }
}
