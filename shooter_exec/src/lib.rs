//! # Shooter library.
//!
//! Control core for a turret mounted launcher, plus the out-of-band vision
//! client and a simulated plant. Other crates in the workspace, the
//! `shooter_exec` binary and the benchmarks access the core through this
//! library.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Axis control - PID loop with enable, setpoint and on-target tolerance
pub mod axis_ctrl;

/// Ballistic calculator - converts target range into flywheel spin-rate
pub mod ballistics;

/// Feeder gate - only feeds on a manual trigger or joint convergence
pub mod feeder;

/// Flywheel control - spin-rate loop fed by the ballistic calculator
pub mod flywheel_ctrl;

/// Mode manager - edge triggered operating mode state machine
pub mod mode_mgr;

/// Parameters for the executable
pub mod params;

/// Robot control - the control core wired to its equipment
pub mod robot_ctrl;

/// Shooter control - the per-cycle control core
pub mod shooter_ctrl;

/// Simulation - turret, flywheel and camera models
pub mod sim;

/// Targeting coordinator - per-mode behaviour of the axes and feeder
pub mod targeting;

/// Telecommand processor - applies operator TCs
pub mod tc_processor;

/// Turret control - heading loop tracking the vision target
pub mod turret_ctrl;

/// Vision client - runs the vision pipeline in the background
pub mod vision_client;
