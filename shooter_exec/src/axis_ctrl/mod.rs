//! # Axis control module
//!
//! Closed loop control of a single shooter axis. Both the turret (heading) and flywheel
//! (spin-rate) controllers are built on an [`AxisLoop`], which wraps a [`PidController`] with an
//! enabled flag, a setpoint and an on-target tolerance band.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod pid;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use pid::*;
pub use state::*;
