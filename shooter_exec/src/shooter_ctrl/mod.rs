//! # Shooter control module
//!
//! The control core. Each cycle the mode manager resolves the operating mode,
//! then the targeting coordinator derives the turret, flywheel and feeder
//! demands for that mode.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ShooterCtrl processing.
#[derive(Debug, thiserror::Error)]
pub enum ShooterCtrlError {
    #[error(
        "Sensor input is not a finite number (heading {heading_deg} deg, \
        spin-rate {spin_rate_rps} rps)"
    )]
    NonFiniteInput {
        heading_deg: f64,
        spin_rate_rps: f64,
    },
}
