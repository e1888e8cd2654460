//! Parameters structure for ShooterCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{axis_ctrl, ballistics};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the shooter control core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Period of the control cycle, used as the loop time step.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Feeder demand used when firing, in [-1, 1].
    pub feeder_speed: f64,

    /// Turret heading loop. Tolerance in degrees.
    pub turret: axis_ctrl::Params,

    /// Flywheel spin-rate loop. Tolerance in revolutions/second.
    pub flywheel: axis_ctrl::Params,

    /// Ballistic calculator calibration.
    pub ballistics: ballistics::Params,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            feeder_speed: 0.42,
            turret: axis_ctrl::Params {
                k_p: 0.05,
                tolerance: 1.0,
                ..Default::default()
            },
            flywheel: axis_ctrl::Params {
                k_p: 0.02,
                k_f: 1.0 / 80.0,
                tolerance: 1.0,
                ..Default::default()
            },
            ballistics: ballistics::Params::default(),
        }
    }
}
