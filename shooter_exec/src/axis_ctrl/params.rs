//! Parameters structure for an axis control loop

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// PID and feed-forward gains.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,

    /// Feed-forward gain, applied to the setpoint
    pub k_f: f64,
}

/// Parameters for one axis loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub k_p: f64,
    pub k_i: f64,
    pub k_d: f64,
    pub k_f: f64,

    /// Absolute error below which the axis is considered on-target, in the
    /// axis' own units.
    pub tolerance: f64,

    /// Lowest output the loop may demand.
    #[serde(default = "default_min_output")]
    pub min_output: f64,

    /// Highest output the loop may demand.
    #[serde(default = "default_max_output")]
    pub max_output: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Get the gains for this loop.
    pub fn gains(&self) -> Gains {
        Gains {
            k_p: self.k_p,
            k_i: self.k_i,
            k_d: self.k_d,
            k_f: self.k_f,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            k_p: 0.0,
            k_i: 0.0,
            k_d: 0.0,
            k_f: 0.0,
            tolerance: 0.0,
            min_output: default_min_output(),
            max_output: default_max_output(),
        }
    }
}

fn default_min_output() -> f64 {
    -1.0
}

fn default_max_output() -> f64 {
    1.0
}
