//! # Executable parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::sim::SimParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the shooter executable outside of the control core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShooterExecParams {
    /// Target time between two vision pipeline passes.
    ///
    /// Units: seconds
    pub vision_period_s: f64,

    /// Simulated plant.
    #[serde(default)]
    pub sim: SimParams,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ShooterExecParams {
    fn default() -> Self {
        Self {
            vision_period_s: 0.05,
            sim: SimParams::default(),
        }
    }
}
