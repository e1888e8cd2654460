//! Parameters structure for the ballistic calculator

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Calibration parameters for the ballistic calculation.
///
/// The exit angle and surface speed ratio have not been measured on the real
/// launcher and should be treated as calibration values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Params {
    /// Signed vertical acceleration in an up-positive frame.
    ///
    /// Units: meters/second^2
    pub gravity_ms2: f64,

    /// Angle above horizontal at which the ball leaves the launcher.
    ///
    /// Units: radians
    pub exit_angle_rad: f64,

    /// Height of the target above the launcher exit.
    ///
    /// Units: meters
    pub target_height_m: f64,

    /// Radius of the flywheel.
    ///
    /// Units: meters
    pub flywheel_radius_m: f64,

    /// Ratio of the ball's exit speed to the flywheel rim speed.
    ///
    /// A compliant single-wheel launcher gives roughly one half.
    pub surface_speed_ratio: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            gravity_ms2: -9.81,
            exit_angle_rad: 1f64.to_radians(),
            target_height_m: 2.0,
            // 4.875 inch diameter wheel
            flywheel_radius_m: 4.875 * 0.0254 / 2.0,
            surface_speed_ratio: 0.5,
        }
    }
}

impl Params {
    /// Circumference of the flywheel.
    ///
    /// Units: meters
    pub fn flywheel_circumference_m(&self) -> f64 {
        std::f64::consts::TAU * self.flywheel_radius_m
    }
}
