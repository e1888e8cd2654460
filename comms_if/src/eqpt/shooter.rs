//! # Shooter Equipment Interface
//!
//! Sensors and actuators of the turret, flywheel and feeder.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands sent to the shooter actuators.
///
/// All demands are normalised to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShooterDems {
    pub turret: f64,
    pub flywheel: f64,
    pub feeder: f64,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Turret heading sensor (gyro).
pub trait HeadingSensor {
    /// Absolute turret heading since the last reset.
    ///
    /// Units: degrees
    fn current_heading_deg(&self) -> f64;

    /// Zero the heading at the current position.
    fn reset_heading(&mut self);
}

/// Flywheel spin-rate sensor (encoder).
pub trait SpinRateSensor {
    /// Current flywheel spin-rate.
    ///
    /// Units: revolutions/second
    fn current_revs_per_second(&self) -> f64;

    /// Zero the encoder count.
    fn reset_encoder(&mut self);
}

/// Actuator sinks, each accepting a normalised command in [-1, 1].
pub trait ShooterActuators {
    fn set_turret_output(&mut self, percent: f64);
    fn set_flywheel_output(&mut self, percent: f64);
    fn set_feeder_output(&mut self, percent: f64);
}

/// All shooter equipment the control core is wired to.
pub trait ShooterEqpt: HeadingSensor + SpinRateSensor + ShooterActuators {
    /// Write a full set of demands to the actuators.
    fn write_dems(&mut self, dems: &ShooterDems) {
        self.set_turret_output(dems.turret);
        self.set_flywheel_output(dems.flywheel);
        self.set_feeder_output(dems.feeder);
    }

    /// Zero both sensors.
    fn zero_sensors(&mut self) {
        self.reset_heading();
        self.reset_encoder();
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<T> ShooterEqpt for T where T: HeadingSensor + SpinRateSensor + ShooterActuators {}

impl ShooterDems {
    /// Returns true if every demand is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.turret == 0.0 && self.flywheel == 0.0 && self.feeder == 0.0
    }
}
