//! # Ballistic calculator
//!
//! Computes the flywheel spin-rate needed to land a ball on a target at a
//! given horizontal range, from drag-free projectile motion:
//!
//! ```text
//! v_exit   = sqrt( (-g/2) * (dx / cos θ)^2 / (dy - dx * tan θ) )
//! spinRate = v_exit / (ratio * circumference)
//! ```
//!
//! where `g` is the signed vertical acceleration, `θ` the exit angle, `dy` the
//! target height and `ratio` the ball to rim surface speed ratio.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Ballistic calculator, a pure function of range once calibrated.
#[derive(Debug, Clone, Default)]
pub struct Ballistics {
    params: Params,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a spin-rate could not be calculated.
///
/// None of these are faults: the caller is expected to keep its previous
/// setpoint.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum BallisticsError {
    #[error("Range must be a finite, non-negative number, found {0} m")]
    InvalidRange(f64),

    #[error(
        "Target at {range_m} m is unreachable at the configured exit angle \
        (denominator {denominator})"
    )]
    Unreachable { range_m: f64, denominator: f64 },

    #[error("Target at {range_m} m gives a negative radicand ({radicand})")]
    NegativeRadicand { range_m: f64, radicand: f64 },

    #[error("Calculation for a target at {0} m did not produce a finite spin-rate")]
    NonFinite(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Ballistics {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Calculate the exit velocity required to hit a target at `range_m`.
    ///
    /// Units: meters/second
    pub fn exit_velocity_ms(&self, range_m: f64) -> Result<f64, BallisticsError> {
        if !range_m.is_finite() || range_m < 0.0 {
            return Err(BallisticsError::InvalidRange(range_m));
        }

        let theta = self.params.exit_angle_rad;
        let dy = self.params.target_height_m;

        let numerator = (-self.params.gravity_ms2 / 2.0) * (range_m / theta.cos()).powi(2);
        let denominator = dy - range_m * theta.tan();

        if !(denominator > 0.0) {
            return Err(BallisticsError::Unreachable { range_m, denominator });
        }

        let radicand = numerator / denominator;

        // Written so that a NaN radicand also fails
        if !(radicand >= 0.0) {
            return Err(BallisticsError::NegativeRadicand { range_m, radicand });
        }

        let exit_velocity_ms = radicand.sqrt();

        match exit_velocity_ms.is_finite() {
            true => Ok(exit_velocity_ms),
            false => Err(BallisticsError::NonFinite(range_m)),
        }
    }

    /// Calculate the flywheel spin-rate required to hit a target at `range_m`.
    ///
    /// Units: revolutions/second
    pub fn spin_rate_rps(&self, range_m: f64) -> Result<f64, BallisticsError> {
        let exit_velocity_ms = self.exit_velocity_ms(range_m)?;

        // (m/s) / (m/rev) = rev/s, with the rim moving faster than the ball
        let rim_speed_ms = exit_velocity_ms / self.params.surface_speed_ratio;
        let spin_rate_rps = rim_speed_ms / self.params.flywheel_circumference_m();

        if spin_rate_rps.is_finite() && spin_rate_rps >= 0.0 {
            Ok(spin_rate_rps)
        }
        else {
            Err(BallisticsError::NonFinite(range_m))
        }
    }
}
