//! # PID controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::Gains;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller with setpoint feed-forward and a clamped output.
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Controller gains
    gains: Gains,

    /// Lowest allowed output
    min_output: f64,

    /// Highest allowed output
    max_output: f64,

    /// Previous error, `None` straight after a reset
    prev_error: Option<f64>,

    /// The integral accumulation
    integral: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {

    /// Create a new controller with the given gains and output limits.
    pub fn new(gains: Gains, min_output: f64, max_output: f64) -> Self {
        Self {
            gains,
            min_output,
            max_output,
            prev_error: None,
            integral: 0f64
        }
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    /// Replace the controller gains, clearing accumulated state.
    pub fn set_gains(&mut self, gains: Gains) {
        self.gains = gains;
        self.reset();
    }

    /// Clear the integral and derivative history.
    pub fn reset(&mut self) {
        self.integral = 0f64;
        self.prev_error = None;
    }

    /// The current integral accumulation.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Get the output of the controller.
    ///
    /// # Inputs
    /// - `error`: setpoint minus measurement.
    /// - `setpoint`: the current setpoint, used for feed-forward.
    /// - `dt_s`: time since the previous call.
    pub fn get(&mut self, error: f64, setpoint: f64, dt_s: f64) -> f64 {
        let dt_valid = dt_s.is_finite() && dt_s > 0.0;

        // Accumulate the integral term, limited so the integral contribution
        // alone can never exceed the output range.
        if dt_valid {
            self.integral += error * dt_s;

            if self.gains.k_i != 0.0 {
                let lim_a = self.min_output / self.gains.k_i;
                let lim_b = self.max_output / self.gains.k_i;
                self.integral = self.integral.max(lim_a.min(lim_b)).min(lim_a.max(lim_b));
            }
        }

        // Calculate the derivative.
        //
        // Straight after a reset there is no previous error, so we assume no
        // derivative rather than producing a spike from the step in error.
        let deriv = match (self.prev_error, dt_valid) {
            (Some(e), true) => (error - e) / dt_s,
            _ => 0f64
        };

        let out = 
            self.gains.k_p * error 
            + self.gains.k_i * self.integral 
            + self.gains.k_d * deriv
            + self.gains.k_f * setpoint;

        self.prev_error = Some(error);

        util::maths::clamp_finite(out, self.min_output, self.max_output)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DT: f64 = 0.02;

    fn gains(k_p: f64, k_i: f64, k_d: f64, k_f: f64) -> Gains {
        Gains { k_p, k_i, k_d, k_f }
    }

    #[test]
    fn test_proportional() {
        let mut pid = PidController::new(gains(0.1, 0.0, 0.0, 0.0), -1.0, 1.0);
        assert!((pid.get(5.0, 0.0, DT) - 0.5).abs() < 1e-12);
        assert_eq!(pid.get(50.0, 0.0, DT), 1.0);
        assert_eq!(pid.get(-50.0, 0.0, DT), -1.0);
    }

    #[test]
    fn test_integral_accumulates_and_winds_up_no_further() {
        let mut pid = PidController::new(gains(0.0, 1.0, 0.0, 0.0), -1.0, 1.0);
        pid.get(1.0, 0.0, 0.1);
        let out = pid.get(1.0, 0.0, 0.1);
        assert!((out - 0.2).abs() < 1e-12);

        for _ in 0..1000 {
            pid.get(1.0, 0.0, 0.1);
        }
        assert_eq!(pid.integral(), 1.0);
    }

    #[test]
    fn test_no_derivative_kick_after_reset() {
        let mut pid = PidController::new(gains(0.0, 0.0, 1.0, 0.0), -10.0, 10.0);
        assert_eq!(pid.get(3.0, 0.0, DT), 0.0);
        assert!((pid.get(3.1, 0.0, DT) - 5.0).abs() < 1e-9);

        pid.reset();
        assert_eq!(pid.get(-3.0, 0.0, DT), 0.0);
    }

    #[test]
    fn test_feed_forward_only_with_zero_gains() {
        let mut pid = PidController::new(gains(0.0, 0.0, 0.0, 1.0 / 80.0), -1.0, 1.0);
        assert!((pid.get(12.0, 40.0, DT) - 0.5).abs() < 1e-12);

        let mut zero = PidController::new(Gains::default(), -1.0, 1.0);
        assert_eq!(zero.get(12.0, 40.0, DT), 0.0);
    }

    #[test]
    fn test_set_gains_resets() {
        let mut pid = PidController::new(gains(0.0, 1.0, 0.0, 0.0), -1.0, 1.0);
        pid.get(1.0, 0.0, 0.1);
        pid.set_gains(gains(0.0, 2.0, 0.0, 0.0));
        assert_eq!(pid.integral(), 0.0);
    }
}
