//! # Feeder gate
//!
//! Decides the feeder demand each cycle. The feeder only runs on an explicit
//! manual trigger or, while tracking, when both axes are on target together.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::mode_mgr::OperatingMode;
use util::maths::norm_dem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Stateless gate on the feeder demand.
#[derive(Debug, Clone, Copy)]
pub struct FeederGate {
    feed_speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FeederGate {
    pub fn new(feed_speed: f64) -> Self {
        Self {
            feed_speed: norm_dem(feed_speed),
        }
    }

    pub fn feed_speed(&self) -> f64 {
        self.feed_speed
    }

    /// Get the feeder demand for this cycle.
    ///
    /// # Inputs
    /// - `mode`: the current operating mode.
    /// - `trigger_held`: whether the operator is holding the trigger.
    /// - `converged`: whether both axes are on target this cycle.
    pub fn proc(&self, mode: OperatingMode, trigger_held: bool, converged: bool) -> f64 {
        let feed = match mode {
            OperatingMode::Manual => trigger_held,
            OperatingMode::AutoTrack => converged,
            OperatingMode::Tuning(_) => false,
        };

        if feed {
            self.feed_speed
        }
        else {
            0.0
        }
    }

    pub fn stop(&self) -> f64 {
        0.0
    }
}

impl Default for FeederGate {
    fn default() -> Self {
        Self::new(0.42)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mode_mgr::TuningMode;

    #[test]
    fn test_auto_track_requires_convergence() {
        let gate = FeederGate::default();
        assert_eq!(gate.proc(OperatingMode::AutoTrack, true, false), 0.0);
        assert_eq!(gate.proc(OperatingMode::AutoTrack, false, true), 0.42);
    }

    #[test]
    fn test_manual_follows_trigger() {
        let gate = FeederGate::new(0.6);
        assert_eq!(gate.proc(OperatingMode::Manual, true, false), 0.6);
        assert_eq!(gate.proc(OperatingMode::Manual, false, true), 0.0);
    }

    #[test]
    fn test_tuning_never_feeds() {
        let gate = FeederGate::default();
        for &t in [
            TuningMode::TurretGain, 
            TuningMode::FlywheelGain, 
            TuningMode::ColorFilter, 
            TuningMode::ShapeFilter
        ].iter() {
            assert_eq!(gate.proc(OperatingMode::Tuning(t), true, true), 0.0);
        }
    }
}
