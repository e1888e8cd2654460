//! Tuning parameter store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::HashMap;

use crate::axis_ctrl::{self, Gains};
use comms_if::eqpt::vision::{FilterTuning, Hsv};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Named values set by the operator while tuning.
///
/// Reads of a name which has never been set fall back to a per-name default.
/// Gain defaults are the configured gains, so an operator only has to set the
/// values they want to change.
#[derive(Debug, Clone)]
pub struct TuningParams {
    values: HashMap<String, f64>,
    defaults: HashMap<&'static str, f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TuningParams {
    /// Create a new store with defaults taken from the configured axis
    /// parameters.
    pub fn new(turret: &axis_ctrl::Params, flywheel: &axis_ctrl::Params) -> Self {
        let defaults = [
            ("turret_p", turret.k_p),
            ("turret_i", turret.k_i),
            ("turret_d", turret.k_d),
            ("turret_f", turret.k_f),
            ("turret_tolerance_deg", turret.tolerance),
            ("flywheel_p", flywheel.k_p),
            ("flywheel_i", flywheel.k_i),
            ("flywheel_d", flywheel.k_d),
            ("flywheel_f", flywheel.k_f),
            ("flywheel_tolerance_rps", flywheel.tolerance),
            ("flywheel_setpoint_rps", 0.0),
            ("h_min", 0.0),
            ("s_min", 0.0),
            ("v_min", 0.0),
            ("h_max", 180.0),
            ("s_max", 255.0),
            ("v_max", 255.0),
            ("min_area", 0.0),
            ("min_shape_score", 0.0),
            ("max_shape_score", 2.0),
        ]
        .iter()
        .cloned()
        .collect();

        Self {
            values: HashMap::new(),
            defaults,
        }
    }

    /// Set a named value. Names without a known meaning are still stored.
    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    /// Get a named value, its default, or zero for an unknown name.
    pub fn get(&self, name: &str) -> f64 {
        self.values
            .get(name)
            .or_else(|| self.defaults.get(name))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn turret_gains(&self) -> Gains {
        self.gains("turret")
    }

    pub fn turret_tolerance_deg(&self) -> f64 {
        self.get("turret_tolerance_deg")
    }

    pub fn flywheel_gains(&self) -> Gains {
        self.gains("flywheel")
    }

    pub fn flywheel_tolerance_rps(&self) -> f64 {
        self.get("flywheel_tolerance_rps")
    }

    pub fn flywheel_setpoint_rps(&self) -> f64 {
        self.get("flywheel_setpoint_rps")
    }

    /// Colour threshold settings for the vision pipeline.
    pub fn color_filter(&self) -> FilterTuning {
        FilterTuning::Color {
            min: Hsv::new(self.get("h_min"), self.get("s_min"), self.get("v_min")),
            max: Hsv::new(self.get("h_max"), self.get("s_max"), self.get("v_max")),
        }
    }

    /// Contour acceptance settings for the vision pipeline.
    pub fn shape_filter(&self) -> FilterTuning {
        FilterTuning::Shape {
            min_area: self.get("min_area"),
            min_shape_score: self.get("min_shape_score"),
            max_shape_score: self.get("max_shape_score"),
        }
    }

    fn gains(&self, axis: &str) -> Gains {
        Gains {
            k_p: self.get(&format!("{}_p", axis)),
            k_i: self.get(&format!("{}_i", axis)),
            k_d: self.get(&format!("{}_d", axis)),
            k_f: self.get(&format!("{}_f", axis)),
        }
    }
}

impl Default for TuningParams {
    fn default() -> Self {
        Self::new(&axis_ctrl::Params::default(), &axis_ctrl::Params::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_from_config() {
        let turret = axis_ctrl::Params {
            k_p: 0.05,
            tolerance: 1.0,
            ..Default::default()
        };
        let params = TuningParams::new(&turret, &axis_ctrl::Params::default());

        assert_eq!(params.turret_gains().k_p, 0.05);
        assert_eq!(params.turret_tolerance_deg(), 1.0);
        assert_eq!(params.get("h_max"), 180.0);
        assert_eq!(params.get("not_a_param"), 0.0);
    }

    #[test]
    fn test_set_overrides_default() {
        let mut params = TuningParams::default();
        params.set("flywheel_i", 0.003);
        params.set("v_min", 120.0);
        params.set("exposure", 12.0);

        assert_eq!(params.flywheel_gains().k_i, 0.003);
        assert_eq!(params.get("exposure"), 12.0);
        assert_eq!(
            params.color_filter(), 
            FilterTuning::Color {
                min: Hsv::new(0.0, 0.0, 120.0),
                max: Hsv::new(180.0, 255.0, 255.0)
            }
        );
    }
}
