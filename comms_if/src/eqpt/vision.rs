//! # Vision Equipment Interface
//!
//! The vision pipeline runs at its own cadence and publishes [`TargetEstimate`]s. The control core
//! only ever reads the most recently published estimate, which may be older than the current
//! control cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An estimate of the target's position relative to the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetEstimate {
    /// Signed angle between the camera boresight and the target, positive to the right.
    ///
    /// Units: degrees
    pub angular_error_deg: f64,

    /// Horizontal distance from the launcher to the target.
    ///
    /// Units: meters
    pub horizontal_range_m: f64,

    /// True if a target was acquired in the frame this estimate was computed from.
    pub found: bool,
}

/// A colour in HSV space, using the 0-180 hue convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Filter stage settings handed to the vision pipeline while tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterTuning {
    /// Colour threshold applied before contour extraction.
    Color { min: Hsv, max: Hsv },

    /// Contour acceptance limits.
    Shape {
        /// Minimum contour area.
        ///
        /// Units: pixels^2
        min_area: f64,
        min_shape_score: f64,
        max_shape_score: f64,
    },
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Read side of the vision system, as seen by the control core.
pub trait VisionProvider {
    /// Get the latest published target estimate.
    ///
    /// Implementations must never block waiting for a new estimate.
    fn poll_target(&mut self) -> TargetEstimate;

    /// Hand filter settings over to the pipeline. The default implementation ignores them.
    fn apply_filter_tuning(&mut self, _tuning: FilterTuning) {}
}

/// A vision pipeline which produces one estimate per call, possibly slowly.
///
/// Pipelines are run out-of-band by a client which implements [`VisionProvider`].
pub trait VisionPipeline {
    /// Process one frame and return the resulting estimate.
    fn process(&mut self) -> TargetEstimate;

    /// Apply new filter settings before the next frame is processed.
    fn apply_filter_tuning(&mut self, tuning: &FilterTuning);
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TargetEstimate {
    /// An estimate representing "no target acquired".
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Returns true if the target was found and all fields are usable numbers.
    pub fn is_valid(&self) -> bool {
        self.found
            && self.angular_error_deg.is_finite()
            && self.horizontal_range_m.is_finite()
    }
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}
