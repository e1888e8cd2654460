//! # Communications interface crate.
//!
//! Provides all common interfaces between the shooter control software and
//! its collaborators: the operator (telecommands) and the equipment (vision
//! pipeline, sensors and actuators).

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator telecommands and operator input snapshots
pub mod tc;

/// Data and trait definitions for equipment (vision, sensors, actuators)
pub mod eqpt;
