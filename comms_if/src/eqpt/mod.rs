//! # Equipment Interface
//!
//! This module defines the data exchanged with, and the traits implemented by,
//! the equipment the shooter control core is connected to.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod shooter;
pub mod vision;
