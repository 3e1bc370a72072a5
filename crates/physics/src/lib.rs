//! Arcade flight physics and contact tests for the dogfight simulation.

pub mod collision;
pub mod flight;

pub use collision::*;
pub use flight::*;
