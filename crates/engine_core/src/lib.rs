//! Core engine types and utilities for the dogfight simulation.
//!
//! This crate provides the foundational types used across all simulation systems:
//! - Aircraft pose (`Transform`) with a +Z-forward convention
//! - Frame clock with a clamped delta
//! - Common component types shared by the ECS-backed collections

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
