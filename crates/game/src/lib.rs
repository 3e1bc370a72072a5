//! Dogfight simulation core: one player fighter, one NPC bandit, procedural terrain, and a
//! runway to come home to.
//!
//! The host drives a [`SimWorld`]: set input, call `update(dt)`, read poses and the HUD.

pub mod aircraft;
pub mod camera;
pub mod combat;
pub mod config;
pub mod effects;
pub mod hud;
pub mod npc;
mod update;
pub mod weapons;
pub mod world;

pub use aircraft::{CameraMode, Objective, Outcome};
pub use camera::CameraPose;
pub use config::{ConfigError, SimConfig};
pub use effects::ParticleView;
pub use hud::HudSnapshot;
pub use weapons::ProjectileView;
pub use world::SimWorld;
