//! Camera rig following the player aircraft.

use engine_core::{Mat4, Transform, Vec3};

use crate::aircraft::CameraMode;
use crate::config::CameraConfig;

/// Eye, aim point, and up vector for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Derives the camera from the player pose. The only state is the smoothed chase position.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    smoothed: Option<Vec3>,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            smoothed: None,
        }
    }

    pub fn update(&mut self, aircraft: &Transform, mode: CameraMode) -> CameraPose {
        let forward = aircraft.forward();
        match mode {
            CameraMode::Chase => {
                let goal = aircraft.transform_point(self.config.chase_offset);
                let position = match self.smoothed {
                    Some(prev) => prev.lerp(goal, self.config.chase_blend),
                    None => goal,
                };
                self.smoothed = Some(position);
                CameraPose {
                    position,
                    target: aircraft.position + forward * self.config.chase_look_ahead,
                    up: Vec3::Y,
                }
            }
            CameraMode::Cockpit => {
                let position = aircraft.transform_point(self.config.cockpit_offset);
                // Leaving the cockpit eases out from here.
                self.smoothed = Some(position);
                CameraPose {
                    position,
                    target: aircraft.position + forward * self.config.cockpit_look_ahead,
                    up: aircraft.up(),
                }
            }
        }
    }
}
