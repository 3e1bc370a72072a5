//! Pose type and rotation helpers for airborne entities.
//!
//! Aircraft use a +Z-forward, +Y-up body frame: the nose points along the body +Z axis
//! and the left wing along body +X.

use glam::{Mat3, Quat, Vec3};

/// Position and orientation of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Nose direction: world +Z rotated by the current orientation.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Canopy direction (body +Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Left wing direction (body +X).
    pub fn left(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Nose elevation above the horizon in radians (negative when diving).
    pub fn pitch_angle(&self) -> f32 {
        self.forward().y.clamp(-1.0, 1.0).asin()
    }

    /// Distance from the world origin in the XZ plane.
    pub fn horizontal_distance(&self) -> f32 {
        Vec3::new(self.position.x, 0.0, self.position.z).length()
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Pitch about the body X axis. Positive raises the nose.
    pub fn pitch_local(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_x(-angle)).normalize();
    }

    /// Roll about the body Z axis. Positive lifts the left wing.
    pub fn roll_local(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_z(angle)).normalize();
    }

    /// Yaw about the body Y axis. Positive swings the nose toward the left wing.
    pub fn yaw_local(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }

    /// Map a point expressed in the body frame into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

/// Orientation whose body +Z looks along `direction` with body +Y as close to `up` as possible.
///
/// Returns `None` when `direction` is degenerate or parallel to `up`.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let left = up.cross(forward).try_normalize()?;
    let body_up = forward.cross(left);
    Some(Quat::from_mat3(&Mat3::from_cols(left, body_up, forward)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn identity_faces_positive_z() {
        let t = Transform::default();
        assert!((t.forward() - Vec3::Z).length() < EPS);
        assert!((t.up() - Vec3::Y).length() < EPS);
        assert!(t.pitch_angle().abs() < EPS);
    }

    #[test]
    fn positive_pitch_raises_nose() {
        let mut t = Transform::default();
        t.pitch_local(0.2);
        assert!(t.forward().y > 0.0);
        assert!((t.pitch_angle() - 0.2).abs() < EPS);
    }

    #[test]
    fn roll_keeps_forward() {
        let mut t = Transform::default();
        t.roll_local(0.7);
        assert!((t.forward() - Vec3::Z).length() < EPS);
        assert!(t.left().y > 0.0);
    }

    #[test]
    fn look_rotation_matches_direction() {
        let dir = Vec3::new(1.0, 0.3, -2.0).normalize();
        let q = look_rotation(dir, Vec3::Y).expect("non-degenerate");
        assert!((q * Vec3::Z - dir).length() < EPS);
        assert!((q * Vec3::Y).y > 0.0);
    }

    #[test]
    fn look_rotation_rejects_vertical() {
        assert!(look_rotation(Vec3::Y, Vec3::Y).is_none());
        assert!(look_rotation(Vec3::ZERO, Vec3::Y).is_none());
    }
}
