//! Contact tests: projectile spheres, ground contact, and the world-boundary soft wall.

use engine_core::{Transform, Vec3};

/// Sphere test used for projectile hits. Strictly inside `radius` counts.
pub fn sphere_hit(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Whether a body at `position` is within `clearance` of the ground below it.
pub fn touches_ground(position: Vec3, ground_elevation: f32, clearance: f32) -> bool {
    position.y - ground_elevation < clearance
}

/// Horizontal distance between two points, ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    (d.x * d.x + d.z * d.z).sqrt()
}

/// Cylindrical boundary around the world origin.
///
/// Leaving it is not damaging; the offending translation is simply undone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftWall {
    pub radius: f32,
}

impl SoftWall {
    /// Wall at `fraction` of `world_size` from the origin.
    pub fn from_world_size(world_size: f32, fraction: f32) -> Self {
        Self {
            radius: world_size * fraction,
        }
    }

    pub fn contains(&self, position: Vec3) -> bool {
        horizontal_distance(position, Vec3::ZERO) <= self.radius
    }

    /// Undo `translation` if it carried `transform` past the wall. Returns true when reverted.
    pub fn enforce(&self, transform: &mut Transform, translation: Vec3) -> bool {
        if self.contains(transform.position) {
            return false;
        }
        transform.position -= translation;
        log::trace!(
            "soft wall: reverted translation at r={:.1}",
            transform.horizontal_distance()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_is_strict() {
        let a = Vec3::ZERO;
        assert!(sphere_hit(a, Vec3::new(0.0, 0.0, 24.9), 25.0));
        assert!(!sphere_hit(a, Vec3::new(0.0, 0.0, 25.0), 25.0));
    }

    #[test]
    fn ground_contact_uses_clearance() {
        assert!(touches_ground(Vec3::new(0.0, 11.5, 0.0), 10.0, 2.0));
        assert!(!touches_ground(Vec3::new(0.0, 12.5, 0.0), 10.0, 2.0));
    }

    #[test]
    fn fallback_elevation_never_touches() {
        assert!(!touches_ground(Vec3::new(0.0, -5000.0, 0.0), -1.0e6, 2.0));
    }

    #[test]
    fn soft_wall_reverts_outward_step() {
        let wall = SoftWall::from_world_size(10_000.0, 0.48);
        assert!((wall.radius - 4800.0).abs() < 1e-2);

        let mut t = Transform::from_position(Vec3::new(0.0, 300.0, 4790.0));
        let step = Vec3::new(0.0, 1.0, 20.0);
        t.translate(step);
        assert!(wall.enforce(&mut t, step));
        assert!(wall.contains(t.position));
        assert!((t.position.z - 4790.0).abs() < 1e-3);
    }

    #[test]
    fn soft_wall_allows_inside_motion() {
        let wall = SoftWall::from_world_size(10_000.0, 0.48);
        let mut t = Transform::from_position(Vec3::new(100.0, 300.0, 100.0));
        let step = Vec3::new(5.0, 0.0, 5.0);
        t.translate(step);
        assert!(!wall.enforce(&mut t, step));
        assert_eq!(t.position, Vec3::new(105.0, 300.0, 105.0));
    }
}
