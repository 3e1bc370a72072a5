//! Closed-form terrain height field: rolling hills, a ring of boundary mountains, and a
//! flattened runway.
//!
//! The field is evaluated analytically at any (x, z), so physics and the render mesh
//! always agree; there is no grid to interpolate and no seam at the mountain ring.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Step used for central-difference normals, in world units.
const NORMAL_EPSILON: f32 = 1.0;

/// Configuration for terrain generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Hill frequency along X (radians per world unit).
    pub kx: f32,
    /// Hill frequency along Z (radians per world unit).
    pub kz: f32,
    /// Peak hill height.
    pub amplitude: f32,
    /// Radius beyond which the mountain ramp starts.
    pub boundary_radius: f32,
    /// Horizontal distance over which the ramp gains `ramp_height`.
    pub ramp_width: f32,
    /// Ramp height at one `ramp_width` past the boundary (grows quadratically).
    pub ramp_height: f32,
    /// Runway centre in the XZ plane.
    pub runway_center: Vec2,
    /// Half extent of the runway across its axis (X).
    pub runway_half_width: f32,
    /// Half extent of the runway along its axis (Z).
    pub runway_half_length: f32,
    /// Elevation the runway footprint is flattened to.
    pub runway_elevation: f32,
    /// Elevation reported when the field cannot be sampled. Far below any entity.
    pub fallback_elevation: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            kx: 0.002,
            kz: 0.0015,
            amplitude: 40.0,
            boundary_radius: 4000.0,
            ramp_width: 500.0,
            ramp_height: 600.0,
            runway_center: Vec2::ZERO,
            runway_half_width: 40.0,
            runway_half_length: 400.0,
            runway_elevation: 0.0,
            fallback_elevation: -1.0e6,
        }
    }
}

/// Ground elevation and surface normal at a horizontal position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    pub elevation: f32,
    pub normal: Vec3,
}

/// Immutable height field, generated once at startup.
#[derive(Debug, Clone)]
pub struct HeightField {
    config: TerrainConfig,
}

impl HeightField {
    pub fn new(config: TerrainConfig) -> Self {
        log::debug!(
            "terrain: hills A={} boundary R={} runway {}x{} at {:?}",
            config.amplitude,
            config.boundary_radius,
            config.runway_half_width * 2.0,
            config.runway_half_length * 2.0,
            config.runway_center
        );
        Self { config }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Ground elevation at (x, z), or the fallback elevation if the point cannot be sampled.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.elevation(x, z)
            .unwrap_or(self.config.fallback_elevation)
    }

    /// Elevation and normal at (x, z). `None` for non-finite coordinates.
    pub fn sample(&self, x: f32, z: f32) -> Option<TerrainSample> {
        let elevation = self.elevation(x, z)?;
        let e = NORMAL_EPSILON;
        let dx = self.height_at(x - e, z) - self.height_at(x + e, z);
        let dz = self.height_at(x, z - e) - self.height_at(x, z + e);
        let normal = Vec3::new(dx, 2.0 * e, dz).try_normalize().unwrap_or(Vec3::Y);
        Some(TerrainSample { elevation, normal })
    }

    /// Whether (x, z) lies inside the runway footprint.
    pub fn is_on_runway(&self, x: f32, z: f32) -> bool {
        let c = &self.config;
        (x - c.runway_center.x).abs() <= c.runway_half_width
            && (z - c.runway_center.y).abs() <= c.runway_half_length
    }

    /// Runway centre on the ground, in world space.
    pub fn runway_center(&self) -> Vec3 {
        let c = &self.config;
        Vec3::new(c.runway_center.x, c.runway_elevation, c.runway_center.y)
    }

    fn elevation(&self, x: f32, z: f32) -> Option<f32> {
        if !x.is_finite() || !z.is_finite() {
            return None;
        }
        let c = &self.config;
        if self.is_on_runway(x, z) {
            return Some(c.runway_elevation);
        }

        let mut h = (x * c.kx).sin() * (z * c.kz).cos() * c.amplitude;

        let dist = (x * x + z * z).sqrt();
        if dist > c.boundary_radius && c.ramp_width > 0.0 {
            let t = (dist - c.boundary_radius) / c.ramp_width;
            h += t * t * c.ramp_height;
        }

        h.is_finite().then_some(h)
    }
}

/// Vertex for the terrain render mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// 1.0 on the runway, 0.0 elsewhere, so the shader can paint markings.
    pub runway: f32,
}

/// Square grid mesh of the height field, centred on the origin.
#[derive(Debug, Default)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Sample `field` on a `resolution` x `resolution` grid spanning `size` world units.
    ///
    /// Resolutions below 2 produce an empty mesh.
    pub fn generate(field: &HeightField, size: f32, resolution: u32) -> Self {
        if resolution < 2 {
            return Self::default();
        }
        let res = resolution as usize;
        let step = size / (resolution - 1) as f32;
        let half = size / 2.0;

        let mut vertices = Vec::with_capacity(res * res);
        for iz in 0..res {
            for ix in 0..res {
                let x = ix as f32 * step - half;
                let z = iz as f32 * step - half;
                let sample = field.sample(x, z).unwrap_or(TerrainSample {
                    elevation: field.config().fallback_elevation,
                    normal: Vec3::Y,
                });
                vertices.push(TerrainVertex {
                    position: [x, sample.elevation, z],
                    normal: sample.normal.to_array(),
                    uv: [
                        ix as f32 / (res - 1) as f32,
                        iz as f32 / (res - 1) as f32,
                    ],
                    runway: if field.is_on_runway(x, z) { 1.0 } else { 0.0 },
                });
            }
        }

        let mut indices = Vec::with_capacity((res - 1) * (res - 1) * 6);
        for iz in 0..(res - 1) {
            for ix in 0..(res - 1) {
                let i0 = (iz * res + ix) as u32;
                let i1 = i0 + 1;
                let i2 = i0 + res as u32;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        log::debug!(
            "terrain mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );
        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> HeightField {
        HeightField::new(TerrainConfig::default())
    }

    #[test]
    fn runway_is_flat_and_level() {
        let f = field();
        let c = f.config().clone();
        for &(x, z) in &[(0.0, 0.0), (30.0, -350.0), (-39.0, 399.0)] {
            assert_eq!(f.height_at(x, z), c.runway_elevation);
            let s = f.sample(x, z).expect("finite");
            assert!((s.normal - Vec3::Y).length() < 1e-3, "normal at ({x}, {z})");
        }
    }

    #[test]
    fn hills_follow_closed_form() {
        let f = field();
        let c = f.config().clone();
        let (x, z) = (900.0_f32, 1200.0_f32);
        let expected = (x * c.kx).sin() * (z * c.kz).cos() * c.amplitude;
        assert!((f.height_at(x, z) - expected).abs() < 1e-4);
        assert!(f.height_at(x, z).abs() <= c.amplitude);
    }

    #[test]
    fn mountains_rise_past_boundary() {
        let f = field();
        let c = f.config().clone();
        let inside = f.height_at(0.0, c.boundary_radius - 10.0);
        let ramp_top = f.height_at(0.0, c.boundary_radius + c.ramp_width);
        assert!(inside <= c.amplitude);
        assert!(ramp_top > c.ramp_height - c.amplitude);
        let further = f.height_at(0.0, c.boundary_radius + 2.0 * c.ramp_width);
        assert!(further > ramp_top);
    }

    #[test]
    fn non_finite_coordinates_use_fallback() {
        let f = field();
        assert!(f.sample(f32::NAN, 0.0).is_none());
        assert_eq!(f.height_at(f32::INFINITY, 0.0), f.config().fallback_elevation);
    }

    #[test]
    fn mesh_matches_height_field() {
        let f = field();
        let mesh = TerrainMesh::generate(&f, 2000.0, 9);
        assert_eq!(mesh.vertices.len(), 81);
        assert_eq!(mesh.indices.len(), 8 * 8 * 6);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert_eq!(y, f.height_at(x, z));
        }
        let centre = &mesh.vertices[40];
        assert_eq!(centre.runway, 1.0);
    }

    #[test]
    fn degenerate_mesh_is_empty() {
        let mesh = TerrainMesh::generate(&field(), 100.0, 1);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
