//! Procedural meshes for the demo scene.
//!
//! All meshes are non-indexed triangle lists with counter-clockwise front
//! faces.

use std::f32::consts::{PI, TAU};

use glam::{Vec3, Vec4};

use super::Vertex;

/// Sphere radius used by the demo scene.
pub const SPHERE_RADIUS: f32 = 0.5;

/// Stacks and slices of the demo spheres.
pub const SPHERE_DIVISIONS: u32 = 40;

/// Albedo of the demo spheres.
pub const SPHERE_COLOR: Vec4 = Vec4::new(0.3, 0.2, 0.7, 1.0);

/// Albedo of the ground plane.
pub const PLANE_COLOR: Vec4 = Vec4::new(0.8, 0.8, 0.8, 1.0);

/// Half the side length of the ground plane.
pub const PLANE_HALF_EXTENT: f32 = 5.0;

/// CPU-side triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|t| [t[0].position(), t[1].position(), t[2].position()])
    }
}

/// Tessellates a UV sphere centered on the origin.
///
/// `divisions` stacks span the polar angle from +Y (0) to −Y (π) and
/// `divisions` slices span the full azimuth. Each quad becomes two triangles,
/// so the mesh has `divisions² × 6` vertices. The triangles touching the poles
/// are degenerate.
pub fn uv_sphere(radius: f32, divisions: u32, color: Vec4) -> Mesh {
    if divisions == 0 {
        return Mesh::default();
    }

    let d_theta = PI / divisions as f32;
    let d_phi = TAU / divisions as f32;

    // Unit direction for polar angle `theta` and azimuth `phi`.
    let dir = |theta: f32, phi: f32| {
        Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
    };
    let vertex = |n: Vec3| Vertex::new(n * radius, n, color);

    let mut vertices = Vec::with_capacity((divisions * divisions * 6) as usize);

    for stack in 0..divisions {
        let theta0 = stack as f32 * d_theta;
        let theta1 = theta0 + d_theta;

        for slice in 0..divisions {
            let phi0 = slice as f32 * d_phi;
            let phi1 = phi0 + d_phi;

            let p1 = vertex(dir(theta0, phi0));
            let p2 = vertex(dir(theta0, phi1));
            let p3 = vertex(dir(theta1, phi1));
            let p4 = vertex(dir(theta1, phi0));

            vertices.extend_from_slice(&[p1, p2, p3, p1, p3, p4]);
        }
    }

    Mesh { vertices }
}

/// A square in the local XZ plane facing +Y.
pub fn plane(half_extent: f32, color: Vec4) -> Mesh {
    let h = half_extent.abs();
    let n = Vec3::Y;

    let a = Vertex::new(Vec3::new(-h, 0.0, -h), n, color);
    let b = Vertex::new(Vec3::new(-h, 0.0, h), n, color);
    let c = Vertex::new(Vec3::new(h, 0.0, h), n, color);
    let d = Vertex::new(Vec3::new(h, 0.0, -h), n, color);

    Mesh { vertices: vec![a, b, c, a, c, d] }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn face_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
        (b - a).cross(c - a)
    }

    // ── sphere ────────────────────────────────────────────────────────────

    #[test]
    fn sphere_vertex_count() {
        let mesh = uv_sphere(SPHERE_RADIUS, SPHERE_DIVISIONS, SPHERE_COLOR);
        assert_eq!(mesh.vertex_count(), 40 * 40 * 6);
    }

    #[test]
    fn sphere_zero_divisions_is_empty() {
        assert!(uv_sphere(1.0, 0, SPHERE_COLOR).is_empty());
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = uv_sphere(0.5, 12, SPHERE_COLOR);
        for v in &mesh.vertices {
            assert!((v.position().length() - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn sphere_normals_are_unit_radial() {
        let mesh = uv_sphere(2.0, 8, SPHERE_COLOR);
        for v in &mesh.vertices {
            let n = v.normal();
            assert!((n.length() - 1.0).abs() < EPS);
            assert!(n.dot(v.position().normalize()) > 1.0 - EPS);
        }
    }

    #[test]
    fn sphere_faces_point_outward() {
        let mesh = uv_sphere(1.0, 16, SPHERE_COLOR);
        let mut checked = 0;
        for tri in mesh.triangles() {
            let n = face_normal(tri);
            // Pole triangles collapse to a line.
            if n.length_squared() < 1e-10 {
                continue;
            }
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(n.dot(centroid) > 0.0, "inward-facing triangle {tri:?}");
            checked += 1;
        }
        // Two degenerate triangles per slice: one at each pole.
        assert_eq!(checked, 16 * 16 * 2 - 2 * 16);
    }

    #[test]
    fn sphere_reaches_both_poles() {
        let mesh = uv_sphere(1.0, 10, SPHERE_COLOR);
        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!((max_y - 1.0).abs() < EPS);
        assert!((min_y + 1.0).abs() < EPS);
    }

    #[test]
    fn sphere_carries_color() {
        let mesh = uv_sphere(1.0, 4, SPHERE_COLOR);
        assert!(mesh.vertices.iter().all(|v| v.color == SPHERE_COLOR.to_array()));
    }

    // ── plane ─────────────────────────────────────────────────────────────

    #[test]
    fn plane_is_two_upward_triangles() {
        let mesh = plane(PLANE_HALF_EXTENT, PLANE_COLOR);
        assert_eq!(mesh.vertex_count(), 6);
        for tri in mesh.triangles() {
            let n = face_normal(tri).normalize();
            assert!((n - Vec3::Y).length() < EPS);
        }
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn plane_spans_half_extent() {
        let mesh = plane(-3.0, PLANE_COLOR);
        for v in &mesh.vertices {
            assert_eq!(v.position[0].abs(), 3.0);
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[2].abs(), 3.0);
        }
    }
}
