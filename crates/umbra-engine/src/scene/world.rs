use glam::Vec3;

use super::geometry::{self, PLANE_COLOR, PLANE_HALF_EXTENT, SPHERE_COLOR, SPHERE_DIVISIONS, SPHERE_RADIUS};
use super::{Camera, Renderable};

/// The fixed demo scene: two spheres resting above a ground plane.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    objects: Vec<Renderable>,
}

impl Scene {
    pub const SPHERE1_ORIGIN: Vec3 = Vec3::ZERO;
    pub const SPHERE2_ORIGIN: Vec3 = Vec3::new(-1.0, 0.0, -2.0);
    /// Ground level touches the bottom of the spheres.
    pub const PLANE_ORIGIN: Vec3 = Vec3::new(0.0, -SPHERE_RADIUS, 0.0);

    pub fn new(aspect: f32) -> Self {
        let camera = Camera::new(aspect);

        let sphere = geometry::uv_sphere(SPHERE_RADIUS, SPHERE_DIVISIONS, SPHERE_COLOR);
        let plane = geometry::plane(PLANE_HALF_EXTENT, PLANE_COLOR);

        let objects = vec![
            Renderable::new("sphere 1", sphere.clone(), Self::SPHERE1_ORIGIN, &camera),
            Renderable::new("sphere 2", sphere, Self::SPHERE2_ORIGIN, &camera),
            Renderable::new("plane", plane, Self::PLANE_ORIGIN, &camera),
        ];

        log::debug!(
            "scene built: {}",
            objects
                .iter()
                .map(|o| format!("{} ({} vertices)", o.name, o.vertex_count()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self { camera, objects }
    }

    /// Updates the camera aspect ratio.
    ///
    /// Returns `true` when the cached object matrices were recomputed.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !aspect.is_finite() || aspect <= 0.0 || aspect == self.camera.aspect {
            return false;
        }

        self.camera.aspect = aspect;
        for obj in &mut self.objects {
            obj.update_matrices(&self.camera);
        }
        true
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn objects(&self) -> &[Renderable] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_two_spheres_and_a_plane() {
        let scene = Scene::new(1.0);
        let objects = scene.objects();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0].origin(), Scene::SPHERE1_ORIGIN);
        assert_eq!(objects[1].origin(), Scene::SPHERE2_ORIGIN);
        assert_eq!(objects[2].origin(), Scene::PLANE_ORIGIN);
        assert_eq!(objects[0].vertex_count(), SPHERE_DIVISIONS * SPHERE_DIVISIONS * 6);
        assert_eq!(objects[2].vertex_count(), 6);
    }

    #[test]
    fn set_aspect_recomputes_matrices() {
        let mut scene = Scene::new(1.0);
        let before = scene.objects()[0].mvp();

        assert!(scene.set_aspect(16.0 / 9.0));
        assert!(!scene.objects()[0].mvp().abs_diff_eq(before, 1e-6));
        assert_eq!(scene.camera().aspect, 16.0 / 9.0);
    }

    #[test]
    fn set_aspect_ignores_invalid_and_unchanged() {
        let mut scene = Scene::new(1.0);
        assert!(!scene.set_aspect(1.0));
        assert!(!scene.set_aspect(0.0));
        assert!(!scene.set_aspect(f32::NAN));
        assert_eq!(scene.camera().aspect, 1.0);
    }

    #[test]
    fn spheres_rest_on_the_plane() {
        let scene = Scene::new(1.0);
        let lowest = scene.objects()[0]
            .mesh
            .vertices
            .iter()
            .map(|v| v.position[1] + Scene::SPHERE1_ORIGIN.y)
            .fold(f32::MAX, f32::min);
        assert!((lowest - Scene::PLANE_ORIGIN.y).abs() < 1e-5);
    }
}
