use glam::{Mat3, Mat4, Vec3};

use super::{Camera, Mesh};

/// One object of the scene: a mesh placed at a world origin, plus the camera
/// matrices cached for it.
///
/// Objects never move, so the matrices only change when the camera does.
#[derive(Debug, Clone)]
pub struct Renderable {
    pub name: &'static str,
    pub mesh: Mesh,
    origin: Vec3,
    model_view: Mat4,
    mvp: Mat4,
    normal_matrix: Mat3,
}

impl Renderable {
    pub fn new(name: &'static str, mesh: Mesh, origin: Vec3, camera: &Camera) -> Self {
        let mut r = Self {
            name,
            mesh,
            origin,
            model_view: Mat4::IDENTITY,
            mvp: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
        };
        r.update_matrices(camera);
        r
    }

    /// Recomputes the cached model-view, MVP and normal matrices.
    pub fn update_matrices(&mut self, camera: &Camera) {
        let model = self.model();
        self.model_view = camera.view() * model;
        self.mvp = camera.projection() * self.model_view;
        self.normal_matrix = Mat3::from_mat4(self.model_view).inverse().transpose();
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.origin)
    }

    #[inline]
    pub fn model_view(&self) -> Mat4 {
        self.model_view
    }

    #[inline]
    pub fn mvp(&self) -> Mat4 {
        self.mvp
    }

    #[inline]
    pub fn normal_matrix(&self) -> Mat3 {
        self.normal_matrix
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }
}
