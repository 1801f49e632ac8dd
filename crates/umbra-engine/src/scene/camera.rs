use glam::{Mat4, Vec3};

/// Fixed perspective camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// The demo camera: slightly above the scene, looking at the origin.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45f32.to_radians(),
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Right-handed projection with a 0..1 depth range, as wgpu expects.
    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(f32::EPSILON), self.near, self.far)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
