use glam::{Mat4, Vec3, Vec4};

/// Single point light that also acts as the shadow-casting viewpoint.
///
/// Invariant: `shadow` is always `bias * projection * view` for the current
/// position. Position changes only go through methods that recalibrate, so a
/// stale shadow matrix cannot be observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    position: Vec3,
    target: Vec3,
    intensity: Vec3,

    bias: Mat4,
    projection: Mat4,
    view: Mat4,
    shadow: Mat4,
}

/// Discrete light movements bound to keys by the application.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LightCommand {
    /// −Z.
    Forward,
    /// +Z.
    Back,
    /// −X.
    Left,
    /// +X.
    Right,
    /// +Y.
    Raise,
    /// −Y, floored at `Light::MIN_HEIGHT`.
    Lower,
    /// Back to `Light::RESET_POSITION`.
    Reset,
}

impl Light {
    pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 10.0, 0.0);

    /// Slightly off-axis so the light does not start exactly above the target.
    pub const RESET_POSITION: Vec3 = Vec3::new(0.1, 10.0, 0.0);

    /// The light never goes lower than this.
    pub const MIN_HEIGHT: f32 = 10.0;

    /// Distance covered by one movement command.
    pub const STEP: f32 = 0.3;

    /// Vertical field of view of the light frustum, degrees.
    pub const FOV_Y_DEGREES: f32 = 45.0;

    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 100.0;

    /// |forward·Y| above which the look-at switches its up vector to +Z.
    /// The reset position (0.1, 10, 0) stays below it.
    const VERTICAL_COS: f32 = 0.99999;

    pub fn new() -> Self {
        let mut light = Self {
            position: Self::INITIAL_POSITION,
            target: Vec3::ZERO,
            intensity: Vec3::ONE,
            bias: Self::bias_matrix(),
            // The shadow map is square.
            projection: Mat4::perspective_rh(
                Self::FOV_Y_DEGREES.to_radians(),
                1.0,
                Self::NEAR,
                Self::FAR,
            ),
            view: Mat4::IDENTITY,
            shadow: Mat4::IDENTITY,
        };
        light.recalibrate();
        light
    }

    /// Maps clip space to shadow-map texture space.
    ///
    /// wgpu clip space has x, y in −1..1 with +y up and z already in 0..1,
    /// while texture coordinates run 0..1 with v pointing down. Only x and y
    /// need remapping; depth passes through.
    pub fn bias_matrix() -> Mat4 {
        Mat4::from_cols(
            Vec4::new(0.5, 0.0, 0.0, 0.0),
            Vec4::new(0.0, -0.5, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.5, 0.5, 0.0, 1.0),
        )
    }

    /// Recomputes the view and shadow matrices from the current position.
    pub fn recalibrate(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.target, self.up());
        self.shadow = self.bias * self.projection * self.view;
    }

    /// Up vector for the look-at: +Y, or +Z when looking straight up or
    /// down where +Y would be degenerate.
    fn up(&self) -> Vec3 {
        let forward = self.forward();
        if forward.dot(Vec3::Y).abs() > Self::VERTICAL_COS { Vec3::Z } else { Vec3::Y }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalibrate();
    }

    /// Applies one movement command and recalibrates.
    pub fn apply(&mut self, command: LightCommand) {
        let step = Self::STEP;
        let mut p = self.position;
        match command {
            LightCommand::Forward => p.z -= step,
            LightCommand::Back => p.z += step,
            LightCommand::Left => p.x -= step,
            LightCommand::Right => p.x += step,
            LightCommand::Raise => p.y += step,
            LightCommand::Lower => p.y = (p.y - step).max(Self::MIN_HEIGHT),
            LightCommand::Reset => p = Self::RESET_POSITION,
        }
        self.set_position(p);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The point the light is aimed at.
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Unit direction the light is facing.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Y)
    }

    #[inline]
    pub fn intensity(&self) -> Vec3 {
        self.intensity
    }

    #[inline]
    pub fn bias(&self) -> Mat4 {
        self.bias
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// `bias * projection * view`.
    #[inline]
    pub fn shadow_matrix(&self) -> Mat4 {
        self.shadow
    }

    /// `projection * view`, used to render the depth pass.
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Shadow matrix for an object with the given model matrix.
    #[inline]
    pub fn shadow_matrix_for(&self, model: Mat4) -> Mat4 {
        self.shadow * model
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    /// Projects a world point into shadow-map space (u, v, depth).
    fn to_shadow_space(light: &Light, p: Vec3) -> Vec3 {
        let s = light.shadow_matrix() * p.extend(1.0);
        s.truncate() / s.w
    }

    // ── bias ──────────────────────────────────────────────────────────────

    #[test]
    fn bias_maps_clip_corners_to_texture_corners() {
        let bias = Light::bias_matrix();
        let top_left = bias * Vec4::new(-1.0, 1.0, 0.25, 1.0);
        let bottom_right = bias * Vec4::new(1.0, -1.0, 0.75, 1.0);
        assert!((top_left - Vec4::new(0.0, 0.0, 0.25, 1.0)).length() < EPS);
        assert!((bottom_right - Vec4::new(1.0, 1.0, 0.75, 1.0)).length() < EPS);
    }

    #[test]
    fn bias_commutes_with_perspective_divide() {
        let bias = Light::bias_matrix();
        let clip = Vec4::new(0.5, -0.25, 0.3, 2.0);
        let a = bias * clip;
        let ndc = clip / clip.w;
        let b = bias * ndc;
        assert!((a / a.w - b).length() < EPS);
    }

    // ── shadow matrix ─────────────────────────────────────────────────────

    #[test]
    fn initial_shadow_matrix_is_composed() {
        let light = Light::new();
        let expected = light.bias() * light.projection() * light.view();
        assert!(light.shadow_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn point_below_light_hits_map_center() {
        let light = Light::new();
        let uvz = to_shadow_space(&light, Vec3::ZERO);
        assert!((uvz.x - 0.5).abs() < EPS);
        assert!((uvz.y - 0.5).abs() < EPS);
        assert!(uvz.z > 0.0 && uvz.z < 1.0);
    }

    #[test]
    fn occluder_is_closer_than_receiver() {
        let light = Light::new();
        let top_of_sphere = to_shadow_space(&light, Vec3::new(0.0, 0.5, 0.0));
        let ground = to_shadow_space(&light, Vec3::new(0.0, -0.5, 0.0));
        assert!((top_of_sphere.x - ground.x).abs() < EPS);
        assert!((top_of_sphere.y - ground.y).abs() < EPS);
        assert!(top_of_sphere.z < ground.z);
    }

    #[test]
    fn per_object_shadow_matrix_applies_model() {
        let light = Light::new();
        let model = Mat4::from_translation(Vec3::new(-1.0, 0.0, -2.0));
        let s = light.shadow_matrix_for(model);
        let via_model = s * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let direct = light.shadow_matrix() * Vec4::new(-1.0, 0.0, -2.0, 1.0);
        assert!((via_model - direct).length() < EPS);
    }

    // ── recalibration ─────────────────────────────────────────────────────

    #[test]
    fn every_command_recalibrates() {
        let commands = [
            LightCommand::Forward,
            LightCommand::Back,
            LightCommand::Left,
            LightCommand::Right,
            LightCommand::Raise,
            LightCommand::Lower,
            LightCommand::Reset,
        ];
        let mut light = Light::new();
        for cmd in commands {
            light.apply(cmd);
            let mut fresh = light.clone();
            fresh.recalibrate();
            assert!(light.shadow_matrix().abs_diff_eq(fresh.shadow_matrix(), EPS), "{cmd:?}");
            // The aim target stays centered whatever the position.
            let uvz = to_shadow_space(&light, light.target());
            assert!((uvz.x - 0.5).abs() < EPS && (uvz.y - 0.5).abs() < EPS, "{cmd:?}");
        }
    }

    #[test]
    fn moving_changes_shadow_matrix() {
        let mut light = Light::new();
        let before = light.shadow_matrix();
        light.apply(LightCommand::Right);
        assert!(!light.shadow_matrix().abs_diff_eq(before, EPS));
    }

    // ── movement ──────────────────────────────────────────────────────────

    #[test]
    fn commands_step_along_axes() {
        let mut light = Light::new();
        let start = light.position();

        light.apply(LightCommand::Forward);
        assert!((light.position() - (start - Vec3::Z * Light::STEP)).length() < EPS);

        light.apply(LightCommand::Back);
        light.apply(LightCommand::Right);
        assert!((light.position() - (start + Vec3::X * Light::STEP)).length() < EPS);

        light.apply(LightCommand::Left);
        light.apply(LightCommand::Raise);
        assert!((light.position() - (start + Vec3::Y * Light::STEP)).length() < EPS);
    }

    #[test]
    fn lowering_stops_at_min_height() {
        let mut light = Light::new();
        light.apply(LightCommand::Lower);
        assert_eq!(light.position().y, Light::MIN_HEIGHT);

        light.apply(LightCommand::Raise);
        light.apply(LightCommand::Raise);
        light.apply(LightCommand::Lower);
        assert!((light.position().y - (Light::MIN_HEIGHT + Light::STEP)).abs() < EPS);

        for _ in 0..5 {
            light.apply(LightCommand::Lower);
        }
        assert_eq!(light.position().y, Light::MIN_HEIGHT);
    }

    #[test]
    fn reset_returns_to_reset_position() {
        let mut light = Light::new();
        light.apply(LightCommand::Right);
        light.apply(LightCommand::Raise);
        light.apply(LightCommand::Reset);
        assert_eq!(light.position(), Light::RESET_POSITION);
    }

    #[test]
    fn forward_points_at_target() {
        let mut light = Light::new();
        assert!((light.forward() - Vec3::NEG_Y).length() < EPS);
        light.set_position(Vec3::new(3.0, 4.0, 0.0));
        assert!((light.forward() - Vec3::new(-0.6, -0.8, 0.0)).length() < EPS);
    }

    // ── look-at up vector ─────────────────────────────────────────────────

    #[test]
    fn straight_down_uses_z_up() {
        let light = Light::new();
        let expected = Mat4::look_at_rh(Light::INITIAL_POSITION, Vec3::ZERO, Vec3::Z);
        assert!(light.view().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn reset_position_uses_y_up() {
        let mut light = Light::new();
        light.apply(LightCommand::Reset);
        let expected = Mat4::look_at_rh(Light::RESET_POSITION, Vec3::ZERO, Vec3::Y);
        assert!(light.view().abs_diff_eq(expected, EPS));
        assert!(light.view().is_finite());
    }
}
