/// Shadow-map configuration.
///
/// Defaults are tuned for the demo scene: a square map as large as the window
/// and a small depth bias against shadow acne.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowSettings {
    /// Width and height of the square shadow map, in texels.
    pub map_size: u32,

    /// Depth format of the shadow map. Must be renderable and sampleable.
    pub format: wgpu::TextureFormat,

    /// Constant depth bias applied in the depth pass, in depth-buffer units.
    pub depth_bias_constant: i32,

    /// Slope-scaled depth bias applied in the depth pass.
    pub depth_bias_slope: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 800,
            format: wgpu::TextureFormat::Depth32Float,
            depth_bias_constant: 1,
            depth_bias_slope: 1.0,
        }
    }
}

impl ShadowSettings {
    pub(crate) fn depth_bias(&self) -> wgpu::DepthBiasState {
        wgpu::DepthBiasState {
            constant: self.depth_bias_constant,
            slope_scale: self.depth_bias_slope,
            clamp: 0.0,
        }
    }
}
