/// Initialization parameters for the GPU layer.
///
/// Add configuration flags only when a concrete platform or backend
/// requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available; `false` prefers a
    /// linear one.
    ///
    /// With an sRGB target the shaded values are gamma-encoded on write,
    /// which brightens mid tones.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// `Fifo` is the portable default. `AutoNoVsync` uncaps the frame rate,
    /// which is what the demo uses to report FPS.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    ///
    /// The shadow renderer needs none: comparison sampling of `Depth32Float`
    /// is core functionality.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Vsync disabled when the platform allows it, and a linear (non-sRGB)
    /// surface so shaded colors reach the screen unencoded.
    pub fn uncapped() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_disables_vsync_and_srgb() {
        let init = GpuInit::uncapped();
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert!(!init.prefer_srgb);
    }

    #[test]
    fn default_keeps_fifo_and_srgb() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(init.prefer_srgb);
    }
}
