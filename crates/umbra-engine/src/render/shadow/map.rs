use anyhow::Result;

use crate::render::RenderCtx;

use super::ShadowSettings;

/// Usages the shadow map needs: written by the depth pass, sampled by the lit pass.
const REQUIRED_USAGES: wgpu::TextureUsages =
    wgpu::TextureUsages::RENDER_ATTACHMENT.union(wgpu::TextureUsages::TEXTURE_BINDING);

/// Core depth format: renderable and sampleable on every backend.
const FALLBACK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth texture rendered from the light, plus the comparison sampler used to
/// read it back.
pub struct ShadowMap {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    size: u32,
}

impl ShadowMap {
    /// Creates the shadow map target.
    ///
    /// The target is checked for completeness once. An incomplete target is
    /// logged and still created, with a format and size the device accepts;
    /// rendering continues either way.
    pub fn new(ctx: &RenderCtx<'_>, settings: &ShadowSettings) -> Self {
        let allowed = ctx
            .adapter
            .get_texture_format_features(settings.format)
            .allowed_usages;
        let max_dimension = ctx.device.limits().max_texture_dimension_2d;

        let (format, size) = resolve_target(settings, allowed, max_dimension);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("umbra shadow map"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: REQUIRED_USAGES,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest filtering with a single compare tap gives hard edges.
        // A reference depth <= stored depth means nothing sits between the
        // fragment and the light.
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("umbra shadow sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size,
        }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Side length in texels.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Format the texture was created with, which the depth pass must match.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.texture.format()
    }
}

/// Format and size the shadow map is actually created with.
///
/// A complete target keeps the configured values. An incomplete one is logged
/// and replaced by something every device accepts: `Depth32Float` when the
/// configured format is unusable, and a size clamped to the device limit.
pub(crate) fn resolve_target(
    settings: &ShadowSettings,
    allowed: wgpu::TextureUsages,
    max_dimension: u32,
) -> (wgpu::TextureFormat, u32) {
    let size = settings.map_size.clamp(1, max_dimension.max(1));

    match validate_target(settings.format, allowed, settings.map_size, max_dimension) {
        Ok(()) => {
            log::info!(
                "shadow map target created: {0}x{0} {1:?}",
                settings.map_size,
                settings.format
            );
            (settings.format, size)
        }
        Err(err) => {
            log::error!("shadow map target incomplete: {err:#}");
            let format_usable =
                settings.format.has_depth_aspect() && allowed.contains(REQUIRED_USAGES);
            let format = if format_usable {
                settings.format
            } else {
                FALLBACK_FORMAT
            };
            log::warn!("continuing with a {size}x{size} {format:?} shadow map");
            (format, size)
        }
    }
}

/// Completeness check for the shadow map target.
pub(crate) fn validate_target(
    format: wgpu::TextureFormat,
    allowed: wgpu::TextureUsages,
    size: u32,
    max_dimension: u32,
) -> Result<()> {
    anyhow::ensure!(format.has_depth_aspect(), "{format:?} is not a depth format");
    anyhow::ensure!(size > 0, "shadow map has zero size");
    anyhow::ensure!(
        size <= max_dimension,
        "shadow map size {size} exceeds the device limit {max_dimension}"
    );
    anyhow::ensure!(
        allowed.contains(REQUIRED_USAGES),
        "{format:?} cannot be both rendered to and sampled (allowed usages: {allowed:?})"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPTH: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    #[test]
    fn complete_target_passes() {
        validate_target(DEPTH, REQUIRED_USAGES | wgpu::TextureUsages::COPY_SRC, 800, 8192).unwrap();
    }

    #[test]
    fn size_at_limit_passes() {
        validate_target(DEPTH, REQUIRED_USAGES, 2048, 2048).unwrap();
    }

    #[test]
    fn zero_size_fails() {
        let err = validate_target(DEPTH, REQUIRED_USAGES, 0, 8192).unwrap_err();
        assert!(err.to_string().contains("zero size"));
    }

    #[test]
    fn oversized_fails() {
        let err = validate_target(DEPTH, REQUIRED_USAGES, 16384, 8192).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn unsampleable_format_fails() {
        validate_target(DEPTH, wgpu::TextureUsages::RENDER_ATTACHMENT, 800, 8192).unwrap_err();
    }

    #[test]
    fn color_format_fails() {
        let err =
            validate_target(wgpu::TextureFormat::Rgba8Unorm, REQUIRED_USAGES, 800, 8192).unwrap_err();
        assert!(err.to_string().contains("not a depth format"));
    }

    // ── resolve ───────────────────────────────────────────────────────────

    #[test]
    fn complete_target_keeps_settings() {
        let settings = ShadowSettings::default();
        assert_eq!(resolve_target(&settings, REQUIRED_USAGES, 8192), (DEPTH, 800));
    }

    #[test]
    fn color_format_falls_back_to_depth32() {
        let settings = ShadowSettings {
            format: wgpu::TextureFormat::Rgba8Unorm,
            ..ShadowSettings::default()
        };
        let (format, size) = resolve_target(&settings, REQUIRED_USAGES, 8192);
        assert_eq!(format, FALLBACK_FORMAT);
        assert_eq!(size, 800);
    }

    #[test]
    fn unsampleable_format_falls_back_to_depth32() {
        let settings = ShadowSettings {
            format: wgpu::TextureFormat::Depth24Plus,
            ..ShadowSettings::default()
        };
        let (format, _) =
            resolve_target(&settings, wgpu::TextureUsages::RENDER_ATTACHMENT, 8192);
        assert_eq!(format, FALLBACK_FORMAT);
    }

    #[test]
    fn bad_size_keeps_usable_format_and_clamps() {
        let zero = ShadowSettings {
            map_size: 0,
            ..ShadowSettings::default()
        };
        assert_eq!(resolve_target(&zero, REQUIRED_USAGES, 8192), (DEPTH, 1));

        let huge = ShadowSettings {
            map_size: 16384,
            ..ShadowSettings::default()
        };
        assert_eq!(resolve_target(&huge, REQUIRED_USAGES, 8192), (DEPTH, 8192));
    }
}
