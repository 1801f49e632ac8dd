//! Two-pass hard shadow mapping.
//!
//! Frame structure:
//! 1. depth pass: the scene is rendered from the light into `ShadowMap`
//! 2. lit pass: the scene is rendered from the camera; every fragment is
//!    projected into the shadow map through its shadow matrix and compared
//!    against the stored depth
//!
//! `ShadowRenderer` owns all GPU resources and records both passes.

mod depth_pass;
mod lit_pass;
mod map;
mod renderer;
mod settings;
mod uniforms;

pub use map::ShadowMap;
pub use renderer::ShadowRenderer;
pub use settings::ShadowSettings;

/// Depth format of the camera-pass depth buffer.
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
