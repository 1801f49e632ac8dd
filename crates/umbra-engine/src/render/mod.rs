//! GPU rendering subsystem.
//!
//! Renderers consume the `scene` model and issue GPU commands via wgpu. Each
//! renderer owns its GPU resources (pipelines, buffers, textures) and creates
//! them lazily on first use.

mod ctx;
pub mod shadow;
mod viewport;

pub use ctx::{RenderCtx, RenderTarget};
pub use viewport::Viewport;
