//! Scene model: the fixed three-object scene, its camera, and the light.
//!
//! Everything here is CPU-side and GPU-agnostic; the renderer uploads meshes
//! and matrices from these types.

mod camera;
pub mod geometry;
mod light;
mod renderable;
mod vertex;
mod world;

pub use camera::Camera;
pub use geometry::Mesh;
pub use light::{Light, LightCommand};
pub use renderable::Renderable;
pub use vertex::Vertex;
pub use world::Scene;
