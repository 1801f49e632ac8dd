//! Umbra engine crate.
//!
//! Owns the platform + GPU runtime pieces and the shadow-mapping renderer used
//! by the demo binary.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod scene;
