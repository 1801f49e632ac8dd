//! Time subsystem.
//!
//! Frame timing utilities without coupling to the runtime:
//! - one `FrameClock` per window; call `tick()` once per presented frame
//! - `FpsCounter` turns frame deltas into a periodic frame-rate report

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
