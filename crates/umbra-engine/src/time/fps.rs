/// Averages frame deltas over a fixed reporting window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    elapsed: f32,
    frames: u32,
}

impl FpsCounter {
    /// Reports once per `window` seconds. Non-positive windows report every frame.
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Records one frame of `dt` seconds.
    ///
    /// Returns the average frame rate when the reporting window has filled,
    /// then starts a new window.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt.max(0.0);
        self.frames += 1;

        if self.elapsed < self.window || self.elapsed <= 0.0 {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}
