use std::time::{Duration, Instant};

/// Frame timing with smoothed FPS calculation.
pub struct FrameTiming {
    /// Last frame timestamp.
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Frame timer starting now, with a reasonable initial FPS estimate.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call once per frame. Returns the time elapsed since the previous
    /// call and updates the smoothed FPS.
    pub fn end_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed
    }

    /// Current FPS (smoothed).
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frame_returns_elapsed_time() {
        let mut timing = FrameTiming::new();
        std::thread::sleep(Duration::from_millis(5));

        let dt = timing.end_frame();
        assert!(dt >= Duration::from_millis(5));
    }

    #[test]
    fn fps_converges_toward_frame_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..50 {
            std::thread::sleep(Duration::from_millis(2));
            let _ = timing.end_frame();
        }

        // ~500 Hz frames should pull the estimate well above the initial
        // 60 FPS seed.
        assert!(timing.fps() > 60.0);
    }
}
