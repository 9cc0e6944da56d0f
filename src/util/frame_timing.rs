use web_time::{Duration, Instant};

/// Longest frame delta handed to the simulation. Stalls (window drags,
/// breakpoints) are clamped so the loading bar and easing do not jump.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Frame timing with FPS calculation and optional frame limiting
pub struct FrameTiming {
    /// Minimum frame duration based on target FPS (zero = unlimited)
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Weight of the newest sample in the average
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Start a frame: returns the (clamped) time since the previous one and
    /// updates the FPS average.
    pub fn begin_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> Duration {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(MAX_FRAME_DELTA)
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        assert!(FrameTiming::new(0).should_render());
    }

    #[test]
    fn long_stalls_are_clamped() {
        let mut timing = FrameTiming::new(0);
        assert_eq!(timing.record(Duration::from_secs(3)), MAX_FRAME_DELTA);
        let frame = Duration::from_millis(16);
        assert_eq!(timing.record(frame), frame);
    }

    #[test]
    fn fps_moves_toward_samples() {
        let mut timing = FrameTiming::new(60);
        for _ in 0..200 {
            let _ = timing.record(Duration::from_millis(20));
        }
        assert!((timing.fps() - 50.0).abs() < 0.5, "{}", timing.fps());
    }
}
