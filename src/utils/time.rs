use std::time::{Duration, Instant};

/// Frame clock: caps the frame rate by sleeping out the remainder of the
/// frame budget, then measures the delta for the next frame.
///
/// The frame loop calls [`sleep_until_frame_target`] after rendering and
/// [`tick`] right after, so the measured delta includes the sleep.
///
/// [`sleep_until_frame_target`]: Self::sleep_until_frame_target
/// [`tick`]: Self::tick
pub struct FrameTimer {
    start_time: Instant,
    last_update: Instant,
    /// Time between the two most recent ticks.
    pub delta: Duration,
    /// Total elapsed time since creation.
    pub elapsed: Duration,
    /// Total number of ticks.
    pub frame_count: u64,
}

impl FrameTimer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Sleeps whatever is left of `1 / target_fps` since the last tick.
    pub fn sleep_until_frame_target(&self, target_fps: u32) {
        if target_fps == 0 {
            return;
        }
        let frame_budget = Duration::from_secs_f64(1.0 / f64::from(target_fps));
        let spent = self.last_update.elapsed();
        if spent < frame_budget {
            std::thread::sleep(frame_budget - spent);
        }
    }

    /// Advances the clock one frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
