//! Variable-rate frame clock.
//!
//! Flights are timed in wall-clock seconds, so every frame advances the
//! camera by the real time since the previous frame. A stalled frame (tab in
//! the background, debugger break) is clamped so the camera does not jump.

use std::time::Instant;
use tracing::warn;

/// Maximum frame time in seconds. Longer frames are clamped to this.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Clamp a raw frame time. Negative or non-finite input counts as zero.
pub fn clamp_frame_time(raw: f64) -> f64 {
    if !raw.is_finite() || raw < 0.0 {
        return 0.0;
    }
    if raw > MAX_FRAME_TIME {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            raw * 1000.0,
            MAX_FRAME_TIME * 1000.0
        );
        return MAX_FRAME_TIME;
    }
    raw
}

/// Measures the time between frames.
pub struct FrameClock {
    previous_time: Instant,
    total_time: f64,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            previous_time: start,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Start a frame now and return its clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Start a frame at `now`. An instant earlier than the previous frame
    /// yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = now
            .checked_duration_since(self.previous_time)
            .map_or(0.0, |d| d.as_secs_f64());
        self.previous_time = now;

        let dt = clamp_frame_time(raw);
        self.total_time += dt;
        self.frame_count += 1;
        dt as f32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of clamped frame times, in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
