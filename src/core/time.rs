//! Frame timing
//!
//! Supplies the "time since last frame" that frame-driven callers feed
//! into pursuit. Nothing in the ranking or prediction code reads it
//! implicitly.

use std::time::{Duration, Instant};

/// Frame clock
#[derive(Debug, Clone)]
pub struct Time {
    /// Time between the last two frames
    delta: Duration,
    /// Total time since the clock started
    elapsed: Duration,
    /// Frames recorded so far
    frame_count: u64,
    /// Wall-clock instant of the last `tick`
    last_tick: Option<Instant>,
}

impl Time {
    /// A clock at zero; the first frame has no delta
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            last_tick: None,
        }
    }

    /// Record a frame using the wall clock
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_tick = Some(now);
        self.record(delta);
    }

    /// Record a frame of fixed length (simulations, tests)
    pub fn advance(&mut self, delta: Duration) {
        self.record(delta);
    }

    fn record(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time between the last two frames, in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total time since the clock started, in seconds
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
