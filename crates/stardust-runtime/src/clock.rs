//! Frame clock

use std::time::Instant;

/// Longest delta a single frame may report, in seconds
const MAX_DELTA: f64 = 0.25;

/// Tracks elapsed time and the delta of the most recent frame
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames ticked so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per rendered frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // A stalled frame (debugger, suspended window) must not fling particles
        self.delta_time = elapsed.min(MAX_DELTA);
        self.total_time += self.delta_time;
    }

    /// Advance by a fixed delta, for headless or test stepping
    pub fn advance(&mut self, dt: f64) {
        self.first_tick = false;
        self.frame_count += 1;
        self.delta_time = dt.clamp(0.0, MAX_DELTA);
        self.total_time += self.delta_time;
    }

    /// Elapsed time as the simulation consumes it
    pub fn time(&self) -> f32 {
        self.total_time as f32
    }

    /// Frame delta as the simulation consumes it
    pub fn delta(&self) -> f32 {
        self.delta_time as f32
    }
}
