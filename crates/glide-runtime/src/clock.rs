//! Game clock with fixed-timestep accumulator

use tracing::debug;

/// Longest frame delta accepted before clamping (avoids spiral of death).
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks elapsed time and provides a fixed-timestep accumulator
pub struct GameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Accumulated time for fixed-step consumption
    accumulator: f64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
        }
    }
}

impl GameClock {
    /// Create a new game clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance the clock by an externally supplied delta. Call once per frame.
    ///
    /// Negative deltas count as 0. Deltas above `MAX_FRAME_TIME` are clamped,
    /// so a fixed timestep longer than that can never be consumed in one frame.
    pub fn advance(&mut self, elapsed: f64) {
        let elapsed = elapsed.max(0.0);
        if elapsed > MAX_FRAME_TIME {
            debug!(elapsed, "frame delta clamped to {}s", MAX_FRAME_TIME);
        }
        self.delta_time = elapsed.min(MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }
}
