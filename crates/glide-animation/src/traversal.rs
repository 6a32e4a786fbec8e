//! Playback state machine: play / pause / resume / reset and per-tick advance

use crate::arc_length::ArcLengthTable;
use crate::config::{AnimatorConfig, TraversalMode};
use tracing::{debug, warn};

/// Where a traversal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    /// Not started, or returned here by `reset()`
    Idle,
    Playing,
    Paused,
    /// Reached the end of a non-looping traversal
    Complete,
}

/// Mutable playback counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Current spline parameter in [0, 1]
    pub progress: f64,
    /// Distance travelled along the path (distance mode only)
    pub distance_traveled: f64,
    pub is_playing: bool,
    pub is_complete: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            distance_traveled: 0.0,
            is_playing: false,
            is_complete: false,
        }
    }
}

/// What happened at the traversal bound during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Stayed strictly inside the bound
    Inside,
    /// Wrapped around `laps` times (looping only)
    Wrapped { laps: u32 },
    /// Clamped to the end and completed (non-looping only)
    Completed,
}

/// Result of one applied tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Spline parameter to evaluate for this tick
    pub parameter: f64,
    pub boundary: Boundary,
}

/// Drives a `PlaybackState` through distance- or time-based traversal.
#[derive(Debug, Clone)]
pub struct Traversal {
    mode: TraversalMode,
    duration: f64,
    looping: bool,
    speed: f64,
    state: TraversalState,
    playback: PlaybackState,
}

impl Traversal {
    pub fn new(config: &AnimatorConfig) -> Self {
        Self {
            mode: config.mode,
            duration: config.duration,
            looping: config.looping,
            speed: config.speed,
            state: TraversalState::Idle,
            playback: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Override the distance-mode speed; takes effect on the next tick.
    /// Non-finite speeds are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if !speed.is_finite() {
            warn!(speed, "ignoring non-finite speed");
            return;
        }
        self.speed = speed;
    }

    /// Restart from the beginning, whatever the current state.
    pub fn play(&mut self) {
        self.playback = PlaybackState {
            is_playing: true,
            ..PlaybackState::default()
        };
        self.transition(TraversalState::Playing);
    }

    /// Returns true if the traversal was playing and is now paused.
    pub fn pause(&mut self) -> bool {
        if self.state != TraversalState::Playing {
            return false;
        }
        self.playback.is_playing = false;
        self.transition(TraversalState::Paused);
        true
    }

    /// Returns true if the traversal was paused and is now playing.
    pub fn resume(&mut self) -> bool {
        if self.state != TraversalState::Paused {
            return false;
        }
        self.playback.is_playing = true;
        self.transition(TraversalState::Playing);
        true
    }

    /// Back to idle with zeroed counters; does not start playback.
    pub fn reset(&mut self) {
        self.playback = PlaybackState::default();
        self.transition(TraversalState::Idle);
    }

    /// Advance by `dt` seconds. Returns `None` unless currently playing.
    pub fn advance(&mut self, dt: f64, table: &ArcLengthTable) -> Option<Step> {
        if self.state != TraversalState::Playing {
            return None;
        }
        let dt = if dt.is_finite() {
            dt
        } else {
            warn!(dt, "non-finite frame delta treated as 0");
            0.0
        };

        let step = match self.mode {
            TraversalMode::Distance => {
                let total = table.total_length();
                let travelled = self.playback.distance_traveled + self.speed * dt;
                let (distance, boundary) = settle(travelled, total, self.looping);
                self.playback.distance_traveled = distance;
                let parameter = if boundary == Boundary::Completed {
                    1.0
                } else {
                    table.parameter_for_distance(distance)
                };
                Step {
                    parameter,
                    boundary,
                }
            }
            TraversalMode::Time => {
                let progressed = self.playback.progress + dt / self.duration;
                let (progress, boundary) = settle(progressed, 1.0, self.looping);
                Step {
                    parameter: progress,
                    boundary,
                }
            }
        };

        self.playback.progress = step.parameter;
        if step.boundary == Boundary::Completed {
            self.playback.is_playing = false;
            self.playback.is_complete = true;
            self.transition(TraversalState::Complete);
        }

        Some(step)
    }

    fn transition(&mut self, next: TraversalState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "traversal state change");
        }
        self.state = next;
    }
}

/// Keep `value` within `[0, bound]`, wrapping when looping and clamping otherwise.
///
/// Reaching `bound` exactly counts as arrival. Only the forward bound
/// completes; running backwards past 0 without looping just stops at 0.
/// A zero bound never divides: looping over nothing stays at 0.
fn settle(value: f64, bound: f64, looping: bool) -> (f64, Boundary) {
    if value >= bound {
        if !looping {
            return (bound, Boundary::Completed);
        }
        if bound <= 0.0 {
            return (0.0, Boundary::Inside);
        }
        let laps = (value / bound).floor() as u32;
        return (value % bound, Boundary::Wrapped { laps });
    }

    if value < 0.0 {
        if looping && bound > 0.0 {
            let laps = (-value / bound).ceil() as u32;
            return (value.rem_euclid(bound), Boundary::Wrapped { laps });
        }
        return (0.0, Boundary::Inside);
    }

    (value, Boundary::Inside)
}
