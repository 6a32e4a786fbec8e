//! Animator configuration

use glide_core::{GlideError, Result};
use serde::{Deserialize, Serialize};

/// How a traversal advances each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TraversalMode {
    /// Constant physical speed along the curve ("train" mode).
    #[default]
    Distance,
    /// Linear in the raw spline parameter over a fixed duration.
    Time,
}

impl From<&str> for TraversalMode {
    /// `"train"` selects distance mode; any other value selects time mode.
    fn from(s: &str) -> Self {
        if s == "train" {
            TraversalMode::Distance
        } else {
            TraversalMode::Time
        }
    }
}

impl From<String> for TraversalMode {
    fn from(s: String) -> Self {
        TraversalMode::from(s.as_str())
    }
}

impl From<TraversalMode> for String {
    fn from(mode: TraversalMode) -> Self {
        match mode {
            TraversalMode::Distance => "train".to_string(),
            TraversalMode::Time => "time".to_string(),
        }
    }
}

/// Every option an animator accepts, with its default.
///
/// Fixed for the lifetime of the animator; the only live override is
/// `PathAnimator::set_speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Distance-mode traversal rate in units per second (default 1.0)
    pub speed: f64,
    /// Traversal mode (default "train")
    pub mode: TraversalMode,
    /// Time-mode traversal length in seconds (default 3.0)
    pub duration: f64,
    /// Wrap around at the end instead of completing (default false)
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Compute a facing direction each tick (default true)
    pub orient_to_direction: bool,
    /// Parameter offset of the orientation look-ahead point (default 0.01)
    pub look_ahead_distance: f64,
    /// Arc-length table resolution (default 200)
    pub arc_length_segments: usize,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            mode: TraversalMode::Distance,
            duration: 3.0,
            looping: false,
            orient_to_direction: true,
            look_ahead_distance: 0.01,
            arc_length_segments: 200,
        }
    }
}

impl AnimatorConfig {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_orientation(mut self, orient: bool) -> Self {
        self.orient_to_direction = orient;
        self
    }

    pub fn with_look_ahead(mut self, look_ahead: f64) -> Self {
        self.look_ahead_distance = look_ahead;
        self
    }

    pub fn with_arc_length_segments(mut self, segments: usize) -> Self {
        self.arc_length_segments = segments;
        self
    }

    /// Reject values the traversal arithmetic can't work with.
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() {
            return Err(GlideError::InvalidConfig(format!(
                "speed must be finite, got {}",
                self.speed
            )));
        }
        if self.mode == TraversalMode::Time && !(self.duration > 0.0 && self.duration.is_finite())
        {
            return Err(GlideError::InvalidConfig(format!(
                "time mode needs a positive duration, got {}",
                self.duration
            )));
        }
        if !(self.look_ahead_distance >= 0.0 && self.look_ahead_distance.is_finite()) {
            return Err(GlideError::InvalidConfig(format!(
                "look_ahead_distance must be a non-negative number, got {}",
                self.look_ahead_distance
            )));
        }
        if self.arc_length_segments == 0 {
            return Err(GlideError::InvalidConfig(
                "arc_length_segments must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
