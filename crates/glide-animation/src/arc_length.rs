//! Arc-length parametrization: sampled distance table with inverse lookup
//!
//! The raw spline parameter is not proportional to distance along the curve.
//! `ArcLengthTable` samples the path on a uniform parameter grid, accumulates
//! chord lengths, and answers "which parameter is `d` units along the path?"
//! by binary search plus linear interpolation between neighbouring samples.

use glide_core::{CatmullRomPath, ContentHash, GlideError, Result};
use tracing::{debug, warn};

/// One row of the table: a grid parameter and the distance travelled to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLengthSample {
    pub parameter: f64,
    pub distance: f64,
}

/// Piecewise-linear approximation of the arc-length function of a path.
///
/// Immutable once built, so one table can back any number of traversals over
/// the same geometry. The table remembers which geometry that is.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    samples: Vec<ArcLengthSample>,
    source: ContentHash,
}

impl ArcLengthTable {
    /// Sample `path` at `segments + 1` uniformly spaced parameters.
    ///
    /// More segments shrink the approximation error at the cost of memory and
    /// a longer one-time build.
    pub fn build(path: &CatmullRomPath, segments: usize) -> Result<Self> {
        if segments == 0 {
            return Err(GlideError::InvalidConfig(
                "arc_length_segments must be at least 1".into(),
            ));
        }

        let mut samples = Vec::with_capacity(segments + 1);
        let mut prev = path.point_at(0.0);
        let mut total = 0.0_f64;
        samples.push(ArcLengthSample {
            parameter: 0.0,
            distance: 0.0,
        });

        for i in 1..=segments {
            let parameter = i as f64 / segments as f64;
            let pos = path.point_at(parameter);
            total += prev.distance(&pos);
            prev = pos;
            samples.push(ArcLengthSample {
                parameter,
                distance: total,
            });
        }

        if total <= 0.0 {
            warn!("path has zero length; every distance maps to parameter 0");
        }
        debug!(segments, total_length = total, "built arc-length table");

        Ok(Self {
            samples,
            source: ContentHash::from_control_points(path.points(), segments),
        })
    }

    /// Hash of the control points and resolution this table was built from.
    pub fn source(&self) -> ContentHash {
        self.source
    }

    /// Whether this table was built from `path` at `segments` resolution.
    pub fn matches(&self, path: &CatmullRomPath, segments: usize) -> bool {
        self.source == ContentHash::from_control_points(path.points(), segments)
    }

    /// Approximate length of the whole path.
    pub fn total_length(&self) -> f64 {
        self.samples[self.samples.len() - 1].distance
    }

    /// Number of sampled intervals (one less than the number of samples).
    pub fn segments(&self) -> usize {
        self.samples.len() - 1
    }

    pub fn samples(&self) -> &[ArcLengthSample] {
        &self.samples
    }

    /// Map a distance along the path to a spline parameter in `[0, 1]`.
    ///
    /// Distances at or below 0 give 0, at or beyond the total length give 1.
    /// On a zero-length path every distance gives 0.
    pub fn parameter_for_distance(&self, distance: f64) -> f64 {
        let total = self.total_length();
        if total <= 0.0 || !(distance > 0.0) {
            return 0.0;
        }
        if distance >= total {
            return 1.0;
        }

        // First sample at or beyond `distance`; index 0 sits at distance 0 so
        // `high` is always at least 1.
        let high = self
            .samples
            .partition_point(|s| s.distance < distance)
            .max(1);
        let low = high - 1;

        let a = self.samples[low];
        let b = self.samples[high];
        let span = b.distance - a.distance;
        if span <= 0.0 {
            return a.parameter;
        }

        let frac = (distance - a.distance) / span;
        a.parameter + (b.parameter - a.parameter) * frac
    }

    /// Map a spline parameter (clamped into `[0, 1]`) to its tabulated distance.
    pub fn distance_for_parameter(&self, parameter: f64) -> f64 {
        if !(parameter > 0.0) {
            return 0.0;
        }
        if parameter >= 1.0 {
            return self.total_length();
        }

        let segments = self.segments();
        let scaled = parameter * segments as f64;
        let low = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - low as f64;

        let a = self.samples[low].distance;
        let b = self.samples[low + 1].distance;
        a + (b - a) * frac
    }
}
