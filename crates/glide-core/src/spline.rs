//! Pure spline math: clamped Catmull-Rom path evaluation.
//!
//! A path through `N` control points is made of `N - 1` cubic segments. Each
//! segment blends its two endpoints plus one neighbour on either side; at the
//! ends of the path the missing neighbour is the endpoint itself, so the curve
//! starts and ends exactly on the first and last control points and never
//! wraps around, even when a consumer loops the traversal.

use crate::{GlideError, Result, Vec3};
use tracing::warn;

/// Catmull-Rom spline interpolation between four points.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        catmull_rom_scalar(p0.x, p1.x, p2.x, p3.x, t),
        catmull_rom_scalar(p0.y, p1.y, p2.y, p3.y, t),
        catmull_rom_scalar(p0.z, p1.z, p2.z, p3.z, t),
    )
}

/// Catmull-Rom interpolation for a single scalar value.
pub fn catmull_rom_scalar(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// An open Catmull-Rom path over an immutable control-point sequence.
#[derive(Debug, Clone)]
pub struct CatmullRomPath {
    points: Vec<Vec3>,
}

impl CatmullRomPath {
    /// Build a path. Fails when fewer than two control points are given.
    ///
    /// Two or three points are accepted, but the clamped boundary leaves
    /// little room for curvature, so the result is close to a polyline.
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GlideError::TooFewControlPoints { got: points.len() });
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(GlideError::InvalidConfig(format!(
                "control point {} is not finite: {:?}",
                i, points[i]
            )));
        }
        if points.len() < 4 {
            warn!(
                count = points.len(),
                "path has fewer than 4 control points; corners will be soft"
            );
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of cubic segments (`points - 1`).
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    pub fn first(&self) -> Vec3 {
        self.points[0]
    }

    pub fn last(&self) -> Vec3 {
        self.points[self.points.len() - 1]
    }

    /// Evaluate the path at parameter `t`, clamped into `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Vec3 {
        // NaN falls through both comparisons; treat it as the start.
        if !(t > 0.0) {
            return self.first();
        }
        if t >= 1.0 {
            return self.last();
        }

        let n = self.segment_count();
        let scaled = t * n as f64;
        let segment = (scaled.floor() as usize).min(n - 1);
        let local_t = (scaled - segment as f64) as f32;

        let at = |i: isize| self.points[i.clamp(0, n as isize) as usize];
        let s = segment as isize;

        catmull_rom(at(s - 1), at(s), at(s + 1), at(s + 2), local_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collinear() -> CatmullRomPath {
        CatmullRomPath::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    fn zigzag() -> CatmullRomPath {
        CatmullRomPath::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, -1.0),
            Vec3::new(4.0, -1.0, 0.5),
            Vec3::new(5.0, 3.0, 2.0),
            Vec3::new(7.5, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn endpoints_are_exact() {
        for path in [collinear(), zigzag()] {
            assert_eq!(path.point_at(0.0), path.first());
            assert_eq!(path.point_at(1.0), path.last());
        }
    }

    #[test]
    fn out_of_range_parameters_clamp() {
        let path = zigzag();
        assert_eq!(path.point_at(-3.0), path.first());
        assert_eq!(path.point_at(1.5), path.last());
        assert_eq!(path.point_at(f64::NAN), path.first());
    }

    #[test]
    fn passes_through_interior_control_points() {
        let path = zigzag();
        let n = path.segment_count();
        for (i, p) in path.points().iter().enumerate() {
            let q = path.point_at(i as f64 / n as f64);
            assert!((q - *p).length() < 1e-5, "point {}: {:?} vs {:?}", i, q, p);
        }
    }

    #[test]
    fn collinear_midpoint_is_centered() {
        let path = collinear();
        let mid = path.point_at(0.5);
        assert!((mid.x - 1.5).abs() < 1e-6);
        assert_eq!(mid.y, 0.0);
        assert_eq!(mid.z, 0.0);
    }

    #[test]
    fn curve_is_continuous_across_segment_joins() {
        let path = zigzag();
        let n = path.segment_count() as f64;
        for join in 1..path.segment_count() {
            let t = join as f64 / n;
            let before = path.point_at(t - 1e-7);
            let after = path.point_at(t + 1e-7);
            assert!((after - before).length() < 1e-3);
        }
    }

    #[test]
    fn two_points_is_a_valid_path() {
        let path =
            CatmullRomPath::new(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 4.0)]).unwrap();
        assert_eq!(path.segment_count(), 1);
        let mid = path.point_at(0.5);
        assert!((mid.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn duplicate_points_are_accepted() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let path = CatmullRomPath::new(vec![p, p, p]).unwrap();
        assert_eq!(path.point_at(0.3), p);
    }

    #[test]
    fn too_few_points_is_rejected() {
        let err = CatmullRomPath::new(vec![Vec3::ZERO]).unwrap_err();
        assert!(matches!(err, GlideError::TooFewControlPoints { got: 1 }));
        assert!(CatmullRomPath::new(vec![]).is_err());
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let err = CatmullRomPath::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]);
        assert!(matches!(err, Err(GlideError::InvalidConfig(_))));
    }
}
