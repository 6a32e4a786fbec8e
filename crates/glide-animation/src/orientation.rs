//! Look-ahead sampling for facing the direction of travel

use glide_core::{CatmullRomPath, Vec3};

/// Where a moving entity should face for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    /// Point slightly further along the path
    pub target: Vec3,
    /// Parameter `target` was sampled at, never above 1
    pub target_parameter: f64,
    /// Unit direction from the current position to `target`, or zero when they
    /// coincide (at the very end of a path, or on degenerate geometry)
    pub direction: Vec3,
}

/// Sample the look-ahead point `look_ahead` parameter units past `parameter`.
pub fn look_ahead(path: &CatmullRomPath, position: Vec3, parameter: f64, look_ahead: f64) -> Facing {
    let target_parameter = (parameter + look_ahead).min(1.0);
    let target = path.point_at(target_parameter);
    Facing {
        target,
        target_parameter,
        direction: (target - position).normalized(),
    }
}
