//! TOML-based path definition loading

use crate::animator::PathAnimator;
use crate::config::AnimatorConfig;
use glide_core::{CatmullRomPath, GlideError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A named path with its animator options, as stored in a `.path.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDefinition {
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Ordered control points, `[x, y, z]`
    pub points: Vec<[f32; 3]>,
    /// Animator options; any omitted key takes its default
    #[serde(default)]
    pub animator: AnimatorConfig,
}

impl PathDefinition {
    pub fn control_points(&self) -> Vec<Vec3> {
        self.points.iter().copied().map(Vec3::from_array).collect()
    }

    /// Build the spline for this definition.
    pub fn to_path(&self) -> Result<CatmullRomPath> {
        CatmullRomPath::new(self.control_points())
    }

    /// Build a ready-to-play animator (idle until `play()`).
    pub fn to_animator(&self) -> Result<PathAnimator> {
        PathAnimator::new(self.control_points(), self.animator.clone())
    }
}

/// Load a path definition from a `.path.toml` file.
///
/// ```toml
/// name = "ball_run"
/// points = [[0.0, 0.0, 0.0], [2.0, 0.0, 1.0], [4.0, 0.0, 0.0]]
///
/// [animator]
/// speed = 1.5
/// mode = "train"
/// loop = true
/// ```
pub fn load_path_from_file(path: &Path) -> Result<PathDefinition> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GlideError::PathLoad(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let mut def = load_path_from_str(&content).map_err(|e| {
        GlideError::PathLoad(format!("{}: {}", path.display(), e))
    })?;

    if def.name.is_empty() {
        def.name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.trim_end_matches(".toml").trim_end_matches(".path").to_string())
            .unwrap_or_default();
    }
    debug!(name = %def.name, points = def.points.len(), "loaded path definition");
    Ok(def)
}

/// Parse and validate a path definition from a TOML string.
pub fn load_path_from_str(content: &str) -> Result<PathDefinition> {
    let def: PathDefinition = toml::from_str(content)?;

    if def.points.len() < 2 {
        return Err(GlideError::TooFewControlPoints {
            got: def.points.len(),
        });
    }
    if let Some(i) = def
        .points
        .iter()
        .position(|p| p.iter().any(|c| !c.is_finite()))
    {
        return Err(GlideError::InvalidConfig(format!(
            "control point {} is not finite",
            i
        )));
    }
    def.animator.validate()?;

    Ok(def)
}

/// Serialize a path definition back to TOML.
pub fn save_path_to_string(def: &PathDefinition) -> Result<String> {
    Ok(toml::to_string(def)?)
}
