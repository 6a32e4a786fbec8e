//! Debug visualization: evenly spaced markers along a path

use glide_core::{CatmullRomPath, Color, Vec3};
use serde::Serialize;

/// A visual marker placed on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugMarker {
    pub position: Vec3,
    /// Spline parameter the marker was sampled at
    pub parameter: f64,
    pub size: f32,
    pub color: Color,
}

/// Receives markers, e.g. a renderer's debug-draw list.
pub trait MarkerSink {
    fn add_marker(&mut self, marker: DebugMarker);
}

impl MarkerSink for Vec<DebugMarker> {
    fn add_marker(&mut self, marker: DebugMarker) {
        self.push(marker);
    }
}

/// Place `count` markers at uniformly spaced parameters, first and last on the
/// path endpoints. A single marker sits at the start.
pub fn sample_markers(path: &CatmullRomPath, count: usize, size: f32, color: Color) -> Vec<DebugMarker> {
    (0..count)
        .map(|i| {
            let parameter = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                0.0
            };
            DebugMarker {
                position: path.point_at(parameter),
                parameter,
                size,
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> CatmullRomPath {
        CatmullRomPath::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn markers_span_the_path() {
        let markers = sample_markers(&path(), 5, 0.1, Color::RED);
        assert_eq!(markers.len(), 5);
        assert_eq!(markers[0].position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(markers[4].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(markers[2].parameter, 0.5);
        assert!(markers.iter().all(|m| m.size == 0.1 && m.color == Color::RED));
    }

    #[test]
    fn zero_and_one_marker() {
        assert!(sample_markers(&path(), 0, 0.1, Color::WHITE).is_empty());
        let one = sample_markers(&path(), 1, 0.1, Color::WHITE);
        assert_eq!(one[0].parameter, 0.0);
    }

    #[test]
    fn vec_is_a_sink() {
        let mut sink: Vec<DebugMarker> = Vec::new();
        for m in sample_markers(&path(), 3, 0.2, Color::WHITE) {
            sink.add_marker(m);
        }
        assert_eq!(sink.len(), 3);
    }
}
