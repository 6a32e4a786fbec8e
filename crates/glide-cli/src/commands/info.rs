//! Path inspection command

use anyhow::{Context, Result};
use glide_animation::{load_path_from_file, TraversalMode};
use std::path::Path;

pub fn run(file: &str, at: Option<f64>) -> Result<()> {
    let def = load_path_from_file(Path::new(file))
        .with_context(|| format!("loading {}", file))?;
    let animator = def.to_animator()?;
    let config = animator.config();
    let table = animator.table();

    println!("Path: {}", def.name);
    println!("  Control points: {}", def.points.len());
    for (i, p) in def.points.iter().enumerate() {
        println!("    [{}] ({:.3}, {:.3}, {:.3})", i, p[0], p[1], p[2]);
    }
    println!("  Length: {:.4}", table.total_length());
    println!(
        "  Arc-length table: {} segments ({})",
        table.segments(),
        table.source()
    );

    match config.mode {
        TraversalMode::Distance => {
            let time = if config.speed > 0.0 {
                format!("{:.3}s", table.total_length() / config.speed)
            } else {
                "never".to_string()
            };
            println!("  Mode: train at {} units/s (end reached after {})", config.speed, time);
        }
        TraversalMode::Time => {
            println!("  Mode: time over {}s", config.duration);
        }
    }
    println!(
        "  Loop: {}, orient: {} (look-ahead {})",
        config.looping, config.orient_to_direction, config.look_ahead_distance
    );

    if let Some(t) = at {
        let p = animator.point_at(t);
        println!(
            "  point_at({}) = ({:.4}, {:.4}, {:.4}), {:.4} units along",
            t,
            p.x,
            p.y,
            p.z,
            table.distance_for_parameter(t)
        );
    }

    Ok(())
}
