//! Debug marker sampling command

use anyhow::{Context, Result};
use glide_animation::debug::DebugMarker;
use glide_animation::load_path_from_file;
use glide_core::Color;
use std::path::Path;

pub struct MarkersArgs {
    pub file: String,
    pub count: usize,
    pub size: f32,
    pub color: u32,
    pub format: String,
}

pub fn run(args: MarkersArgs) -> Result<()> {
    let def = load_path_from_file(Path::new(&args.file))
        .with_context(|| format!("loading {}", args.file))?;
    let animator = def.to_animator()?;

    let mut markers: Vec<DebugMarker> = Vec::with_capacity(args.count);
    animator.visualize(&mut markers, args.count, args.size, Color::from_hex(args.color));

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&markers)?);
        return Ok(());
    }

    println!("{} marker(s) on '{}':", markers.len(), def.name);
    for m in &markers {
        println!(
            "  t={:.4}  ({:.4}, {:.4}, {:.4})",
            m.parameter, m.position.x, m.position.y, m.position.z
        );
    }
    Ok(())
}
