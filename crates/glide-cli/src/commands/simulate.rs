//! Fixed-step playback simulation

use anyhow::{bail, Context, Result};
use glide_animation::{load_path_from_file, PathEvent, PathSystem};
use glide_core::PathId;
use glide_runtime::{GameClock, RuntimeSystem, MAX_FRAME_TIME};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

pub struct SimulateArgs {
    pub file: String,
    pub hz: f64,
    pub seconds: f64,
    pub speed: Option<f64>,
    pub every: usize,
    pub format: String,
}

#[derive(Serialize)]
struct TickRecord {
    tick: usize,
    time: f64,
    parameter: f64,
    distance: f64,
    position: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<String>,
}

/// Result of driving a path system for a fixed number of ticks.
struct Simulation {
    records: Vec<TickRecord>,
    total_ticks: usize,
    simulated_time: f64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    check_rate(args.hz)?;
    if !(args.seconds >= 0.0 && args.seconds.is_finite()) {
        bail!("--seconds must be a non-negative number, got {}", args.seconds);
    }

    let def = load_path_from_file(Path::new(&args.file))
        .with_context(|| format!("loading {}", args.file))?;

    let mut system = PathSystem::new();
    let id = system.add(&def)?;
    if let (Some(speed), Some(animator)) = (args.speed, system.get_mut(id)) {
        animator.set_speed(speed);
    }

    let sim = simulate(&mut system, id, args.hz, args.seconds, args.every)?;
    debug!(
        records = sim.records.len(),
        time = sim.simulated_time,
        "simulation finished"
    );

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&sim.records)?);
        return Ok(());
    }

    println!(
        "Simulating '{}' at {} Hz ({} ticks max)",
        def.name, args.hz, sim.total_ticks
    );
    for r in &sim.records {
        let [x, y, z] = r.position;
        print!(
            "  #{:<5} t={:>7.3}s  p={:.4}  d={:>8.4}  pos=({:.3}, {:.3}, {:.3})",
            r.tick, r.time, r.parameter, r.distance, x, y, z
        );
        if let Some([dx, dy, dz]) = r.direction {
            print!("  dir=({:.2}, {:.2}, {:.2})", dx, dy, dz);
        }
        if !r.events.is_empty() {
            print!("  [{}]", r.events.join(", "));
        }
        println!();
    }
    Ok(())
}

/// Each simulated tick feeds exactly one fixed step through the clock, so the
/// step must fit within the clock's frame clamp.
fn check_rate(hz: f64) -> Result<()> {
    let min_hz = 1.0 / MAX_FRAME_TIME;
    if !(hz >= min_hz && hz.is_finite()) {
        bail!("--hz must be a finite rate of at least {}, got {}", min_hz, hz);
    }
    Ok(())
}

fn simulate(
    system: &mut PathSystem,
    id: PathId,
    hz: f64,
    seconds: f64,
    every: usize,
) -> Result<Simulation> {
    check_rate(hz)?;
    let every = every.max(1);

    system.initialize()?;
    system.play(id)?;
    system.drain_events();

    let mut clock = GameClock::with_fixed_timestep(hz);
    let total_ticks = (seconds * hz).round() as usize;
    let mut records = Vec::new();

    for tick in 1..=total_ticks {
        clock.advance(clock.fixed_timestep);
        while clock.should_fixed_update() {
            system.update(clock.fixed_timestep)?;
            clock.consume_fixed_step();
        }

        let events: Vec<String> = system
            .drain_events()
            .into_iter()
            .map(|e| describe(&e.event))
            .collect();

        let Some(animator) = system.get(id) else {
            break;
        };
        let Some(frame) = animator.frame() else {
            continue;
        };

        let finished = animator.is_complete();
        if tick % every == 0 || !events.is_empty() || finished {
            records.push(TickRecord {
                tick,
                time: clock.total_time,
                parameter: frame.parameter,
                distance: animator.distance_traveled(),
                position: frame.position.to_array(),
                direction: frame.facing.map(|f| f.direction.to_array()),
                events,
            });
        }
        if finished {
            break;
        }
    }

    system.shutdown()?;
    Ok(Simulation {
        records,
        total_ticks,
        simulated_time: clock.total_time,
    })
}

fn describe(event: &PathEvent) -> String {
    match event {
        PathEvent::Started => "started".to_string(),
        PathEvent::Paused => "paused".to_string(),
        PathEvent::Resumed => "resumed".to_string(),
        PathEvent::Reset => "reset".to_string(),
        PathEvent::Looped { laps } => format!("looped x{}", laps),
        PathEvent::Completed => "completed".to_string(),
    }
}
