//! Glide CLI - Inspect and simulate spline path animations headlessly

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{info, markers, simulate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glide")]
#[command(about = "Spline path animation toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show length, control points, and table details for a path file
    Info {
        /// Path to a .path.toml file
        file: String,

        /// Also evaluate the curve at this parameter
        #[arg(long)]
        at: Option<f64>,
    },

    /// Play a path with a fixed timestep and print each tick
    Simulate {
        /// Path to a .path.toml file
        file: String,

        /// Tick rate in Hz
        #[arg(long, default_value = "60")]
        hz: f64,

        /// How many seconds to simulate
        #[arg(long, default_value = "5")]
        seconds: f64,

        /// Override the configured speed (train mode)
        #[arg(long)]
        speed: Option<f64>,

        /// Print every Nth tick
        #[arg(long, default_value = "1")]
        every: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Sample evenly spaced debug markers along a path
    Markers {
        /// Path to a .path.toml file
        file: String,

        /// Number of markers
        #[arg(long, default_value = "10")]
        count: usize,

        /// Marker size
        #[arg(long, default_value = "0.1")]
        size: f32,

        /// Marker color as hex RGB (e.g. ff8800)
        #[arg(long, default_value = "ff0000", value_parser = parse_color)]
        color: u32,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn parse_color(s: &str) -> Result<u32, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected 6 hex digits, got '{}'", s));
    }
    u32::from_str_radix(hex, 16).map_err(|e| format!("invalid color '{}': {}", s, e))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { file, at } => info::run(&file, at),
        Commands::Simulate {
            file,
            hz,
            seconds,
            speed,
            every,
            format,
        } => simulate::run(simulate::SimulateArgs {
            file,
            hz,
            seconds,
            speed,
            every,
            format,
        }),
        Commands::Markers {
            file,
            count,
            size,
            color,
            format,
        } => markers::run(markers::MarkersArgs {
            file,
            count,
            size,
            color,
            format,
        }),
    }
}
