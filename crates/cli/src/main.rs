#![deny(unsafe_code)]
//! CLI binary for the noise-grid procedural noise system.
//!
//! Subcommands:
//! - `render <variant>`: evaluate a variant for N frames and report timing
//! - `list`: print available variants

mod error;

use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use error::CliError;
use log::info;
use noise_grid::{FrameSettings, GridEvaluator, Pattern};
use noise_grid_core::grid::{GridConfig, DEFAULT_RESOLUTION};

#[derive(Parser)]
#[command(name = "noise-grid", about = "Procedural noise grid evaluator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a noise variant for a number of frames.
    Render {
        /// Variant name (e.g. "simplex2d", "flow").
        variant: String,

        /// Grid resolution in pixels; must be a power of two.
        #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: usize,

        /// Pixels per unit of parallel work.
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Dedicated worker threads (default: rayon's global pool).
        #[arg(long)]
        workers: Option<usize>,

        /// Number of frames to evaluate.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// Frames per second used to derive each frame's time.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Time of the first frame in seconds.
        #[arg(long, default_value_t = 0.0)]
        start: f32,

        /// Frame settings as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available variants.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let variants: Vec<&str> = Pattern::names().collect();
            if cli.json {
                let info = serde_json::json!({ "variants": variants });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Variants:");
                for name in variants {
                    println!("  {name}");
                }
                println!("Flow flags (via --params): periodic, derivative, rotation");
            }
        }
        Command::Render {
            variant,
            resolution,
            chunk_size,
            workers,
            frames,
            fps,
            start,
            params,
        } => {
            let mut settings: FrameSettings = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            settings.variant = variant.parse()?;

            if frames == 0 {
                return Err(CliError::Input("--frames must be at least 1".into()));
            }
            if !(fps.is_finite() && fps > 0.0) || !start.is_finite() {
                return Err(CliError::Input(format!(
                    "invalid frame timing: fps {fps}, start {start}"
                )));
            }

            let mut config = GridConfig::new(resolution)?;
            if let Some(chunk_size) = chunk_size {
                config = config.with_chunk_size(chunk_size)?;
            }
            let mut evaluator = match workers {
                Some(workers) => GridEvaluator::with_workers(config, workers)?,
                None => GridEvaluator::new(config),
            };

            info!(
                "rendering {frames} frames of {} on {} workers",
                settings.variant(),
                evaluator.workers()
            );

            let started = Instant::now();
            for frame in 0..frames {
                let time = start + frame as f32 / fps;
                let request = settings.request_at(time, &config)?;
                evaluator.evaluate(&request)?;
            }
            let elapsed = started.elapsed();
            let per_frame_ms = elapsed.as_secs_f64() * 1000.0 / frames as f64;
            let mean = evaluator.pixels().mean_channels();

            if cli.json {
                let info = serde_json::json!({
                    "variant": settings.variant().to_string(),
                    "resolution": resolution,
                    "chunk_size": config.chunk_size(),
                    "workers": evaluator.workers(),
                    "frames": frames,
                    "elapsed_ms": elapsed.as_secs_f64() * 1000.0,
                    "ms_per_frame": per_frame_ms,
                    "mean_rgba": mean,
                    "settings": settings,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "rendered {} ({resolution}x{resolution}, {frames} frames, {} workers) in {:.1} ms ({per_frame_ms:.2} ms/frame)",
                    settings.variant(),
                    evaluator.workers(),
                    elapsed.as_secs_f64() * 1000.0
                );
                println!(
                    "mean rgba of last frame: {:.1} {:.1} {:.1} {:.1}",
                    mean[0], mean[1], mean[2], mean[3]
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
