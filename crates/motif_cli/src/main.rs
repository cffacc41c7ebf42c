//! Motif CLI
//!
//! Simulate the animation showcase headlessly and export what it presents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use motif_app::{Frame, WidgetKind};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use config::MotifConfig;
use simulate::{Simulation, TapSpec};

#[derive(Parser)]
#[command(name = "motif")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Motif animation showcase", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing motif.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the showcase for a while
    Run {
        /// Seconds of virtual time (default from motif.toml)
        #[arg(short, long)]
        duration: Option<f32>,

        /// Frames per second (default from motif.toml)
        #[arg(long)]
        fps: Option<u32>,

        /// Tap a widget at a point in time, e.g. `morphing@1.5`
        #[arg(long = "tap", value_name = "WIDGET@SECS")]
        taps: Vec<TapSpec>,

        /// Pace frames against the wall clock
        #[arg(long)]
        realtime: bool,

        /// Write sampled frames as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample every N frames (default: once per second)
        #[arg(long, value_name = "N")]
        every: Option<u64>,
    },

    /// Export the frame presented at a point in time
    Snapshot {
        /// Seconds of virtual time
        #[arg(short, long, default_value = "1.0")]
        at: f32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Output path (default: <output_dir>/snapshot.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tap a widget at a point in time, e.g. `morphing@0.5`
        #[arg(long = "tap", value_name = "WIDGET@SECS")]
        taps: Vec<TapSpec>,
    },

    /// List the widgets in display order
    Widgets,

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Svg,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Svg => "svg",
        }
    }
}

/// JSON written by `motif run --output`
#[derive(Serialize)]
struct RunReport {
    duration_secs: f32,
    fps: u32,
    taps: Vec<String>,
    frames: Vec<Frame>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MotifConfig::load_from_dir(&cli.config_dir)?;

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log.filter.as_deref().unwrap_or("info")))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            duration,
            fps,
            taps,
            realtime,
            output,
            every,
        } => cmd_run(
            &config,
            duration,
            fps,
            taps,
            realtime,
            output.as_deref(),
            every,
        ),

        Commands::Snapshot {
            at,
            format,
            output,
            taps,
        } => cmd_snapshot(&config, at, format, output, taps),

        Commands::Widgets => cmd_widgets(),

        Commands::Config => cmd_config(&config, &cli.config_dir),
    }
}

fn cmd_run(
    config: &MotifConfig,
    duration: Option<f32>,
    fps: Option<u32>,
    taps: Vec<TapSpec>,
    realtime: bool,
    output: Option<&Path>,
    every: Option<u64>,
) -> Result<()> {
    let duration = duration.unwrap_or(config.run.duration);
    let fps = fps.unwrap_or(config.run.fps);
    let every = every.unwrap_or(u64::from(fps)).max(1);
    let tap_labels = taps.iter().map(ToString::to_string).collect();

    info!(
        "Running showcase for {}s at {} fps{}",
        duration,
        fps,
        if realtime { " (realtime)" } else { "" }
    );

    let mut sim = Simulation::new(config.showcase(), fps, taps)?.realtime(realtime);
    let last = sim.frames_for(duration);
    let mut frames = Vec::new();

    sim.run_for(duration, |app, n| {
        if output.is_some() && (n % every == 0 || n == last) {
            frames.push(app.frame()?);
        }
        Ok(())
    })?;

    let app = sim.app();
    for kind in app.mounted() {
        let summary = app.summary(kind)?;
        info!("{}: {}", kind, serde_json::to_string(&summary)?);
    }
    info!(
        "Finished at {:.3}s, {} timers active, animating: {}",
        app.now().as_secs_f64(),
        app.timer_count(),
        app.is_animating()
    );

    if let Some(path) = output {
        let report = RunReport {
            duration_secs: duration,
            fps,
            taps: tap_labels,
            frames,
        };
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        write_output(path, &json)?;
        info!("Wrote {} frames to {}", report.frames.len(), path.display());
    }

    Ok(())
}

fn cmd_snapshot(
    config: &MotifConfig,
    at: f32,
    format: Format,
    output: Option<PathBuf>,
    taps: Vec<TapSpec>,
) -> Result<()> {
    if !at.is_finite() || at < 0.0 {
        anyhow::bail!("Snapshot time must be a non-negative number, got {}", at);
    }

    let mut sim = Simulation::new(config.showcase(), config.run.fps, taps)?;
    sim.run_for(at, |_, _| Ok(()))?;

    let frame = sim.app().frame().context("Failed to lay out frame")?;
    let content = match format {
        Format::Json => frame.to_json(),
        Format::Svg => frame.to_svg(),
    }
    .with_context(|| format!("Failed to export {} snapshot", format.extension()))?;

    let path = output.unwrap_or_else(|| {
        config
            .run
            .output_dir
            .join(format!("snapshot.{}", format.extension()))
    });
    write_output(&path, &content)?;

    info!(
        "Snapshot at {:.3}s ({}x{}) written to {}",
        frame.time_secs,
        frame.size.width,
        frame.size.height,
        path.display()
    );
    Ok(())
}

fn cmd_widgets() -> Result<()> {
    println!("Motif showcase widgets");
    println!("======================");
    println!();
    for kind in WidgetKind::ALL {
        println!("  {}. {:<16} {}", kind.index() + 1, kind.name(), kind.description());
    }
    println!();
    println!("Tap with `motif run --tap <widget>@<secs>`; short names like `spin` work too.");

    Ok(())
}

fn cmd_config(config: &MotifConfig, dir: &Path) -> Result<()> {
    let path = dir.join(config::CONFIG_FILE);
    if path.exists() {
        println!("# Loaded from {}", path.display());
    } else {
        println!("# {} not found, showing defaults", path.display());
    }
    print!("{}", config.to_toml()?);

    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
