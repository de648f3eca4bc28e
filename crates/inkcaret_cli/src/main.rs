//! Inkcaret CLI
//!
//! Replay scripted editing sessions through the caret simulator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inkcaret::CaretConfig;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod pacer;
mod replay;
mod scenario;

use replay::{Replay, TickRecord};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "inkcaret")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inkcaret caret simulator CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print one draw command per tick
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Caret configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pace ticks against the wall clock instead of a virtual clock
        #[arg(long)]
        realtime: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the default caret configuration
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries the tick stream
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            realtime,
            format,
        } => cmd_simulate(&scenario, config.as_deref(), realtime, format),

        Commands::Config => cmd_config(),
    }
}

fn cmd_simulate(
    scenario_path: &Path,
    config_path: Option<&Path>,
    realtime: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => CaretConfig::default(),
    };
    let scenario = Scenario::load(scenario_path)?;

    info!(
        "Simulating {} ({} ms, {} events, {} clock, {:?} jumps)",
        scenario_path.display(),
        scenario.duration_ms,
        scenario.events.len(),
        if realtime { "real-time" } else { "virtual" },
        config.jump.strategy,
    );

    let mut replay = Replay::new(scenario, config)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let emit = |record: &TickRecord| write_record(&mut out, record, format);

    let summary = if realtime {
        replay.run_realtime(emit)?
    } else {
        replay.run_virtual(emit)?
    };
    out.flush()?;

    info!(
        "Done: {} ticks, {} hidden, {} coalesced, caret at ({:.2}, {:.2})",
        summary.ticks,
        summary.hidden_ticks,
        summary.coalesced,
        summary.final_position.x,
        summary.final_position.y
    );
    Ok(())
}

fn cmd_config() -> Result<()> {
    let toml = CaretConfig::default().to_toml_string()?;
    print!("{}", toml);
    Ok(())
}

fn load_config(path: &Path) -> Result<CaretConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    CaretConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to load caret config {}", path.display()))
}

fn write_record<W: Write>(out: &mut W, record: &TickRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            out,
            "{:>5} {:>8.1}ms {:<12} x={:>8.2} y={:>8.2} w={:>6.2} h={:>6.2} {} #{:02x}{:02x}{:02x}{:02x}",
            record.tick,
            record.time_ms,
            record.regime,
            record.x,
            record.y,
            record.width,
            record.height,
            if record.visible { "shown " } else { "hidden" },
            record.color[0],
            record.color[1],
            record.color[2],
            record.color[3],
        )?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
