/*!
 * memsim - Driver Entry Point
 *
 * Loads a scenario (or the built-in default), runs it under every
 * configured placement policy, and prints the resulting traces.
 */

use anyhow::Context;
use clap::{Parser, ValueEnum};
use memsim::core::limits::{ENV_OUTPUT, ENV_SCENARIO};
use memsim::{init_tracing, render_json, render_text, SimulationConfig, Simulator};
use std::path::PathBuf;
use tracing::info;

/// Deterministic first/best/worst-fit memory placement simulator
#[derive(Debug, Parser)]
#[command(name = "memsim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scenario JSON file (built-in demonstration when omitted)
    #[arg(env = ENV_SCENARIO)]
    scenario: Option<PathBuf>,

    /// Report format
    #[arg(
        long,
        value_enum,
        env = ENV_OUTPUT,
        ignore_case = true,
        default_value_t = Format::Text
    )]
    format: Format,

    /// Shorthand for `--format json`
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            self.format
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.scenario {
        Some(path) => {
            info!(path = %path.display(), "Loading scenario");
            SimulationConfig::from_path(path)
                .with_context(|| format!("invalid scenario {}", path.display()))?
        }
        None => {
            info!("Using built-in scenario");
            SimulationConfig::default()
        }
    };

    info!(
        blocks = config.blocks.len(),
        processes = config.processes.len(),
        policies = config.policies.len(),
        mode = config.mode.as_str(),
        "Starting simulation"
    );

    let simulator = Simulator::new(config).context("scenario rejected")?;
    let traces = simulator.run().context("simulation aborted")?;

    match cli.format() {
        Format::Json => {
            println!("{}", render_json(&traces).context("failed to serialize traces")?)
        }
        Format::Text => print!("{}", render_text(&traces)),
    }

    info!(runs = traces.len(), "Simulation complete");
    Ok(())
}
