//! openingscope: turns directories of chess game CSVs into opening-phase
//! feature tables, one per rating band.
//!
//! Usage:
//!   openingscope <INPUT_DIR> [--output-dir DIR] [--threads N] [--format csv|jsonl]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use openingscope::batch::{log_summary, run_batch};
use openingscope::config::{load_config, BatchConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "openingscope",
    about = "Extract opening features from chess game CSVs"
)]
struct Args {
    /// Directory searched recursively for game CSVs
    input_dir: Option<PathBuf>,

    /// Directory for the <band>FEATURES files (default: the input directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file; flags given here take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads (1 = sequential)
    #[arg(long)]
    threads: Option<usize>,

    /// Output encoding
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write rows in completion order when running in parallel
    #[arg(long)]
    unordered: bool,

    /// Turns replayed for num_unique_pieces_moved
    #[arg(long)]
    unique_horizon: Option<usize>,

    /// Turns replayed for material_difference
    #[arg(long)]
    material_horizon: Option<usize>,

    /// Turns replayed for num_center_squares_controlled
    #[arg(long)]
    center_horizon: Option<usize>,

    /// Only log the final summary
    #[arg(long)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BatchConfig::default(),
        };
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        } else if self.config.is_none() {
            config.output_dir = config.input_dir.clone();
        }
        if let Some(n) = self.threads {
            config.threads = n;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.unordered {
            config.preserve_order = false;
        }
        if let Some(h) = self.unique_horizon {
            config.horizons.unique_pieces = h;
        }
        if let Some(h) = self.material_horizon {
            config.horizons.material = h;
        }
        if let Some(h) = self.center_horizon {
            config.horizons.center = h;
        }
        config.quiet |= self.quiet;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    let summary = run_batch(&config)
        .with_context(|| format!("processing {}", config.input_dir.display()))?;
    log_summary(&summary);
    Ok(())
}
