//! Batch run configuration.
//!
//! A run starts from `BatchConfig::default()`, optionally overlaid by a JSON
//! file, and finally by command-line flags in the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::features::Horizons;

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("thread count must be at least 1")]
    NoThreads,
}

/// Output encoding for feature rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two CSV rows per game, white then black.
    #[default]
    Csv,
    /// One JSON object per game with `white` and `black` rows.
    Jsonl,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

/// Configuration for one feature-extraction run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory searched recursively for game CSVs.
    pub input_dir: PathBuf,
    /// Directory the per-band feature files are written to.
    pub output_dir: PathBuf,
    /// Worker threads. 1 processes games on the calling thread.
    pub threads: usize,
    pub format: OutputFormat,
    /// Keep output rows in input order when running in parallel.
    pub preserve_order: bool,
    pub horizons: Horizons,
    /// Suppress per-file progress logging.
    pub quiet: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            threads: 1,
            format: OutputFormat::Csv,
            preserve_order: true,
            horizons: Horizons::default(),
            quiet: false,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        Ok(())
    }
}

/// Loads a configuration file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<BatchConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&data)
}

pub fn load_config_from_str(json: &str) -> Result<BatchConfig, ConfigError> {
    let config: BatchConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}
