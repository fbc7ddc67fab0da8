//! Batch feature extraction over directories of game CSVs.
//!
//! Each input file is read in full, its games are turned into feature rows
//! (in parallel when more than one thread is configured), and the rows are
//! appended to the output file of the file's rating band.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use log::{info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

use crate::config::{BatchConfig, ConfigError, OutputFormat};
use crate::features::{extract, Horizons};
use crate::record::{FeaturePair, GameRecord, Outcome, CSV_HEADER};

/// Errors that abort a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("input directory {0} does not exist")]
    MissingInput(PathBuf),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Finds every game CSV below `dir`, skipping feature files from earlier runs.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::MissingInput(dir.to_path_buf()));
    }
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| BatchError::Read {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| BatchError::Read {
                    path: current.clone(),
                    source,
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if is_game_csv(&path) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

fn is_game_csv(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |name| name.contains(".csv") && !name.contains("FEATURES"))
}

/// Rating band an input file belongs to, derived from its file name.
pub fn rating_band(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let band = if name.contains("1000") {
        "1000-1499"
    } else if name.contains("1500") {
        "1500-1999"
    } else if name.contains("2000") {
        "2000+"
    } else if name.contains("999") {
        "0-999"
    } else {
        return path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("games")
            .to_string();
    };
    band.to_string()
}

/// Output file for a rating band.
pub fn output_path(output_dir: &Path, band: &str, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{}FEATURES.{}", band, format.extension()))
}

/// Parses `moves,result` rows after a header line.
///
/// The outcome is whatever follows the last comma. Rows with an unknown
/// outcome are logged and skipped.
pub fn parse_records<R: BufRead>(reader: R, source: &Path) -> Result<Vec<GameRecord>, BatchError> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| BatchError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        if line_no == 0 {
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let parsed = line.rsplit_once(',').and_then(|(moves, result)| {
            let outcome = result.trim().parse::<u8>().ok().and_then(Outcome::from_code)?;
            Some(GameRecord::new(moves.trim().trim_matches('"'), outcome))
        });
        match parsed {
            Some(record) => records.push(record),
            None => warn!(
                "{}:{}: skipping row without a 0/1/2 result",
                source.display(),
                line_no + 1
            ),
        }
    }
    Ok(records)
}

pub fn read_records(path: &Path) -> Result<Vec<GameRecord>, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(BufReader::new(file), path)
}

/// Extracts features for every record.
///
/// Without a pool the records are processed on the calling thread. With a
/// pool, `preserve_order` keeps results aligned with `records`; otherwise
/// results are returned in completion order.
pub fn extract_all(
    records: &[GameRecord],
    horizons: &Horizons,
    pool: Option<&ThreadPool>,
    preserve_order: bool,
) -> Vec<FeaturePair> {
    let Some(pool) = pool else {
        return records.iter().map(|r| extract(r, horizons)).collect();
    };
    if preserve_order {
        return pool.install(|| records.par_iter().map(|r| extract(r, horizons)).collect());
    }

    let (tx, rx) = mpsc::channel::<FeaturePair>();
    pool.install(|| {
        records.par_iter().for_each_with(tx, |tx, r| {
            let _ = tx.send(extract(r, horizons));
        });
    });
    rx.into_iter().collect()
}

/// Writes two CSV rows per game, white first.
pub fn write_csv<W: Write>(pairs: &[FeaturePair], out: &mut W, header: bool) -> io::Result<()> {
    if header {
        writeln!(out, "{}", CSV_HEADER)?;
    }
    for pair in pairs {
        writeln!(out, "{}", pair.white.csv_line())?;
        writeln!(out, "{}", pair.black.csv_line())?;
    }
    Ok(())
}

/// Writes one JSON object per game, one per line.
pub fn write_jsonl<W: Write>(pairs: &[FeaturePair], out: &mut W) -> io::Result<()> {
    for pair in pairs {
        serde_json::to_writer(&mut *out, pair).map_err(io::Error::from)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Appends rows to `path`, writing the CSV header only into a new file.
pub fn append_rows(
    path: &Path,
    pairs: &[FeaturePair],
    format: OutputFormat,
) -> Result<(), BatchError> {
    let write_err = |source| BatchError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    let fresh = file.metadata().map_err(write_err)?.len() == 0;
    let mut out = BufWriter::new(file);
    let written = match format {
        OutputFormat::Csv => write_csv(pairs, &mut out, fresh),
        OutputFormat::Jsonl => write_jsonl(pairs, &mut out),
    };
    written.and_then(|_| out.flush()).map_err(write_err)
}

/// Totals for one rating band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandSummary {
    pub games: usize,
    pub sentinels: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    /// Feature sums over the rows of valid games, in CSV column order.
    sums: [i64; 4],
}

impl BandSummary {
    pub fn add(&mut self, pair: &FeaturePair) {
        self.games += 1;
        match (pair.white.win, pair.black.win) {
            (1, _) => self.white_wins += 1,
            (_, 1) => self.black_wins += 1,
            _ => self.draws += 1,
        }
        if pair.is_sentinel() {
            self.sentinels += 1;
            return;
        }
        for row in [&pair.white, &pair.black] {
            self.sums[0] += i64::from(row.when_castled);
            self.sums[1] += i64::from(row.num_center_squares_controlled);
            self.sums[2] += i64::from(row.material_difference);
            self.sums[3] += i64::from(row.num_unique_pieces_moved);
        }
    }

    /// Mean of each feature over the rows of valid games.
    pub fn means(&self) -> [f64; 4] {
        let rows = 2 * (self.games - self.sentinels);
        if rows == 0 {
            return [0.0; 4];
        }
        self.sums.map(|s| s as f64 / rows as f64)
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub files: usize,
    pub bands: BTreeMap<String, BandSummary>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn total_games(&self) -> usize {
        self.bands.values().map(|b| b.games).sum()
    }
}

/// Processes every input file under `config.input_dir`.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    config.validate()?;
    let start = Instant::now();

    let inputs = discover_inputs(&config.input_dir)?;
    info!("found {} game files under {}", inputs.len(), config.input_dir.display());
    fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::Write {
        path: config.output_dir.clone(),
        source,
    })?;

    let pool = if config.threads > 1 {
        Some(ThreadPoolBuilder::new().num_threads(config.threads).build()?)
    } else {
        None
    };

    let mut summary = BatchSummary::default();
    for input in &inputs {
        let file_start = Instant::now();
        let band = rating_band(input);
        let out_path = output_path(&config.output_dir, &band, config.format);
        if !config.quiet {
            info!("processing {} -> {}", input.display(), out_path.display());
        }

        let records = read_records(input)?;
        let pairs = extract_all(&records, &config.horizons, pool.as_ref(), config.preserve_order);
        append_rows(&out_path, &pairs, config.format)?;

        let band_summary = summary.bands.entry(band).or_default();
        for pair in &pairs {
            band_summary.add(pair);
        }
        summary.files += 1;
        if !config.quiet {
            info!(
                "{}: {} games in {:.1}s",
                input.display(),
                pairs.len(),
                file_start.elapsed().as_secs_f64()
            );
        }
    }

    summary.elapsed = start.elapsed();
    Ok(summary)
}

/// Logs the per-band totals of a finished run.
pub fn log_summary(summary: &BatchSummary) {
    info!(
        "done: {} files, {} games in {:.1}s",
        summary.files,
        summary.total_games(),
        summary.elapsed.as_secs_f64()
    );
    for (band, b) in &summary.bands {
        let [castled, center, material, unique] = b.means();
        info!(
            "{:>10}: {} games ({} malformed), white {} / black {} / draw {}",
            band, b.games, b.sentinels, b.white_wins, b.black_wins, b.draws
        );
        info!(
            "{:>10}  mean when_castled {:.2}, center {:.2}, material {:.2}, unique pieces {:.2}",
            "", castled, center, material, unique
        );
    }
}
