//! Resolves flags, environment and an optional TOML file into one run setup.
//!
//! Precedence is flag/env > file > built-in default.

use std::path::{Path, PathBuf};

use engine::{CursorKind, EngineConfig, EngineError, Matrix, Strategy};
use rng::Generator;
use thiserror::Error;
use tracing::warn;

use crate::cli::Cli;

pub const DEFAULT_ROWS: usize = 1000;
pub const DEFAULT_COLS: usize = 100;
pub const DEFAULT_THREADS: usize = 2;
pub const MIN_THREADS: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("matrix {0} must be at least 1")]
    ZeroDimension(&'static str),

    #[error("matrix of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Settings accepted from `--config`. Every key is optional.
#[derive(Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub seed: Option<u64>,
    pub generator: Option<Generator>,
    pub threads: Option<usize>,
    pub dynamic: Option<bool>,
    pub cursor: Option<CursorKind>,
    pub chunk: Option<usize>,
    pub trace_rows: Option<bool>,
    pub verify: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub generator: Generator,
    pub engine: EngineConfig,
    pub verify: bool,
    pub json: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig, available: usize) -> Result<Self, ConfigError> {
        let rows = cli.rows.or(file.rows).unwrap_or(DEFAULT_ROWS);
        let cols = cli.cols.or(file.cols).unwrap_or(DEFAULT_COLS);
        if rows == 0 {
            return Err(ConfigError::ZeroDimension("rows"));
        }
        if cols == 0 {
            return Err(ConfigError::ZeroDimension("cols"));
        }
        if Matrix::cell_count(rows, cols).is_none() {
            return Err(ConfigError::TooLarge { rows, cols });
        }

        let requested = cli.threads.or(file.threads).unwrap_or(DEFAULT_THREADS);
        let threads = clamp_threads(requested, available);
        if threads != requested {
            warn!(requested, threads, available, "thread count clamped");
        }

        let strategy = if cli.dynamic || file.dynamic.unwrap_or(false) {
            Strategy::Dynamic
        } else {
            Strategy::Static
        };

        let engine = EngineConfig::builder()
            .threads(threads)
            .strategy(strategy)
            .cursor(cli.cursor.or(file.cursor).unwrap_or_default())
            .chunk(cli.chunk.or(file.chunk).unwrap_or(1))
            .record_rows(cli.trace_rows || file.trace_rows.unwrap_or(false))
            .build()?;

        Ok(Self {
            rows,
            cols,
            seed: cli.seed.or(file.seed).unwrap_or(rng::DEFAULT_SEED),
            generator: cli.generator.or(file.generator).unwrap_or_default(),
            engine,
            verify: cli.verify || file.verify.unwrap_or(false),
            json: cli.json,
        })
    }
}

/// Clamps into `[MIN_THREADS, max(MIN_THREADS, available)]`.
pub fn clamp_threads(requested: usize, available: usize) -> usize {
    requested.clamp(MIN_THREADS, available.max(MIN_THREADS))
}
