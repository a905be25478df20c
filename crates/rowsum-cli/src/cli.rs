use std::path::PathBuf;

use clap::{ArgAction, Parser};
use engine::CursorKind;
use rng::Generator;

/// rowsum command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "rowsum",
    version,
    about = "Sum a matrix in parallel with static or dynamic row partitioning"
)]
pub struct Cli {
    /// Use dynamic load balancing (default: static)
    #[arg(short = 'd', long = "dynamic", env = "ROWSUM_DYNAMIC")]
    pub dynamic: bool,

    /// Number of worker threads, clamped to [2, available parallelism] (default: 2)
    #[arg(short = 't', long = "threads", env = "ROWSUM_THREADS")]
    pub threads: Option<usize>,

    /// Matrix rows (default: 1000)
    #[arg(long, env = "ROWSUM_ROWS")]
    pub rows: Option<usize>,

    /// Matrix columns (default: 100)
    #[arg(long, env = "ROWSUM_COLS")]
    pub cols: Option<usize>,

    /// Seed for matrix population, decimal or 0x-prefixed hex (default: 0x1234)
    #[arg(long, env = "ROWSUM_SEED", value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Cell generator: lcg or chacha (default: lcg)
    #[arg(long, env = "ROWSUM_GENERATOR")]
    pub generator: Option<Generator>,

    /// Shared cursor for dynamic balancing: locked or atomic (default: locked)
    #[arg(long, env = "ROWSUM_CURSOR")]
    pub cursor: Option<CursorKind>,

    /// Rows claimed per dynamic cursor operation (default: 1)
    #[arg(long, env = "ROWSUM_CHUNK")]
    pub chunk: Option<usize>,

    /// Record and print the rows each worker summed
    #[arg(long)]
    pub trace_rows: bool,

    /// Check the result against a sequential sum
    #[arg(long)]
    pub verify: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// TOML file with default settings; flags and env vars take precedence
    #[arg(long, env = "ROWSUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

fn parse_seed(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid seed '{s}': {e}"))
}
