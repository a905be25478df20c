//! Parallel matrix reduction demo.
//!
//! Populates a seeded matrix, sums it with one thread per worker using either
//! static (round-robin) or dynamic (shared cursor) row partitioning, and
//! prints each worker's share alongside the grand total.

mod cli;
mod logging;
mod report;
mod settings;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use engine::{Coverage, Matrix, Verification};
use rng::CellSource;
use tracing::{debug, error, info};

use crate::cli::Cli;
use crate::report::Outcome;
use crate::settings::{ConfigError, FileConfig, Settings};

/// Invalid configuration or usage.
const EXIT_USAGE: u8 = 1;
/// The run itself failed, or a requested verification did not pass.
const EXIT_RUN_FAILURE: u8 = 2;

fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Runs one reduction; `Ok(false)` means a requested check did not pass.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let available = available_parallelism();
    info!("{available} concurrent threads supported");

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, file, available)?;

    let mut source = settings.generator.seeded(settings.seed);
    let matrix = Matrix::generate(settings.rows, settings.cols, || source.next_cell())
        .map_err(ConfigError::from)?;
    debug!(
        rows = settings.rows,
        cols = settings.cols,
        seed = settings.seed,
        generator = %settings.generator,
        "matrix populated"
    );

    let report = engine::run(&matrix, &settings.engine).context("parallel reduction failed")?;
    let verification = settings
        .verify
        .then(|| Verification::check(&matrix, &report));
    let coverage = Coverage::of(&report);

    let outcome = Outcome {
        settings: &settings,
        report: &report,
        verification: verification.as_ref(),
        coverage: coverage.as_ref(),
    };

    let mut out = io::stdout().lock();
    let written = if settings.json {
        outcome.write_json(&mut out)
    } else {
        outcome.write_text(&mut out)
    };
    written.context("failed to write report")?;

    let passed = outcome.passed();
    if !passed {
        error!("verification failed");
    }
    Ok(passed)
}

/// `--help` and `--version` surface as clap errors but are not failures.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_USAGE
    } else {
        0
    }
}

fn exit_code(result: &anyhow::Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_RUN_FAILURE,
        Err(err) if err.downcast_ref::<ConfigError>().is_some() => EXIT_USAGE,
        Err(_) => EXIT_RUN_FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    logging::init(cli.verbose, cli.quiet);

    let result = run(cli);
    if let Err(err) = &result {
        error!("{err:#}");
    }
    let code = exit_code(&result);
    if code == EXIT_USAGE {
        eprintln!("{}", Cli::command().render_usage());
    }
    ExitCode::from(code)
}
