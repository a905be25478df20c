//! Renders a finished run for stdout.

use std::io::{self, Write};

use engine::{Coverage, RunReport, Verification};
use rng::Generator;

use crate::settings::Settings;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    seed: u64,
    generator: Generator,
    #[serde(flatten)]
    report: &'a RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<&'a Verification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<&'a Coverage>,
}

pub struct Outcome<'a> {
    pub settings: &'a Settings,
    pub report: &'a RunReport,
    pub verification: Option<&'a Verification>,
    pub coverage: Option<&'a Coverage>,
}

impl Outcome<'_> {
    /// False when a requested check found a mismatch.
    pub fn passed(&self) -> bool {
        let sums_ok = self.verification.map_or(true, Verification::passed);
        let rows_ok = !self.settings.verify || self.coverage.map_or(true, Coverage::is_exact);
        sums_ok && rows_ok
    }

    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        let config = &self.report.config;
        write!(
            out,
            "strategy={} threads={} rows={} cols={} seed={:#x} generator={}",
            config.strategy, config.threads, self.report.rows, self.report.cols,
            self.settings.seed, self.settings.generator,
        )?;
        if config.strategy == engine::Strategy::Dynamic {
            write!(out, " cursor={} chunk={}", config.cursor, config.chunk)?;
        }
        writeln!(out)?;

        for worker in &self.report.workers {
            write!(
                out,
                "worker {}: rows={} sum={}",
                worker.tid, worker.rows_processed, worker.partial_sum
            )?;
            if let Some(rows) = &worker.claimed_rows {
                write!(out, " claimed={rows:?}")?;
            }
            writeln!(out)?;
        }

        writeln!(
            out,
            "total: rows={} sum={} elapsed={:?}",
            self.report.aggregate.total_rows_processed,
            self.report.aggregate.gross_sum,
            self.report.elapsed,
        )?;

        if let Some(coverage) = self.coverage.filter(|c| !c.is_exact()) {
            writeln!(
                out,
                "coverage: missing={:?} duplicated={:?} out_of_range={:?}",
                coverage.missing, coverage.duplicated, coverage.out_of_range
            )?;
        }
        if self.verification.is_some() {
            let verdict = if self.passed() { "PASSED" } else { "FAILED" };
            writeln!(out, "verification: {verdict}")?;
        }
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        let json = JsonReport {
            seed: self.settings.seed,
            generator: self.settings.generator,
            report: self.report,
            verification: self.verification,
            coverage: self.coverage,
        };
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out)
    }
}
