//! Post-run checks against a sequential traversal of the same matrix.

use crate::aggregate::AggregateResult;
use crate::matrix::Matrix;
use crate::run::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Verification {
    pub expected: AggregateResult,
    pub actual: AggregateResult,
}

impl Verification {
    pub fn check(matrix: &Matrix, report: &RunReport) -> Self {
        Self {
            expected: AggregateResult {
                total_rows_processed: matrix.rows(),
                gross_sum: matrix.total(),
            },
            actual: report.aggregate,
        }
    }

    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// Which rows were missed or summed more than once, from traced row lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Coverage {
    pub missing: Vec<usize>,
    pub duplicated: Vec<usize>,
    /// Traced indices at or past `rows`.
    pub out_of_range: Vec<usize>,
}

impl Coverage {
    /// `None` when the run was made without row tracing.
    pub fn of(report: &RunReport) -> Option<Self> {
        let mut coverage = Coverage::default();
        let mut hits = vec![0usize; report.rows];
        for worker in &report.workers {
            for &row in worker.claimed_rows.as_ref()? {
                match hits.get_mut(row) {
                    Some(count) => *count += 1,
                    None => coverage.out_of_range.push(row),
                }
            }
        }

        for (row, &count) in hits.iter().enumerate() {
            match count {
                0 => coverage.missing.push(row),
                1 => {}
                _ => coverage.duplicated.push(row),
            }
        }
        Some(coverage)
    }

    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty() && self.out_of_range.is_empty()
    }
}
