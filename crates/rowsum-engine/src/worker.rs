use core::ops::Range;

use tracing::info;

use crate::matrix::{accumulate, Matrix};
use crate::partition::RowSource;

/// Per-worker result, written only by the worker that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct WorkerState {
    pub tid: usize,
    pub rows_processed: usize,
    pub partial_sum: u64,
    /// Rows in the order they were summed; only kept when row tracing is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_rows: Option<Vec<usize>>,
}

impl WorkerState {
    pub fn new(tid: usize, record_rows: bool) -> Self {
        Self {
            tid,
            claimed_rows: record_rows.then(Vec::new),
            ..Default::default()
        }
    }

    fn absorb(&mut self, matrix: &Matrix, rows: Range<usize>) {
        for row in rows {
            self.partial_sum = accumulate(self.partial_sum, matrix.row(row));
            self.rows_processed += 1;
            if let Some(claimed) = self.claimed_rows.as_mut() {
                claimed.push(row);
            }
        }
    }
}

/// Drains `source` into `state` until it reports no more work.
pub fn run_worker<S: RowSource>(matrix: &Matrix, mut source: S, state: &mut WorkerState) {
    info!(tid = state.tid, "worker starting");

    while let Some(rows) = source.next_rows() {
        state.absorb(matrix, rows);
    }

    info!(
        tid = state.tid,
        rows = state.rows_processed,
        sum = state.partial_sum,
        "worker ending"
    );
}
