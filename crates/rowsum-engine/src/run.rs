//! Spawns one scoped thread per worker, joins them all, then aggregates.

use std::any::Any;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::aggregate::{aggregate, AggregateResult};
use crate::config::EngineConfig;
use crate::cursor::{AtomicCursor, CursorKind, LockedCursor, RowCursor};
use crate::error::EngineError;
use crate::matrix::Matrix;
use crate::partition::{DynamicAssignment, RowSource, StaticAssignment, Strategy};
use crate::worker::{run_worker, WorkerState};

#[derive(Debug, Clone, serde::Serialize)]
pub struct RunReport {
    pub config: EngineConfig,
    pub rows: usize,
    pub cols: usize,
    /// Indexed by `tid`.
    pub workers: Vec<WorkerState>,
    pub aggregate: AggregateResult,
    /// Wall-clock time from the first spawn to the last join.
    pub elapsed: Duration,
}

pub fn run(matrix: &Matrix, config: &EngineConfig) -> Result<RunReport, EngineError> {
    if config.threads == 0 {
        return Err(EngineError::ZeroThreads);
    }

    let mut workers: Vec<WorkerState> = (0..config.threads)
        .map(|tid| WorkerState::new(tid, config.record_rows))
        .collect();

    let started = Instant::now();
    // Rows a dynamic cursor never handed out; always zero after a clean join.
    let unclaimed = match (config.strategy, config.cursor) {
        (Strategy::Static, _) => {
            let threads = config.threads;
            drive(matrix, &mut workers, |tid| {
                StaticAssignment::new(tid, threads, matrix.rows())
            })?;
            0
        }
        (Strategy::Dynamic, CursorKind::Locked) => {
            let cursor = LockedCursor::new(matrix.rows());
            drive(matrix, &mut workers, |_| {
                DynamicAssignment::new(&cursor, config.chunk)
            })?;
            cursor.remaining()
        }
        (Strategy::Dynamic, CursorKind::Atomic) => {
            let cursor = AtomicCursor::new(matrix.rows());
            drive(matrix, &mut workers, |_| {
                DynamicAssignment::new(&cursor, config.chunk)
            })?;
            cursor.remaining()
        }
    };
    let elapsed = started.elapsed();

    let aggregate = aggregate(&workers);
    debug!(
        strategy = %config.strategy,
        threads = config.threads,
        rows = aggregate.total_rows_processed,
        sum = aggregate.gross_sum,
        unclaimed,
        elapsed_us = elapsed.as_micros() as u64,
        "run complete"
    );

    Ok(RunReport {
        config: config.clone(),
        rows: matrix.rows(),
        cols: matrix.cols(),
        workers,
        aggregate,
        elapsed,
    })
}

/// Each worker gets an exclusive borrow of its own state; the matrix and any
/// cursor captured by `source_for` are shared. Returns only after every
/// spawned thread has been joined.
fn drive<S, F>(matrix: &Matrix, workers: &mut [WorkerState], source_for: F) -> Result<(), EngineError>
where
    S: RowSource + Send,
    F: Fn(usize) -> S,
{
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers.len());
        let mut outcome = Ok(());

        for state in workers.iter_mut() {
            let tid = state.tid;
            let source = source_for(tid);
            let spawned = thread::Builder::new()
                .name(format!("rowsum-worker-{tid}"))
                .spawn_scoped(scope, move || run_worker(matrix, source, state));

            match spawned {
                Ok(handle) => handles.push((tid, handle)),
                Err(source) => {
                    outcome = Err(EngineError::Spawn { tid, source });
                    break;
                }
            }
        }

        for (tid, handle) in handles {
            if let Err(payload) = handle.join() {
                if outcome.is_ok() {
                    outcome = Err(EngineError::WorkerPanicked {
                        tid,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }
        }

        outcome
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
