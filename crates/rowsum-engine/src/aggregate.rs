use crate::worker::WorkerState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AggregateResult {
    pub total_rows_processed: usize,
    pub gross_sum: u64,
}

/// Folds joined worker states into the grand total.
pub fn aggregate(states: &[WorkerState]) -> AggregateResult {
    states
        .iter()
        .fold(AggregateResult::default(), |acc, state| AggregateResult {
            total_rows_processed: acc.total_rows_processed + state.rows_processed,
            gross_sum: acc.gross_sum.wrapping_add(state.partial_sum),
        })
}
