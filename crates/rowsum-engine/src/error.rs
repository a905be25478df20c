use derive_builder::UninitializedFieldError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("claim chunk must be at least 1 row")]
    ZeroChunk,

    #[error("engine setting '{0}' was not provided")]
    MissingSetting(&'static str),

    #[error("matrix shape {rows}x{cols} does not match {len} cells")]
    Shape { rows: usize, cols: usize, len: usize },

    #[error("matrix of {rows}x{cols} cells does not fit in memory")]
    TooLarge { rows: usize, cols: usize },

    #[error("failed to allocate a {rows}x{cols} matrix")]
    Allocation {
        rows: usize,
        cols: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("failed to spawn worker {tid}")]
    Spawn {
        tid: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {tid} panicked: {message}")]
    WorkerPanicked { tid: usize, message: String },
}

impl From<UninitializedFieldError> for EngineError {
    fn from(err: UninitializedFieldError) -> Self {
        EngineError::MissingSetting(err.field_name())
    }
}
