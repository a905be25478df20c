//! Parallel reduction of an integer matrix with two row-partitioning schemes.
//!
//! Static partitioning hands worker `tid` the rows `tid, tid + N, tid + 2N, ...`
//! up front. Dynamic partitioning lets workers pull rows from a shared cursor
//! until it runs dry. Either way each worker keeps a private partial sum, and
//! the partials are folded together once every worker has been joined.

pub mod aggregate;
pub mod config;
pub mod cursor;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod run;
pub mod verify;
pub mod worker;

pub use aggregate::{aggregate, AggregateResult};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use cursor::{AtomicCursor, CursorKind, LockedCursor, RowCursor};
pub use error::EngineError;
pub use matrix::Matrix;
pub use partition::{DynamicAssignment, RowSource, StaticAssignment, Strategy};
pub use run::{run, RunReport};
pub use verify::{Coverage, Verification};
pub use worker::{run_worker, WorkerState};
