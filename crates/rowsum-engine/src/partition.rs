//! Row assignment strategies.

use core::fmt;
use core::ops::Range;
use core::str::FromStr;

use crate::cursor::RowCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Round-robin rows fixed before the run starts
    #[default]
    Static,
    /// Rows pulled from a shared cursor on demand
    Dynamic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Static => f.write_str("static"),
            Strategy::Dynamic => f.write_str("dynamic"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Strategy::Static),
            "dynamic" => Ok(Strategy::Dynamic),
            other => Err(format!("unknown strategy '{other}' (expected static or dynamic)")),
        }
    }
}

/// Hands one worker its next unit of work.
///
/// `None` means the worker is done; a source never yields again after that.
pub trait RowSource {
    fn next_rows(&mut self) -> Option<Range<usize>>;
}

/// Strided assignment: worker `tid` of `threads` owns rows
/// `tid, tid + threads, tid + 2 * threads, ...` below `rows`.
///
/// Needs no shared state, so it is computed independently per worker.
#[derive(Debug, Clone)]
pub struct StaticAssignment {
    row: usize,
    stride: usize,
    rows: usize,
}

impl StaticAssignment {
    pub fn new(tid: usize, threads: usize, rows: usize) -> Self {
        assert!(threads > 0, "static assignment needs at least one thread");
        Self {
            row: tid,
            stride: threads,
            rows,
        }
    }
}

impl Iterator for StaticAssignment {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.row >= self.rows {
            return None;
        }
        let row = self.row;
        self.row = self.row.saturating_add(self.stride);
        Some(row)
    }
}

impl RowSource for StaticAssignment {
    fn next_rows(&mut self) -> Option<Range<usize>> {
        self.next().map(|row| row..row + 1)
    }
}

/// Pull-based assignment over a cursor shared by every dynamic worker.
pub struct DynamicAssignment<'c, C: ?Sized> {
    cursor: &'c C,
    chunk: usize,
}

impl<'c, C: RowCursor + ?Sized> DynamicAssignment<'c, C> {
    pub fn new(cursor: &'c C, chunk: usize) -> Self {
        Self { cursor, chunk }
    }
}

impl<C: RowCursor + ?Sized> RowSource for DynamicAssignment<'_, C> {
    fn next_rows(&mut self) -> Option<Range<usize>> {
        self.cursor.claim(self.chunk)
    }
}
