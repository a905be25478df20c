//! Shared "rows not yet claimed" counters for dynamic partitioning.
//!
//! A cursor starts at `rows` and only moves down. Every claim reads the
//! counter, lowers it and hands out the rows it stepped over in one
//! indivisible step, so no row is handed out twice and none is skipped.
//! Single-row claims therefore yield `rows - 1, rows - 2, ..., 0`.

use core::fmt;
use core::ops::Range;
use core::str::FromStr;
use core::sync::atomic::{AtomicUsize, Ordering};

use spin::Mutex;

pub trait RowCursor: Sync {
    /// Claims up to `max` contiguous rows (at least one while rows remain).
    /// Returns `None` once every row has been handed out.
    fn claim(&self, max: usize) -> Option<Range<usize>>;

    /// Rows not yet handed out.
    fn remaining(&self) -> usize;
}

/// Splits `remaining` into the new counter value and the claimed range.
#[inline]
fn split(remaining: usize, max: usize) -> Option<(usize, Range<usize>)> {
    if remaining == 0 {
        return None;
    }
    let next = remaining - max.clamp(1, remaining);
    Some((next, next..remaining))
}

/// Counter behind a spin lock; one critical section per claim.
///
/// Waiting threads busy-spin instead of parking in the OS, so contention here
/// burns CPU and does not time like a blocking mutex.
pub struct LockedCursor {
    remaining: Mutex<usize>,
}

impl LockedCursor {
    pub fn new(rows: usize) -> Self {
        Self {
            remaining: Mutex::new(rows),
        }
    }
}

impl RowCursor for LockedCursor {
    fn claim(&self, max: usize) -> Option<Range<usize>> {
        let mut remaining = self.remaining.lock();
        let (next, rows) = split(*remaining, max)?;
        *remaining = next;
        Some(rows)
    }

    fn remaining(&self) -> usize {
        *self.remaining.lock()
    }
}

/// Lock-free counter claimed with a compare-and-swap loop.
pub struct AtomicCursor {
    remaining: AtomicUsize,
}

impl AtomicCursor {
    pub fn new(rows: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(rows),
        }
    }
}

impl RowCursor for AtomicCursor {
    fn claim(&self, max: usize) -> Option<Range<usize>> {
        loop {
            let current = self.remaining.load(Ordering::Acquire);
            let (next, rows) = split(current, max)?;

            if self
                .remaining
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Some(rows);
            }
        }
    }

    fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorKind {
    #[default]
    Locked,
    Atomic,
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorKind::Locked => f.write_str("locked"),
            CursorKind::Atomic => f.write_str("atomic"),
        }
    }
}

impl FromStr for CursorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "locked" => Ok(CursorKind::Locked),
            "atomic" => Ok(CursorKind::Atomic),
            other => Err(format!("unknown cursor '{other}' (expected locked or atomic)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn drain<C: RowCursor>(cursor: &C, max: usize) -> Vec<Range<usize>> {
        core::iter::from_fn(|| cursor.claim(max)).collect()
    }

    #[test]
    fn test_single_claims_count_down() {
        for cursor in [&LockedCursor::new(4) as &dyn RowCursor, &AtomicCursor::new(4)] {
            let rows: Vec<usize> = core::iter::from_fn(|| cursor.claim(1))
                .flatten()
                .collect();
            assert_eq!(rows, vec![3, 2, 1, 0]);
            assert_eq!(cursor.remaining(), 0);
            assert_eq!(cursor.claim(1), None);
        }
    }

    #[test]
    fn test_chunked_claims_cover_tail() {
        let cursor = LockedCursor::new(10);
        assert_eq!(drain(&cursor, 4), vec![6..10, 2..6, 0..2]);
    }

    #[test]
    fn test_zero_max_still_makes_progress() {
        let cursor = AtomicCursor::new(2);
        assert_eq!(drain(&cursor, 0), vec![1..2, 0..1]);
    }

    #[test]
    fn test_empty_cursor() {
        assert_eq!(LockedCursor::new(0).claim(1), None);
        assert_eq!(AtomicCursor::new(0).claim(8), None);
    }

    fn contended<C: RowCursor>(cursor: &C, rows: usize) {
        let mut claimed: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| drain(cursor, 3).into_iter().flatten().collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        claimed.sort_unstable();
        assert_eq!(claimed, (0..rows).collect::<Vec<_>>());
    }

    #[test]
    fn test_contended_claims_are_disjoint() {
        contended(&LockedCursor::new(5_000), 5_000);
        contended(&AtomicCursor::new(5_000), 5_000);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!("Atomic".parse::<CursorKind>(), Ok(CursorKind::Atomic));
        assert_eq!(CursorKind::Locked.to_string(), "locked");
        assert!("ticket".parse::<CursorKind>().is_err());
    }
}
