//! Row-major `i32` matrix shared read-only by every worker.

use core::mem::size_of;

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Matrix {
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self, EngineError> {
        let len = cells.len();
        let shape_error = || EngineError::Shape { rows, cols, len };
        let expected = rows.checked_mul(cols).ok_or_else(shape_error)?;
        if len != expected {
            return Err(shape_error());
        }
        Ok(Self { rows, cols, cells })
    }

    /// Number of cells in a `rows x cols` matrix, or `None` when its storage
    /// would not fit in one allocation (`isize::MAX` bytes).
    pub fn cell_count(rows: usize, cols: usize) -> Option<usize> {
        let cells = rows.checked_mul(cols)?;
        let bytes = cells.checked_mul(size_of::<i32>())?;
        (bytes <= isize::MAX as usize).then_some(cells)
    }

    /// Fill row by row, one draw per cell.
    pub fn generate(
        rows: usize,
        cols: usize,
        mut next: impl FnMut() -> i32,
    ) -> Result<Self, EngineError> {
        let len = Self::cell_count(rows, cols).ok_or(EngineError::TooLarge { rows, cols })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|source| EngineError::Allocation { rows, cols, source })?;
        cells.extend((0..len).map(|_| next()));
        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }

    /// Panics if `index >= self.rows()`.
    #[inline]
    pub fn row(&self, index: usize) -> &[i32] {
        let start = index * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn row_sum(&self, index: usize) -> u64 {
        accumulate(0, self.row(index))
    }

    /// Sequential sum of every cell, used as the reference total.
    pub fn total(&self) -> u64 {
        accumulate(0, &self.cells)
    }
}

/// Adds cells into a u64 accumulator with two's-complement wrapping, so the
/// result is independent of the order rows are folded in.
#[inline]
pub(crate) fn accumulate(acc: u64, cells: &[i32]) -> u64 {
    cells
        .iter()
        .fold(acc, |acc, &cell| acc.wrapping_add(cell as i64 as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_rows_are_row_major() {
        let m = sample();
        assert_eq!(m.row(0), &[1, 2]);
        assert_eq!(m.row(2), &[5, 6]);
        assert_eq!(m.row_sum(1), 7);
        assert_eq!(m.total(), 21);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = Matrix::from_vec(2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, EngineError::Shape { rows: 2, cols: 2, len: 3 }));
    }

    #[test]
    fn test_generate_draws_in_row_order() {
        let mut n = 0;
        let m = Matrix::generate(2, 3, || {
            n += 1;
            n
        })
        .unwrap();
        assert_eq!(m.row(0), &[1, 2, 3]);
        assert_eq!(m.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_negative_cells_wrap_consistently() {
        let m = Matrix::from_vec(2, 1, vec![-5, 7]).unwrap();
        assert_eq!(m.row_sum(0), (-5i64) as u64);
        assert_eq!(m.total(), 2);
        assert_eq!(m.row_sum(0).wrapping_add(m.row_sum(1)), m.total());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_matrix_rejected() {
        // Cell count overflows once scaled to bytes.
        let err = Matrix::generate(1 << 31, 1 << 31, || 0).unwrap_err();
        assert!(matches!(err, EngineError::TooLarge { .. }));

        // Byte count fits a usize but exceeds isize::MAX.
        assert_eq!(Matrix::cell_count(1 << 31, 1 << 30), None);
        assert_eq!(Matrix::cell_count(1 << 30, 1 << 30), Some(1 << 60));
    }

    #[test]
    fn test_cell_count_overflow() {
        assert_eq!(Matrix::cell_count(usize::MAX, 2), None);
        assert_eq!(Matrix::cell_count(1000, 100), Some(100_000));
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::generate(0, 100, || 1).unwrap();
        assert_eq!(m.rows(), 0);
        assert_eq!(m.total(), 0);
    }
}
