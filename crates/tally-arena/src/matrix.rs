//! Row-major matrices built from independently allocated rows.

use tally_core::error::{Result, TallyError};
use tally_core::{Buffer, MAX_RECORD_LEN};

/// A `row_count × col_count` grid of `i32` stored as separate row blocks.
///
/// Cell access trusts its indices: callers must keep `row < row_count` and
/// `col < col_count`. Out-of-range access panics through slice indexing.
#[derive(Debug)]
pub struct Matrix {
    rows: Vec<Buffer>,
    col_count: usize,
}

impl Matrix {
    /// Allocate a zero-filled matrix.
    ///
    /// The index is reserved first, then rows `0..row_count` in order. If
    /// row `k` cannot be allocated, rows `0..k` and the index are dropped
    /// before `OutOfMemory` is returned.
    pub fn allocate(row_count: usize, col_count: usize) -> Result<Self> {
        if col_count > MAX_RECORD_LEN {
            return Err(TallyError::InvalidArgument {
                detail: format!("{col_count} columns exceeds the row limit of {MAX_RECORD_LEN}")
                    .into(),
            });
        }

        let mut rows = Vec::new();
        rows.try_reserve_exact(row_count)
            .map_err(|_| TallyError::OutOfMemory {
                requested: row_count,
            })?;

        for _ in 0..row_count {
            // An early return here drops `rows`, which releases every row
            // accumulated so far and then the index itself.
            rows.push(Buffer::allocate(col_count)?);
        }

        Ok(Self { rows, col_count })
    }

    /// Release every row, then the index.
    pub fn release(self) {
        drop(self);
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in every row.
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Read the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count` or `col >= col_count`.
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.rows[row][col]
    }

    /// Overwrite the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count` or `col >= col_count`.
    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        self.rows[row].set(col, value);
    }

    /// Shared view of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count`.
    pub fn row(&self, row: usize) -> &[i32] {
        self.rows[row].as_slice()
    }

    /// Mutable view of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count`.
    pub fn row_mut(&mut self, row: usize) -> &mut [i32] {
        self.rows[row].as_mut_slice()
    }

    /// Iterate over the rows in order.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            inner: self.rows.iter(),
        }
    }

    /// Heap bytes held by the rows and the index.
    pub fn memory_bytes(&self) -> usize {
        let index = self.rows.capacity() * std::mem::size_of::<Buffer>();
        index + self.rows.iter().map(Buffer::memory_bytes).sum::<usize>()
    }
}

/// Iterator over the rows of a [`Matrix`].
pub struct Rows<'a> {
    inner: std::slice::Iter<'a, Buffer>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [i32];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Buffer::as_slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {}
