use std::borrow::Cow;
use std::fmt::Debug;

use crate::dense_matrix::DenseMatrix;
use crate::distance::{self, DistanceMetric};
use crate::error::{fatal, MatCoreError, Result};
use crate::ops;
use crate::sparse_coo::SparseCooMatrix;
use crate::sparse_diag::SparseDiagMatrix;
use crate::views::{Transposed, TransposedMut};

/// Generic trait representing a 2-D matrix of `f64` values.
///
/// Implemented by every storage layout (dense, sparse coordinate, sparse
/// diagonal) and by the borrowed transposed views, so algorithms can be
/// written once against `&dyn Matrix` or `M: Matrix`.
///
/// Index arguments are `(row, col)`. Out-of-range indices are programmer
/// errors and panic.
pub trait Matrix: Debug {
    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }

    /// Returns the value stored at `(row, col)`.
    fn item(&self, row: usize, col: usize) -> f64;

    /// Returns one row for read-only access.
    ///
    /// May be a live view into the backing storage or a copy, depending on the
    /// layout. Dense matrices hand out a borrowed slice.
    fn row(&self, row: usize) -> Cow<'_, [f64]> {
        let (rows, cols) = self.dims();
        assert!(row < rows, "Row {} out of range for a {}x{} matrix", row, rows, cols);
        Cow::Owned((0..cols).map(|col| self.item(row, col)).collect())
    }

    /// Returns one column for read-only access. May or may not be a copy.
    fn col(&self, col: usize) -> Cow<'_, [f64]> {
        let (rows, cols) = self.dims();
        assert!(col < cols, "Column {} out of range for a {}x{} matrix", col, rows, cols);
        Cow::Owned((0..rows).map(|row| self.item(row, col)).collect())
    }

    /// Calls `f(row, col, value)` for every nonzero cell, in row-major order.
    fn for_each_nonzero(&self, f: &mut dyn FnMut(usize, usize, f64)) {
        let (rows, cols) = self.dims();
        for row in 0..rows {
            for col in 0..cols {
                let value = self.item(row, col);
                if value != 0.0 {
                    f(row, col, value);
                }
            }
        }
    }

    /// Returns the number of nonzero cells.
    fn nnz(&self) -> usize {
        let mut count = 0;
        self.for_each_nonzero(&mut |_, _, _| count += 1);
        count
    }

    /// Returns a dense row-major copy of every cell.
    fn to_vec(&self) -> Vec<f64> {
        let cols = self.cols();
        let mut data = vec![0.0; self.rows() * cols];
        self.for_each_nonzero(&mut |row, col, value| data[row * cols + col] = value);
        data
    }

    /// Returns an independent dense copy of the matrix.
    fn to_dense(&self) -> DenseMatrix {
        let (rows, cols) = self.dims();
        DenseMatrix::from_parts(rows, cols, self.to_vec())
    }

    /// Returns the main diagonal as a `min(rows, cols) x 1` column.
    fn diag(&self) -> DenseMatrix {
        let size = self.rows().min(self.cols());
        DenseMatrix::from_parts(size, 1, (0..size).map(|k| self.item(k, k)).collect())
    }

    /// Returns the same matrix with axes swapped. No data is copied: the view
    /// borrows `self`. Use [`Matrix::to_dense`] on the view for an owned copy.
    fn t(&self) -> Transposed<'_, Self>
    where
        Self: Sized,
    {
        Transposed::new(self)
    }

    /// Chained matrix product `self * others[0] * others[1] * ...`.
    ///
    /// If A is m x p and B is p x n, then C = A.mprod(B) is the m x n matrix
    /// with C[i, j] = sum_k A[i, k] * B[k, j].
    ///
    /// # Panics
    ///
    /// Panics if two consecutive operands have mismatched inner dimensions.
    fn mprod(&self, others: &[&dyn Matrix]) -> DenseMatrix {
        fatal(self.try_mprod(others))
    }

    /// Fallible form of [`Matrix::mprod`].
    fn try_mprod(&self, others: &[&dyn Matrix]) -> Result<DenseMatrix> {
        ops::chain_product(self, others)
    }

    /// Treats the rows as points and returns the `rows x rows` matrix of
    /// pairwise distances between them.
    fn dist(&self, metric: DistanceMetric) -> DenseMatrix {
        distance::pairwise(self, metric)
    }

    /// Returns a copy in sparse coordinate format. Any matrix can be
    /// expressed this way, so this never fails.
    fn sparse_coo(&self) -> SparseCooMatrix {
        let mut coo = SparseCooMatrix::new(self.rows(), self.cols());
        self.for_each_nonzero(&mut |row, col, value| coo.set_item(row, col, value));
        coo
    }

    /// Returns a copy in sparse diagonal format.
    ///
    /// # Panics
    ///
    /// Panics if any off-diagonal element is nonzero.
    fn sparse_diag(&self) -> SparseDiagMatrix {
        fatal(self.try_sparse_diag())
    }

    /// Fallible form of [`Matrix::sparse_diag`].
    fn try_sparse_diag(&self) -> Result<SparseDiagMatrix> {
        let mut off_diagonal = None;
        self.for_each_nonzero(&mut |row, col, value| {
            if row != col && off_diagonal.is_none() {
                off_diagonal = Some(MatCoreError::OffDiagonalNonzero { row, col, value });
            }
        });
        if let Some(err) = off_diagonal {
            return Err(err);
        }
        let diag = self.diag();
        SparseDiagMatrix::try_new(self.rows(), self.cols(), diag.data())
    }

    /// Exact cell-by-cell comparison, independent of storage layout.
    fn equal(&self, other: &dyn Matrix) -> bool {
        self.dims() == other.dims() && self.to_vec() == other.to_vec()
    }

    /// Cell-by-cell comparison with an absolute tolerance.
    fn all_close(&self, other: &dyn Matrix, tolerance: f64) -> bool {
        self.dims() == other.dims()
            && self
                .to_vec()
                .iter()
                .zip(other.to_vec())
                .all(|(&a, b)| a == b || (a - b).abs() <= tolerance)
    }
}

/// Write side of the matrix interface.
///
/// Every setter panics on misuse; the `try_*` forms return the error instead
/// and leave the matrix untouched.
pub trait MatrixMut: Matrix {
    /// Stores `value` at `(row, col)`.
    fn try_set_item(&mut self, row: usize, col: usize, value: f64) -> Result<()>;

    fn set_item(&mut self, row: usize, col: usize, value: f64) {
        fatal(self.try_set_item(row, col, value))
    }

    /// Overwrites one row. `values.len()` must equal the column count.
    fn try_set_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        check_line(self.dims(), row, values.len(), Line::Row)?;
        for (col, &value) in values.iter().enumerate() {
            self.try_set_item(row, col, value)?;
        }
        Ok(())
    }

    fn set_row(&mut self, row: usize, values: &[f64]) {
        fatal(self.try_set_row(row, values))
    }

    /// Overwrites one column. `values.len()` must equal the row count.
    fn try_set_col(&mut self, col: usize, values: &[f64]) -> Result<()> {
        check_line(self.dims(), col, values.len(), Line::Col)?;
        for (row, &value) in values.iter().enumerate() {
            self.try_set_item(row, col, value)?;
        }
        Ok(())
    }

    fn set_col(&mut self, col: usize, values: &[f64]) {
        fatal(self.try_set_col(col, values))
    }

    /// Writable transposed view. Writes go straight to `self`.
    fn t_mut(&mut self) -> TransposedMut<'_, Self>
    where
        Self: Sized,
    {
        TransposedMut::new(self)
    }
}

/// Checks that `(row, col)` addresses a cell of a `dims`-shaped matrix.
pub fn check_index(dims: (usize, usize), row: usize, col: usize) -> Result<()> {
    let (rows, cols) = dims;
    if row < rows && col < cols {
        Ok(())
    } else {
        Err(MatCoreError::IndexOutOfBounds {
            row,
            col,
            rows,
            cols,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line {
    Row,
    Col,
}

/// Validates the target index and value count of a row or column write.
pub(crate) fn check_line(dims: (usize, usize), index: usize, len: usize, line: Line) -> Result<()> {
    let (rows, cols) = dims;
    let (count, label, expected) = match line {
        Line::Row => (rows, "row", cols),
        Line::Col => (cols, "column", rows),
    };
    if index >= count {
        return Err(MatCoreError::InvalidDimensions(format!(
            "{} {} out of range for a {}x{} matrix",
            label, index, rows, cols
        )));
    }
    if len != expected {
        return Err(MatCoreError::InvalidDimensions(format!(
            "Can't set {} {} with {} values; expected {}",
            label, index, len, expected
        )));
    }
    Ok(())
}
