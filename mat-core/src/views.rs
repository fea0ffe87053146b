//! Borrowed transposed views.
//!
//! A view shares the backing storage of the matrix it was taken from: nothing
//! is copied, and the borrow checker ties the view's lifetime to its source.
//! Writes through a [`TransposedMut`] land directly in the source matrix.

use std::borrow::Cow;

use crate::error::Result;
use crate::traits::{Matrix, MatrixMut};

/// Read-only transposed view of `M`.
#[derive(Debug)]
pub struct Transposed<'a, M: Matrix + ?Sized> {
    inner: &'a M,
}

impl<M: Matrix + ?Sized> Clone for Transposed<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Matrix + ?Sized> Copy for Transposed<'_, M> {}

impl<'a, M: Matrix + ?Sized> Transposed<'a, M> {
    pub fn new(inner: &'a M) -> Self {
        Self { inner }
    }

    /// The matrix this view was taken from.
    pub fn inner(&self) -> &'a M {
        self.inner
    }
}

impl<M: Matrix + ?Sized> Matrix for Transposed<'_, M> {
    fn dims(&self) -> (usize, usize) {
        let (rows, cols) = self.inner.dims();
        (cols, rows)
    }

    fn item(&self, row: usize, col: usize) -> f64 {
        self.inner.item(col, row)
    }

    fn row(&self, row: usize) -> Cow<'_, [f64]> {
        self.inner.col(row)
    }

    fn col(&self, col: usize) -> Cow<'_, [f64]> {
        self.inner.row(col)
    }

    // Visits in the source's order, i.e. column-major for the view.
    fn for_each_nonzero(&self, f: &mut dyn FnMut(usize, usize, f64)) {
        self.inner
            .for_each_nonzero(&mut |row, col, value| f(col, row, value));
    }

    fn nnz(&self) -> usize {
        self.inner.nnz()
    }
}

/// Writable transposed view of `M`.
#[derive(Debug)]
pub struct TransposedMut<'a, M: MatrixMut + ?Sized> {
    inner: &'a mut M,
}

impl<'a, M: MatrixMut + ?Sized> TransposedMut<'a, M> {
    pub fn new(inner: &'a mut M) -> Self {
        Self { inner }
    }
}

impl<M: MatrixMut + ?Sized> Matrix for TransposedMut<'_, M> {
    fn dims(&self) -> (usize, usize) {
        let (rows, cols) = self.inner.dims();
        (cols, rows)
    }

    fn item(&self, row: usize, col: usize) -> f64 {
        self.inner.item(col, row)
    }

    fn row(&self, row: usize) -> Cow<'_, [f64]> {
        self.inner.col(row)
    }

    fn col(&self, col: usize) -> Cow<'_, [f64]> {
        self.inner.row(col)
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(usize, usize, f64)) {
        self.inner
            .for_each_nonzero(&mut |row, col, value| f(col, row, value));
    }

    fn nnz(&self) -> usize {
        self.inner.nnz()
    }
}

impl<M: MatrixMut + ?Sized> MatrixMut for TransposedMut<'_, M> {
    fn try_set_item(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.inner.try_set_item(col, row, value)
    }

    fn try_set_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        self.inner.try_set_col(row, values)
    }

    fn try_set_col(&mut self, col: usize, values: &[f64]) -> Result<()> {
        self.inner.try_set_row(col, values)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DenseMatrix, Matrix, MatrixMut, SparseCooMatrix, SparseDiagMatrix};

    #[test]
    fn test_transpose_swaps_axes_without_copy() {
        let matrix = DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = matrix.t();
        assert_eq!(t.dims(), (3, 2));
        assert_eq!(t.item(2, 1), 6.0);
        assert_eq!(t.row(1).as_ref(), &[2.0, 5.0]);
        assert_eq!(t.col(0).as_ref(), &[1.0, 2.0, 3.0]);
        assert!(std::ptr::eq(t.inner(), &matrix));
        assert_eq!(t.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert!(t.t().equal(&matrix));
    }

    #[test]
    fn test_transpose_of_sparse() {
        let matrix = SparseCooMatrix::from_literal(2, 3, &[0.0, 0.0, 7.0]);
        let t = matrix.t();
        assert_eq!(t.dims(), (3, 2));
        assert_eq!(t.item(2, 0), 7.0);
        assert_eq!(t.nnz(), 1);

        let diag = SparseDiagMatrix::new(2, 3, &[1.0, 2.0]);
        assert_eq!(diag.t().dims(), (3, 2));
        assert_eq!(diag.t().diag().data(), &[1.0, 2.0]);
    }

    #[test]
    fn test_transpose_mut_writes_through() {
        let mut matrix = DenseMatrix::zeros(2, 3);
        {
            let mut t = matrix.t_mut();
            t.set_item(2, 0, 5.0);
            t.set_row(1, &[8.0, 9.0]);
        }
        assert_eq!(matrix.data(), &[0.0, 8.0, 5.0, 0.0, 9.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "Can't set off-diagonal element (0, 1)")]
    fn test_transpose_mut_of_diag_keeps_structure() {
        let mut matrix = SparseDiagMatrix::identity(2);
        matrix.t_mut().set_item(1, 0, 2.0);
    }
}
