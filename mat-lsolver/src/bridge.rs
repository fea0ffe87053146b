//! Conversions between the matrix layouts and the nalgebra backend.
//!
//! nalgebra stores column-major, the layouts here are row-major, so every
//! conversion is a copy.

use mat_core::{DenseMatrix, Matrix};
use nalgebra::DMatrix;

/// Dense backend copy of any matrix layout.
pub fn to_backend<M: Matrix + ?Sized>(m: &M) -> DMatrix<f64> {
    let (rows, cols) = m.dims();
    log::trace!("Copying a {}x{} matrix to the backend", rows, cols);
    DMatrix::from_row_slice(rows, cols, &m.to_vec())
}

/// Dense row-major copy of a backend matrix.
pub fn from_backend(m: &DMatrix<f64>) -> DenseMatrix {
    let mut out = DenseMatrix::zeros(m.nrows(), m.ncols());
    for (i, backend_row) in m.row_iter().enumerate() {
        for (cell, &value) in out.row_mut(i).iter_mut().zip(backend_row.iter()) {
            *cell = value;
        }
    }
    out
}

/// Ratio of the largest to the smallest singular value. Infinite when the
/// matrix is exactly singular or holds a NaN or infinite cell; 0 for an empty
/// matrix.
pub fn condition_number(m: &DMatrix<f64>) -> f64 {
    if !is_finite(m) {
        return f64::INFINITY;
    }
    let singular_values = m.singular_values();
    let max = singular_values.iter().copied().fold(0.0, f64::max);
    let min = singular_values.iter().copied().fold(f64::INFINITY, f64::min);
    if min == 0.0 {
        return f64::INFINITY;
    }
    max / min
}

/// True when every cell is finite. The backend's SVD panics on NaN input.
pub fn is_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|v| v.is_finite())
}
