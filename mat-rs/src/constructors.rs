//! Shorthand constructors for literal matrices.

use mat_core::{fatal, DenseMatrix, MatCoreError, SparseCooMatrix, SparseDiagMatrix};
use nalgebra::DMatrix;

/// Dense `rows x cols` matrix from row-major literal values. Cells past the
/// end of `array` are zero.
///
/// # Panics
///
/// Panics if `array` holds more than `rows * cols` values.
pub fn m(rows: usize, cols: usize, array: &[f64]) -> DenseMatrix {
    fatal(try_m(rows, cols, array))
}

/// Fallible form of [`m`].
pub fn try_m(rows: usize, cols: usize, array: &[f64]) -> mat_core::Result<DenseMatrix> {
    let size = rows * cols;
    if array.len() > size {
        return Err(MatCoreError::InvalidDimensions(format!(
            "Can't use {} literal values in a {}x{} matrix",
            array.len(),
            rows,
            cols
        )));
    }
    let mut data = array.to_vec();
    data.resize(size, 0.0);
    DenseMatrix::new(rows, cols, data)
}

/// Dense matrix from a list of rows.
///
/// # Panics
///
/// Panics if the rows differ in length.
pub fn m2(rows: &[Vec<f64>]) -> DenseMatrix {
    fatal(DenseMatrix::from_rows(rows))
}

/// Square diagonal matrix with `values` on the main diagonal.
pub fn diag(values: &[f64]) -> SparseDiagMatrix {
    SparseDiagMatrix::new(values.len(), values.len(), values)
}

/// Square sparse identity matrix.
pub fn eye(size: usize) -> SparseDiagMatrix {
    SparseDiagMatrix::identity(size)
}

pub fn with_value(value: f64, rows: usize, cols: usize) -> DenseMatrix {
    DenseMatrix::with_value(value, rows, cols)
}

pub fn zeros(rows: usize, cols: usize) -> DenseMatrix {
    DenseMatrix::zeros(rows, cols)
}

/// Coordinate-format matrix whose leading cells take the nonzero values of
/// `array` in row-major order.
///
/// # Panics
///
/// Panics if `array` holds more than `rows * cols` values.
pub fn sparse_coo(rows: usize, cols: usize, array: &[f64]) -> SparseCooMatrix {
    SparseCooMatrix::from_literal(rows, cols, array)
}

/// Diagonal-format matrix initialized from `diag`, zero elsewhere.
///
/// # Panics
///
/// Panics if `diag` holds more than `min(rows, cols)` values.
pub fn sparse_diag(rows: usize, cols: usize, diag: &[f64]) -> SparseDiagMatrix {
    SparseDiagMatrix::new(rows, cols, diag)
}

/// Dense copy of a backend matrix.
pub fn to_matrix(m: &DMatrix<f64>) -> DenseMatrix {
    mat_lsolver::from_backend(m)
}
