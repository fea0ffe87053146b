use thiserror::Error;

/// Result alias used across the matrix crates.
pub type Result<T> = std::result::Result<T, MatCoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatCoreError {
    #[error("Invalid matrix dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Can't use {count} diag elements in a {rows}x{cols} matrix")]
    TooManyDiagonalValues {
        count: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Can't set off-diagonal element ({row}, {col}) of a diagonal matrix to {value}")]
    StructuralZero { row: usize, col: usize, value: f64 },

    #[error("Off-diagonal element ({row}, {col}) is nonzero ({value}); diagonal format can't hold it")]
    OffDiagonalNonzero { row: usize, col: usize, value: f64 },

    #[error("Can't multiply a {left_rows}x{left_cols} matrix by a {right_rows}x{right_cols} matrix")]
    IncompatibleProduct {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("Density {0} should be in [0, 1)")]
    InvalidDensity(f64),

    #[error("Unsupported norm order {0}; expected 1, 2 or infinity")]
    InvalidNormOrder(f64),

    #[error("Matrix is singular")]
    SingularMatrix,

    #[error("Algorithm did not converge")]
    NonConvergence,

}

/// Turns a violated precondition into the fatal stop the public API promises.
///
/// The `try_*` entry points return the error instead.
#[track_caller]
pub fn fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
