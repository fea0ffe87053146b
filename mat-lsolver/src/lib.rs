//! `mat-lsolver`: inverse, linear solve and norms for the matrix layouts of
//! `mat-core`, delegated to the nalgebra dense backend.
//!
//! Bring [`Linalg`] into scope to call these as methods on any matrix.

// Core modules
pub mod bridge;
pub mod linalg;
pub mod solver;

pub use bridge::{from_backend, to_backend};
pub use linalg::Linalg;
pub use solver::{inverse, ldivide, norm, solve, try_norm, SolveOptions};

// Re-export from mat_core
pub use mat_core::{DenseMatrix, MatCoreError, Matrix, MatrixMut, Result};
