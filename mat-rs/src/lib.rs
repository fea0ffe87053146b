//! # mat-rs
//!
//! One entry point for the matrix crates: literal constructors, the storage
//! layouts and traits from `mat-core`, and the backend-delegated numerics
//! from `mat-lsolver`.
//!
//! ```
//! use mat_rs::prelude::*;
//!
//! let a = m(2, 2, &[2.0, 0.0, 0.0, 4.0]);
//! let x = a.solve(&m(2, 1, &[1.0, 1.0]));
//! assert_eq!(x.to_vec(), vec![0.5, 0.25]);
//! ```

pub mod constructors;
pub mod prelude;

pub use constructors::{
    diag, eye, m, m2, sparse_coo, sparse_diag, to_matrix, try_m, with_value, zeros,
};
pub use mat_core::{
    distance, random, shape, sparse_rand, sparse_randn, DenseMatrix, DistanceMetric,
    MatCoreError, Matrix, MatrixMut, Result, SparseCooMatrix, SparseDiagMatrix, SparseRand,
    Transposed, TransposedMut, Triplet, ValueDistribution,
};
pub use mat_lsolver::{inverse, ldivide, norm, solve, to_backend, Linalg, SolveOptions};
