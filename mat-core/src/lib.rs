//! # Matrix Core Library
//!
//! Provides the matrix capability traits and the three storage layouts that
//! implement them: dense row-major, sparse coordinate and sparse diagonal.
//! Products, pairwise distances and layout conversions work on any mix of
//! layouts through the shared [`Matrix`] trait.

// Declare modules
pub mod dense_matrix;
pub mod distance;
pub mod error;
pub mod ops;
pub mod random;
pub mod shape;
pub mod sparse_coo;
pub mod sparse_diag;
pub mod traits;
pub mod views;

// Re-export public types
pub use dense_matrix::DenseMatrix;
pub use distance::DistanceMetric;
pub use error::{fatal, MatCoreError, Result};
pub use random::{sparse_rand, sparse_randn, SparseRand, ValueDistribution};
pub use sparse_coo::{SparseCooMatrix, Triplet};
pub use sparse_diag::SparseDiagMatrix;
pub use views::{Transposed, TransposedMut};

pub use traits::{Matrix, MatrixMut};
