//! Glob-import this to get the constructors and every matrix method.

pub use crate::constructors::{diag, eye, m, m2, sparse_coo, sparse_diag, with_value, zeros};
pub use mat_core::{
    sparse_rand, sparse_randn, DenseMatrix, DistanceMetric, Matrix, MatrixMut, SparseCooMatrix,
    SparseDiagMatrix,
};
pub use mat_lsolver::Linalg;
