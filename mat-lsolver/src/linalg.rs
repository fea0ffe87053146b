use mat_core::{DenseMatrix, Matrix, Result};

use crate::solver;

/// Backend-delegated operations, available on every [`Matrix`] once this
/// trait is in scope.
pub trait Linalg: Matrix {
    /// See [`crate::SolveOptions::inverse`].
    fn inverse(&self) -> Result<DenseMatrix> {
        solver::inverse(self)
    }

    /// Solves `self * x = b`. See [`crate::SolveOptions::ldivide`].
    fn ldivide<B: Matrix + ?Sized>(&self, b: &B) -> DenseMatrix {
        solver::ldivide(self, b)
    }

    fn solve<B: Matrix + ?Sized>(&self, b: &B) -> DenseMatrix {
        solver::solve(self, b)
    }

    /// See [`crate::norm`].
    fn norm(&self, ord: f64) -> f64 {
        solver::norm(self, ord)
    }
}

impl<M: Matrix + ?Sized> Linalg for M {}
