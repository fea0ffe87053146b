use mat_core::{fatal, DenseMatrix, MatCoreError, Matrix, Result};
use nalgebra::DMatrix;

use crate::bridge::{condition_number, from_backend, is_finite, to_backend};

/// Parameters for inverse and linear solves on the dense backend.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Matrices whose condition number exceeds this are treated as singular.
    pub condition_tolerance: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            condition_tolerance: 1e16,
        }
    }
}

impl SolveOptions {
    /// Creates options with the default condition tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(condition_tolerance: f64) -> Self {
        Self {
            condition_tolerance,
        }
    }

    fn is_well_conditioned(&self, backend: &DMatrix<f64>) -> bool {
        let condition = condition_number(backend);
        if condition > self.condition_tolerance {
            log::debug!(
                "Condition number {:e} exceeds tolerance {:e}",
                condition,
                self.condition_tolerance
            );
            return false;
        }
        true
    }

    /// Inverse of a square matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatCoreError::SingularMatrix`] if `a` is singular,
    /// ill-conditioned or holds NaN or infinite cells.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not square.
    pub fn inverse<M: Matrix + ?Sized>(&self, a: &M) -> Result<DenseMatrix> {
        fatal(validate_square(a));
        self.try_inverse(a)
    }

    /// Like [`SolveOptions::inverse`], but a non-square `a` is returned as
    /// [`MatCoreError::InvalidDimensions`] instead of panicking.
    pub fn try_inverse<M: Matrix + ?Sized>(&self, a: &M) -> Result<DenseMatrix> {
        validate_square(a)?;
        let backend = to_backend(a);
        if !self.is_well_conditioned(&backend) {
            log::warn!("Can't invert a singular {}x{} matrix", a.rows(), a.cols());
            return Err(MatCoreError::SingularMatrix);
        }
        match backend.try_inverse() {
            Some(inverse) => Ok(from_backend(&inverse)),
            None => {
                log::warn!("Backend could not invert a {}x{} matrix", a.rows(), a.cols());
                Err(MatCoreError::SingularMatrix)
            }
        }
    }

    /// Solves `a * x = b` for `x`.
    ///
    /// Square `a` goes through an LU decomposition, any other shape through
    /// an SVD least-squares solve. When no unique solution exists the result
    /// is a `rows(a) x cols(b)` matrix full of NaN; that is not an error.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` have different row counts.
    pub fn ldivide<A, B>(&self, a: &A, b: &B) -> DenseMatrix
    where
        A: Matrix + ?Sized,
        B: Matrix + ?Sized,
    {
        fatal(self.try_ldivide(a, b))
    }

    /// Like [`SolveOptions::ldivide`], but mismatched operands are returned as
    /// [`MatCoreError::InvalidDimensions`]. Unsolvable systems still give the
    /// NaN matrix.
    pub fn try_ldivide<A, B>(&self, a: &A, b: &B) -> Result<DenseMatrix>
    where
        A: Matrix + ?Sized,
        B: Matrix + ?Sized,
    {
        validate_operands(a, b)?;
        let lhs = to_backend(a);
        let rhs = to_backend(b);
        let solution = if a.is_square() {
            self.solve_square(lhs, &rhs)
        } else {
            self.solve_least_squares(lhs, &rhs)
        };
        Ok(match solution {
            Some(x) => from_backend(&x),
            None => {
                log::warn!(
                    "No unique solution for a {}x{} system with {} right-hand sides",
                    a.rows(),
                    a.cols(),
                    b.cols()
                );
                DenseMatrix::with_value(f64::NAN, a.rows(), b.cols())
            }
        })
    }

    /// Alias of [`SolveOptions::ldivide`].
    pub fn solve<A, B>(&self, a: &A, b: &B) -> DenseMatrix
    where
        A: Matrix + ?Sized,
        B: Matrix + ?Sized,
    {
        self.ldivide(a, b)
    }

    fn solve_square(&self, lhs: DMatrix<f64>, rhs: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        if !self.is_well_conditioned(&lhs) {
            return None;
        }
        lhs.lu().solve(rhs)
    }

    fn solve_least_squares(&self, lhs: DMatrix<f64>, rhs: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        if !is_finite(&lhs) {
            return None;
        }
        let full_rank = lhs.nrows().min(lhs.ncols());
        let svd = lhs.svd(true, true);
        let max_singular = svd.singular_values.iter().copied().fold(0.0, f64::max);
        let eps = max_singular * full_rank as f64 * f64::EPSILON;
        if svd.rank(eps) < full_rank {
            return None;
        }
        svd.solve(rhs, eps).ok()
    }
}

/// Inverse with the default options. See [`SolveOptions::inverse`].
pub fn inverse<M: Matrix + ?Sized>(a: &M) -> Result<DenseMatrix> {
    SolveOptions::default().inverse(a)
}

/// Solve with the default options. See [`SolveOptions::ldivide`].
pub fn ldivide<A, B>(a: &A, b: &B) -> DenseMatrix
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    SolveOptions::default().ldivide(a, b)
}

/// Alias of [`ldivide`].
pub fn solve<A, B>(a: &A, b: &B) -> DenseMatrix
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    ldivide(a, b)
}

/// Matrix norm of order `ord`:
/// 1 is the maximum absolute column sum, 2 the Frobenius norm and
/// `f64::INFINITY` the maximum absolute row sum.
///
/// # Panics
///
/// Panics for any other order.
pub fn norm<M: Matrix + ?Sized>(m: &M, ord: f64) -> f64 {
    fatal(try_norm(m, ord))
}

/// Fallible form of [`norm`].
pub fn try_norm<M: Matrix + ?Sized>(m: &M, ord: f64) -> Result<f64> {
    let backend = to_backend(m);
    if ord == 1.0 {
        Ok(backend
            .column_iter()
            .map(|col| col.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max))
    } else if ord == 2.0 {
        Ok(backend.norm())
    } else if ord == f64::INFINITY {
        Ok(backend
            .row_iter()
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max))
    } else {
        Err(MatCoreError::InvalidNormOrder(ord))
    }
}

fn validate_square<M: Matrix + ?Sized>(a: &M) -> Result<()> {
    if !a.is_square() {
        return Err(MatCoreError::InvalidDimensions(format!(
            "Can't invert a non-square {}x{} matrix",
            a.rows(),
            a.cols()
        )));
    }
    Ok(())
}

fn validate_operands<A, B>(a: &A, b: &B) -> Result<()>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    if a.rows() != b.rows() {
        return Err(MatCoreError::InvalidDimensions(format!(
            "Matrix A rows ({}) must match right-hand side rows ({})",
            a.rows(),
            b.rows()
        )));
    }
    Ok(())
}
