//! Randomly populated sparse matrices.
//!
//! Cells are chosen by rejection sampling: a flat index is drawn uniformly
//! over the whole matrix and accepted only if that cell is still zero. The
//! expected number of draws grows without bound as the density approaches 1.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::{fatal, MatCoreError, Result};
use crate::shape::flat_to_2d;
use crate::sparse_coo::SparseCooMatrix;
use crate::traits::{Matrix, MatrixMut};

/// Distribution the nonzero values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueDistribution {
    /// Uniform on [0, 1).
    #[default]
    Uniform,
    /// Standard normal (mean 0, variance 1).
    StandardNormal,
}

impl ValueDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            ValueDistribution::Uniform => rng.gen::<f64>(),
            ValueDistribution::StandardNormal => rng.sample::<f64, _>(StandardNormal),
        }
    }

    /// Draws until the value is nonzero, so every accepted cell really holds
    /// a stored entry.
    fn sample_nonzero<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        loop {
            let value = self.sample(rng);
            if value != 0.0 {
                return value;
            }
        }
    }
}

/// Parameters of a randomly populated sparse matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseRand {
    /// Fraction of cells to fill, in [0, 1).
    pub density: f64,
    pub distribution: ValueDistribution,
    /// Optional cap on index draws. `None` keeps drawing until the target
    /// count is reached.
    pub max_draws: Option<usize>,
}

impl SparseRand {
    /// Uniform values, no draw cap.
    pub fn new(density: f64) -> Self {
        Self {
            density,
            distribution: ValueDistribution::Uniform,
            max_draws: None,
        }
    }

    pub fn with_params(
        density: f64,
        distribution: ValueDistribution,
        max_draws: Option<usize>,
    ) -> Self {
        Self {
            density,
            distribution,
            max_draws,
        }
    }

    /// Number of cells a `rows x cols` matrix gets: floor(density * rows * cols).
    pub fn target_count(&self, rows: usize, cols: usize) -> usize {
        ((rows * cols) as f64 * self.density) as usize
    }

    /// Builds the matrix.
    ///
    /// # Panics
    ///
    /// Panics if the density is outside [0, 1), or if `max_draws` is set and
    /// exhausted.
    pub fn populate<R: Rng + ?Sized>(&self, rows: usize, cols: usize, rng: &mut R) -> SparseCooMatrix {
        fatal(self.try_populate(rows, cols, rng))
    }

    /// Fallible form of [`SparseRand::populate`]. Returns
    /// [`MatCoreError::NonConvergence`] when the draw cap runs out.
    pub fn try_populate<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<SparseCooMatrix> {
        if !(0.0..1.0).contains(&self.density) {
            return Err(MatCoreError::InvalidDensity(self.density));
        }
        let size = rows * cols;
        let target = self.target_count(rows, cols);
        let mut matrix = SparseCooMatrix::new(rows, cols);
        let mut draws = 0usize;

        for _ in 0..target {
            loop {
                if self.max_draws.is_some_and(|max| draws >= max) {
                    log::warn!(
                        "Gave up after {} draws with {} of {} cells filled",
                        draws,
                        matrix.nnz(),
                        target
                    );
                    return Err(MatCoreError::NonConvergence);
                }
                draws += 1;
                let (row, col) = flat_to_2d(rows, cols, rng.gen_range(0..size));
                if matrix.item(row, col) == 0.0 {
                    let value = self.distribution.sample_nonzero(rng);
                    matrix.set_item(row, col, value);
                    break;
                }
            }
        }

        log::debug!(
            "Populated {} of {} cells of a {}x{} matrix in {} draws ({:?})",
            target,
            size,
            rows,
            cols,
            draws,
            self.distribution
        );
        Ok(matrix)
    }
}

/// Sparse coordinate matrix with floor(density * rows * cols) cells filled
/// with values uniformly distributed on [0, 1). Very slow as the density
/// approaches 1.
///
/// # Panics
///
/// Panics if `density` is outside [0, 1).
pub fn sparse_rand<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> SparseCooMatrix {
    SparseRand::new(density).populate(rows, cols, rng)
}

/// Like [`sparse_rand`], but values follow the standard normal distribution.
pub fn sparse_randn<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> SparseCooMatrix {
    SparseRand::with_params(density, ValueDistribution::StandardNormal, None).populate(rows, cols, rng)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_zero_density_is_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let matrix = sparse_rand(10, 12, 0.0, &mut rng);
        assert_eq!(matrix.dims(), (10, 12));
        assert_eq!(matrix.nnz(), 0);
    }

    #[test]
    fn test_exact_count_uniform_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let matrix = sparse_rand(20, 15, 0.37, &mut rng);
        assert_eq!(matrix.nnz(), (0.37 * 300.0) as usize);
        for triplet in matrix.iter() {
            assert!(triplet.value() > 0.0 && triplet.value() < 1.0);
        }
    }

    #[test]
    fn test_normal_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let matrix = sparse_randn(30, 30, 0.5, &mut rng);
        assert_eq!(matrix.nnz(), 450);
        let values: Vec<f64> = matrix.iter().map(|t| t.value()).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!(mean.abs() < 0.2, "mean {} too far from 0", mean);
        assert!(values.iter().any(|&v| v < 0.0));
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = sparse_rand(8, 8, 0.3, &mut StdRng::seed_from_u64(11));
        let b = sparse_rand(8, 8, 0.3, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_density() {
        let mut rng = StdRng::seed_from_u64(1);
        for density in [-0.1, 1.0, 1.5, f64::NAN] {
            let result = SparseRand::new(density).try_populate(3, 3, &mut rng);
            assert!(matches!(result, Err(MatCoreError::InvalidDensity(_))));
        }
    }

    #[test]
    #[should_panic(expected = "Density 1 should be in [0, 1)")]
    fn test_invalid_density_panics() {
        sparse_randn(2, 2, 1.0, &mut StdRng::seed_from_u64(1));
    }

    #[test]
    fn test_draw_cap() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = SparseRand::with_params(0.9, ValueDistribution::Uniform, Some(3));
        assert_eq!(
            options.try_populate(10, 10, &mut rng),
            Err(MatCoreError::NonConvergence)
        );
    }
}
