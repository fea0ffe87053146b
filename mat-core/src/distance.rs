//! Pairwise distances between matrix rows.

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::dense_matrix::DenseMatrix;
use crate::traits::Matrix;

/// Distance metric for pairwise distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DistanceMetric {
    /// Euclidean (L2) distance: sqrt(sum((x - y)^2))
    Euclidean,
}

impl DistanceMetric {
    /// Returns the name of the metric for log and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
        }
    }

    fn between<T: Float>(&self, a: &[T], b: &[T]) -> T {
        match self {
            DistanceMetric::Euclidean => euclidean_distance(a, b),
        }
    }
}

/// Treats each row of `m` as a point and returns the `rows x rows` distance
/// matrix. Only the upper triangle is computed; it is mirrored, and the
/// diagonal stays exactly zero.
pub fn pairwise<M: Matrix + ?Sized>(m: &M, metric: DistanceMetric) -> DenseMatrix {
    let n = m.rows();
    let points: Vec<_> = (0..n).map(|i| m.row(i)).collect();
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let dist = metric.between(points[i].as_ref(), points[j].as_ref());
            out[i * n + j] = dist;
            out[j * n + i] = dist;
        }
    }
    log::trace!("{} distances between {} points", metric.name(), n);
    DenseMatrix::from_parts(n, n, out)
}

#[inline]
fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| {
            let diff = x - y;
            acc + diff * diff
        })
        .sqrt()
}
