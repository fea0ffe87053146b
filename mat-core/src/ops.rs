//! Matrix products shared by every storage layout.

use crate::dense_matrix::DenseMatrix;
use crate::error::{MatCoreError, Result};
use crate::traits::Matrix;

/// Computes `a * b`.
///
/// Only the nonzero cells of `a` contribute, so a sparse left operand costs
/// `nnz(a) * cols(b)` multiply-adds. The right operand is densified once.
/// If it holds NaN or infinite values every cell of `a` is visited instead,
/// so those values propagate as they would in a dense product.
pub fn multiply<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    let (m, p) = a.dims();
    let (b_rows, n) = b.dims();
    if p != b_rows {
        return Err(MatCoreError::IncompatibleProduct {
            left_rows: m,
            left_cols: p,
            right_rows: b_rows,
            right_cols: n,
        });
    }

    let rhs = b.to_vec();
    let mut out = vec![0.0; m * n];
    let mut accumulate = |i: usize, k: usize, a_ik: f64| {
        let out_row = &mut out[i * n..(i + 1) * n];
        let rhs_row = &rhs[k * n..(k + 1) * n];
        for (acc, &b_kj) in out_row.iter_mut().zip(rhs_row) {
            *acc += a_ik * b_kj;
        }
    };
    if rhs.iter().all(|v| v.is_finite()) {
        a.for_each_nonzero(&mut accumulate);
    } else {
        // 0 * NaN and 0 * Inf are NaN, so zero cells of `a` count too.
        let lhs = a.to_vec();
        for i in 0..m {
            for k in 0..p {
                accumulate(i, k, lhs[i * p + k]);
            }
        }
    }
    log::trace!("multiplied {}x{} by {}x{}", m, p, b_rows, n);
    Ok(DenseMatrix::from_parts(m, n, out))
}

/// Left-to-right chained product `first * others[0] * others[1] * ...`.
/// With no `others`, returns a dense copy of `first`.
pub fn chain_product<M>(first: &M, others: &[&dyn Matrix]) -> Result<DenseMatrix>
where
    M: Matrix + ?Sized,
{
    let Some((head, rest)) = others.split_first() else {
        return Ok(first.to_dense());
    };
    let mut acc = multiply(first, *head)?;
    for &next in rest {
        acc = multiply(&acc, next)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use crate::{DenseMatrix, MatCoreError, Matrix, MatrixMut, SparseCooMatrix, SparseDiagMatrix};

    #[test]
    fn test_identity_product() {
        let eye = DenseMatrix::new(2, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let b = DenseMatrix::new(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(eye.mprod(&[&b]), b);
    }

    #[test]
    fn test_rectangular_product() {
        // [1 2 3]   [1 0]   [ 4  2]
        // [4 5 6] x [0 1] = [10  5]
        //           [1 0]
        let a = DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = SparseCooMatrix::from_literal(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        let c = a.mprod(&[&b]);
        assert_eq!(c.dims(), (2, 2));
        assert_eq!(c.data(), &[4.0, 2.0, 10.0, 5.0]);
    }

    #[test]
    fn test_chained_product_mixed_layouts() {
        let scale = SparseDiagMatrix::new(2, 2, &[2.0, 3.0]);
        let a = DenseMatrix::new(2, 2, vec![1.0, 1.0, 0.0, 1.0]).unwrap();
        let coo = SparseCooMatrix::from_literal(2, 1, &[1.0, 1.0]);
        // diag(2,3) * a * [1;1] = diag(2,3) * [2;1] = [4;3]
        let c = scale.mprod(&[&a, &coo]);
        assert_eq!(c.dims(), (2, 1));
        assert_eq!(c.data(), &[4.0, 3.0]);
    }

    #[test]
    fn test_product_through_transposed_view() {
        let a = DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let gram = a.mprod(&[&a.t()]);
        assert_eq!(gram.data(), &[14.0, 32.0, 32.0, 77.0]);
    }

    #[test]
    fn test_empty_chain_copies() {
        let a = SparseDiagMatrix::identity(2);
        assert!(a.mprod(&[]).equal(&a));
    }

    #[test]
    fn test_non_finite_right_operand_propagates() {
        let zeros = DenseMatrix::zeros(2, 2);
        let nan = DenseMatrix::with_value(f64::NAN, 2, 2);
        assert!(zeros.mprod(&[&nan]).data().iter().all(|v| v.is_nan()));

        let inf = DenseMatrix::with_value(f64::INFINITY, 2, 2);
        assert!(zeros.mprod(&[&inf]).data().iter().all(|v| v.is_nan()));

        // Zero rows of a sparse operand still meet the NaN column.
        let coo = SparseCooMatrix::from_literal(2, 2, &[1.0, 0.0, 0.0, 0.0]);
        let mut column = DenseMatrix::zeros(2, 1);
        column.set_item(1, 0, f64::NAN);
        assert!(coo.mprod(&[&column]).data().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_finite_product_through_dense_path() {
        let a = SparseDiagMatrix::new(2, 2, &[2.0, 0.0]);
        let b = DenseMatrix::new(2, 2, vec![1.0, f64::INFINITY, 3.0, 4.0]).unwrap();
        let c = a.mprod(&[&b]);
        assert_eq!(c.item(0, 0), 2.0);
        assert_eq!(c.item(0, 1), f64::INFINITY);
        assert_eq!(c.item(1, 0), 0.0);
        assert!(c.item(1, 1).is_nan());
    }

    #[test]
    fn test_incompatible_product() {
        let a = DenseMatrix::zeros(2, 3);
        let b = DenseMatrix::zeros(2, 3);
        assert_eq!(
            a.try_mprod(&[&b]).unwrap_err(),
            MatCoreError::IncompatibleProduct {
                left_rows: 2,
                left_cols: 3,
                right_rows: 2,
                right_cols: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "Can't multiply a 2x2 matrix by a 3x1 matrix")]
    fn test_incompatible_chain_panics() {
        let a = DenseMatrix::zeros(2, 3);
        let b = DenseMatrix::zeros(3, 2);
        let c = DenseMatrix::zeros(3, 1);
        a.mprod(&[&b, &c]);
    }
}
