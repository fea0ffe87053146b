use std::borrow::Cow;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::dense_matrix::DenseMatrix;
use crate::error::{fatal, MatCoreError, Result};
use crate::traits::{check_index, check_line, Line, Matrix, MatrixMut};

/// Represents a matrix in sparse diagonal format: only the main diagonal is
/// stored, every off-diagonal cell is structurally zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparseDiagMatrix {
    rows: usize,
    cols: usize,
    /// Main diagonal, `min(rows, cols)` long. `diag[k]` is cell `(k, k)`.
    diag: Vec<f64>,
}

impl SparseDiagMatrix {
    /// Creates a `rows x cols` diagonal matrix whose leading diagonal cells
    /// take the values of `diag`; the rest of the diagonal is zero.
    ///
    /// # Panics
    ///
    /// Panics if `diag` has more values than `min(rows, cols)`.
    pub fn new(rows: usize, cols: usize, diag: &[f64]) -> Self {
        fatal(Self::try_new(rows, cols, diag))
    }

    /// Fallible form of [`SparseDiagMatrix::new`].
    pub fn try_new(rows: usize, cols: usize, diag: &[f64]) -> Result<Self> {
        let size = rows.min(cols);
        if diag.len() > size {
            return Err(MatCoreError::TooManyDiagonalValues {
                count: diag.len(),
                rows,
                cols,
            });
        }
        let mut values = vec![0.0; size];
        values[..diag.len()].copy_from_slice(diag);
        Ok(Self {
            rows,
            cols,
            diag: values,
        })
    }

    /// Square identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            diag: vec![1.0; size],
        }
    }

    /// The stored main diagonal.
    pub fn diagonal(&self) -> &[f64] {
        &self.diag
    }
}

#[derive(Deserialize)]
struct SparseDiagMatrixRaw {
    rows: usize,
    cols: usize,
    diag: Vec<f64>,
}

/// Goes through [`SparseDiagMatrix::try_new`], so a short diagonal is padded
/// and a long one rejected.
impl<'de> Deserialize<'de> for SparseDiagMatrix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = SparseDiagMatrixRaw::deserialize(deserializer)?;
        Self::try_new(raw.rows, raw.cols, &raw.diag).map_err(de::Error::custom)
    }
}

impl Matrix for SparseDiagMatrix {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn item(&self, row: usize, col: usize) -> f64 {
        if let Err(err) = check_index(self.dims(), row, col) {
            panic!("{err}");
        }
        if row == col {
            self.diag[row]
        } else {
            0.0
        }
    }

    fn row(&self, row: usize) -> Cow<'_, [f64]> {
        assert!(
            row < self.rows,
            "Row {} out of range for a {}x{} matrix",
            row,
            self.rows,
            self.cols
        );
        let mut values = vec![0.0; self.cols];
        if let Some(&value) = self.diag.get(row) {
            values[row] = value;
        }
        Cow::Owned(values)
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(usize, usize, f64)) {
        for (k, &value) in self.diag.iter().enumerate() {
            if value != 0.0 {
                f(k, k, value);
            }
        }
    }

    fn diag(&self) -> DenseMatrix {
        DenseMatrix::from_parts(self.diag.len(), 1, self.diag.clone())
    }

    fn sparse_diag(&self) -> SparseDiagMatrix {
        self.clone()
    }

    fn try_sparse_diag(&self) -> Result<SparseDiagMatrix> {
        Ok(self.clone())
    }
}

impl MatrixMut for SparseDiagMatrix {
    /// Off-diagonal cells only accept 0, which they already hold.
    fn try_set_item(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_index(self.dims(), row, col)?;
        if row == col {
            self.diag[row] = value;
        } else if value != 0.0 {
            return Err(MatCoreError::StructuralZero { row, col, value });
        }
        Ok(())
    }

    fn try_set_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        check_line(self.dims(), row, values.len(), Line::Row)?;
        if let Some((col, &value)) = values
            .iter()
            .enumerate()
            .find(|&(col, &value)| col != row && value != 0.0)
        {
            return Err(MatCoreError::StructuralZero { row, col, value });
        }
        if row < self.diag.len() {
            self.diag[row] = values[row];
        }
        Ok(())
    }

    fn try_set_col(&mut self, col: usize, values: &[f64]) -> Result<()> {
        check_line(self.dims(), col, values.len(), Line::Col)?;
        if let Some((row, &value)) = values
            .iter()
            .enumerate()
            .find(|&(row, &value)| row != col && value != 0.0)
        {
            return Err(MatCoreError::StructuralZero { row, col, value });
        }
        if col < self.diag.len() {
            self.diag[col] = values[col];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{MatCoreError, Matrix, MatrixMut, SparseDiagMatrix};

    #[test]
    fn test_sparse_diag_pads_with_zeros() {
        let matrix = SparseDiagMatrix::new(3, 4, &[1.0, 2.0]);
        assert_eq!(matrix.diagonal(), &[1.0, 2.0, 0.0]);
        assert_eq!(matrix.item(1, 1), 2.0);
        assert_eq!(matrix.item(1, 2), 0.0);
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.row(0).as_ref(), &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(matrix.col(3).as_ref(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sparse_diag_too_many_values() {
        let err = SparseDiagMatrix::try_new(2, 3, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            MatCoreError::TooManyDiagonalValues {
                count: 3,
                rows: 2,
                cols: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "Can't use 3 diag elements in a 2x3 matrix")]
    fn test_sparse_diag_too_many_values_panics() {
        SparseDiagMatrix::new(2, 3, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_identity() {
        let eye = SparseDiagMatrix::identity(3);
        assert!(eye.is_square());
        assert_eq!(eye.to_vec(), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "Can't set off-diagonal element (0, 1)")]
    fn test_sparse_diag_off_diagonal_write_panics() {
        let mut matrix = SparseDiagMatrix::identity(2);
        matrix.set_item(0, 1, 3.0);
    }

    #[test]
    fn test_sparse_diag_writes() {
        let mut matrix = SparseDiagMatrix::identity(3);
        matrix.set_item(2, 2, 7.0);
        matrix.set_item(2, 0, 0.0);
        matrix.set_row(0, &[4.0, 0.0, 0.0]);
        assert_eq!(matrix.diagonal(), &[4.0, 1.0, 7.0]);

        let err = matrix.try_set_col(1, &[0.0, 5.0, 6.0]).unwrap_err();
        assert!(matches!(err, MatCoreError::StructuralZero { row: 2, col: 1, .. }));
        // Rejected writes leave the matrix untouched.
        assert_eq!(matrix.diagonal(), &[4.0, 1.0, 7.0]);
    }

    #[test]
    fn test_sparse_diag_to_coo_and_back() {
        let matrix = SparseDiagMatrix::new(2, 2, &[3.0, 0.0]);
        let coo = matrix.sparse_coo();
        assert_eq!(coo.nnz(), 1);
        assert_eq!(coo.sparse_diag(), matrix);
    }

    #[test]
    fn test_sparse_diag_column() {
        let diag = SparseDiagMatrix::new(3, 3, &[1.0, 2.0, 3.0]).diag();
        assert_eq!(diag.dims(), (3, 1));
        assert_eq!(diag.data(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sparse_diag_serde_validates() {
        let short: SparseDiagMatrix =
            serde_json::from_str(r#"{"rows":2,"cols":2,"diag":[1.0]}"#).unwrap();
        assert_eq!(short.diagonal(), &[1.0, 0.0]);
        assert_eq!(short.item(1, 1), 0.0);

        let err = serde_json::from_str::<SparseDiagMatrix>(r#"{"rows":1,"cols":3,"diag":[1.0,2.0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Can't use 2 diag elements in a 1x3 matrix"));

        let eye = SparseDiagMatrix::identity(2);
        let back: SparseDiagMatrix = serde_json::from_str(&serde_json::to_string(&eye).unwrap()).unwrap();
        assert_eq!(back, eye);
    }
}
