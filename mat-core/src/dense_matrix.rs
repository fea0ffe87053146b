use std::borrow::Cow;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{MatCoreError, Result};
use crate::traits::{check_index, check_line, Line, Matrix, MatrixMut};

/// Represents a dense matrix stored in row-major order on the CPU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // Data stored row-major: data[row * cols + col]
}

impl DenseMatrix {
    /// Creates a new DenseMatrix from raw data, dimensions, assuming row-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatCoreError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Caller guarantees `data.len() == rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Creates a new DenseMatrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::with_value(0.0, rows, cols)
    }

    /// Creates a new DenseMatrix with every cell set to `value`.
    pub fn with_value(value: f64, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates a DenseMatrix from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatCoreError::InvalidDimensions(format!(
                    "Row {} has {} values; expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_parts(rows.len(), cols, data))
    }

    /// Returns a slice view of the underlying data vector.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Gets the element at the specified row and column (immutable).
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Live mutable view of one row.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        assert!(
            row < self.rows,
            "Row {} out of range for a {}x{} matrix",
            row,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }
}

#[derive(Deserialize)]
struct DenseMatrixRaw {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl<'de> Deserialize<'de> for DenseMatrix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = DenseMatrixRaw::deserialize(deserializer)?;
        Self::new(raw.rows, raw.cols, raw.data).map_err(de::Error::custom)
    }
}

impl Matrix for DenseMatrix {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn item(&self, row: usize, col: usize) -> f64 {
        match self.get(row, col) {
            Some(&value) => value,
            None => panic!(
                "Index ({}, {}) out of bounds for a {}x{} matrix",
                row, col, self.rows, self.cols
            ),
        }
    }

    /// Borrowed view into the backing buffer; no copy is made.
    fn row(&self, row: usize) -> Cow<'_, [f64]> {
        assert!(
            row < self.rows,
            "Row {} out of range for a {}x{} matrix",
            row,
            self.rows,
            self.cols
        );
        Cow::Borrowed(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Columns are strided, so this is always a copy.
    fn col(&self, col: usize) -> Cow<'_, [f64]> {
        assert!(
            col < self.cols,
            "Column {} out of range for a {}x{} matrix",
            col,
            self.rows,
            self.cols
        );
        Cow::Owned(self.data.iter().skip(col).step_by(self.cols).copied().collect())
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(usize, usize, f64)) {
        for (flat, &value) in self.data.iter().enumerate() {
            if value != 0.0 {
                f(flat / self.cols, flat % self.cols, value);
            }
        }
    }

    fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    fn to_dense(&self) -> DenseMatrix {
        self.clone()
    }
}

impl MatrixMut for DenseMatrix {
    fn try_set_item(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_index(self.dims(), row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    fn try_set_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        check_line(self.dims(), row, values.len(), Line::Row)?;
        self.row_mut(row).copy_from_slice(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::{DenseMatrix, MatCoreError, Matrix, MatrixMut};

    fn sample() -> DenseMatrix {
        // [ 1.0, 2.0, 3.0 ]
        // [ 4.0, 5.0, 6.0 ]
        DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    fn test_dense_matrix_new_checks_length() {
        let matrix = DenseMatrix::new(2, 2, vec![1.0, 2.0, 3.0]);
        match matrix.err().unwrap() {
            MatCoreError::InvalidDimensions(msg) => assert!(msg.contains("Data length (3)")),
            _ => panic!("Expected InvalidDimensions error"),
        }
    }

    #[test]
    fn test_dense_matrix_item_row_major() {
        let matrix = sample();
        assert_eq!(matrix.dims(), (2, 3));
        assert_eq!(matrix.item(0, 2), 3.0);
        assert_eq!(matrix.item(1, 0), 4.0);
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.nnz(), 6);
    }

    #[test]
    fn test_dense_row_is_a_view_and_col_a_copy() {
        let matrix = sample();
        assert!(matches!(matrix.row(1), Cow::Borrowed(_)));
        assert_eq!(matrix.row(1).as_ref(), &[4.0, 5.0, 6.0]);
        assert_eq!(matrix.col(1).as_ref(), &[2.0, 5.0]);
        assert!(matches!(matrix.col(1), Cow::Owned(_)));
    }

    #[test]
    fn test_dense_setters() {
        let mut matrix = DenseMatrix::zeros(2, 3);
        matrix.set_item(1, 2, 9.0);
        matrix.set_row(0, &[1.0, 2.0, 3.0]);
        matrix.set_col(1, &[7.0, 8.0]);
        assert_eq!(matrix.data(), &[1.0, 7.0, 3.0, 0.0, 8.0, 9.0]);

        matrix.row_mut(1)[0] = -1.0;
        assert_eq!(matrix.item(1, 0), -1.0);
    }

    #[test]
    fn test_dense_set_row_wrong_length() {
        let mut matrix = DenseMatrix::zeros(2, 3);
        assert!(matches!(
            matrix.try_set_row(0, &[1.0, 2.0]),
            Err(MatCoreError::InvalidDimensions(_))
        ));
        assert_eq!(matrix.nnz(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_dense_set_item_out_of_bounds() {
        let mut matrix = DenseMatrix::zeros(2, 2);
        matrix.set_item(2, 0, 1.0);
    }

    #[test]
    fn test_dense_from_rows() {
        let matrix = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.data(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn test_dense_diag_is_a_column() {
        let diag = sample().diag();
        assert_eq!(diag.dims(), (2, 1));
        assert_eq!(diag.data(), &[1.0, 5.0]);
    }

    #[test]
    fn test_dense_serde_round_trip() {
        let matrix = sample();
        let json = serde_json::to_string(&matrix).unwrap();
        let back: DenseMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
    }

    #[test]
    fn test_dense_serde_rejects_wrong_length() {
        let err = serde_json::from_str::<DenseMatrix>(r#"{"rows":2,"cols":2,"data":[1.0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Data length (1)"));
    }
}
