use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{MatCoreError, Result};
use crate::shape::{flat_to_2d, numel};
use crate::traits::{check_index, Matrix, MatrixMut};

/// Represents a sparse matrix in coordinate format on the CPU.
///
/// Each row owns an ordered map from column index to value. Only nonzero
/// values are stored: writing 0 to a cell removes its entry, so a missing key
/// and a stored value always agree on what the cell holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparseCooMatrix {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// One `column -> value` map per row.
    values: Vec<BTreeMap<usize, f64>>,
}

impl SparseCooMatrix {
    /// Creates a new empty (all-zero) SparseCooMatrix with given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        SparseCooMatrix {
            rows,
            cols,
            values: vec![BTreeMap::new(); rows],
        }
    }

    /// Creates a SparseCooMatrix whose first `array.len()` cells, in row-major
    /// order, take the nonzero values of `array`. Zero literals are skipped.
    ///
    /// # Panics
    ///
    /// Panics if `array` holds more values than the matrix has cells.
    pub fn from_literal(rows: usize, cols: usize, array: &[f64]) -> Self {
        crate::error::fatal(Self::try_from_literal(rows, cols, array))
    }

    /// Fallible form of [`SparseCooMatrix::from_literal`].
    pub fn try_from_literal(rows: usize, cols: usize, array: &[f64]) -> Result<Self> {
        let size = numel(&[rows, cols]);
        if array.len() > size {
            return Err(MatCoreError::InvalidDimensions(format!(
                "Can't use {} literal values in a {}x{} matrix",
                array.len(),
                rows,
                cols
            )));
        }
        let mut matrix = Self::new(rows, cols);
        for (flat, &value) in array.iter().enumerate() {
            if value != 0.0 {
                let (row, col) = flat_to_2d(rows, cols, flat);
                matrix.values[row].insert(col, value);
            }
        }
        Ok(matrix)
    }

    /// Builds a matrix from `(row, col, value)` triplets. A later triplet for
    /// the same cell overwrites an earlier one.
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = Triplet>,
    {
        let mut matrix = Self::new(rows, cols);
        for Triplet { row, col, value } in triplets {
            matrix.try_set_item(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Gets the value at a specific row and column.
    /// Returns None for cells that hold no entry and for out-of-bounds indices.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(&col).copied()
    }

    /// Stored entries of one row, keyed by column.
    pub fn row_entries(&self, row: usize) -> &BTreeMap<usize, f64> {
        &self.values[row]
    }

    /// Iterates over the stored entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Triplet> + '_ {
        self.values.iter().enumerate().flat_map(|(row, entries)| {
            entries
                .iter()
                .map(move |(&col, &value)| Triplet { row, col, value })
        })
    }
}

/// One stored cell of a coordinate-format matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    row: usize,
    col: usize,
    value: f64,
}

impl Triplet {
    pub fn new(row: usize, col: usize, value: f64) -> Self {
        Triplet { row, col, value }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Deserialize)]
struct SparseCooMatrixRaw {
    rows: usize,
    cols: usize,
    values: Vec<BTreeMap<usize, f64>>,
}

impl SparseCooMatrixRaw {
    /// Drops stored zeros and rejects entries outside the matrix.
    fn validate(self) -> Result<SparseCooMatrix> {
        if self.values.len() != self.rows {
            return Err(MatCoreError::InvalidDimensions(format!(
                "Expected {} row maps, found {}",
                self.rows,
                self.values.len()
            )));
        }
        let mut matrix = SparseCooMatrix::new(self.rows, self.cols);
        for (row, entries) in self.values.into_iter().enumerate() {
            for (col, value) in entries {
                matrix.try_set_item(row, col, value)?;
            }
        }
        Ok(matrix)
    }
}

impl<'de> Deserialize<'de> for SparseCooMatrix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = SparseCooMatrixRaw::deserialize(deserializer)?;
        raw.validate().map_err(de::Error::custom)
    }
}

impl Matrix for SparseCooMatrix {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn item(&self, row: usize, col: usize) -> f64 {
        if let Err(err) = check_index(self.dims(), row, col) {
            panic!("{err}");
        }
        self.get(row, col).unwrap_or(0.0)
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(usize, usize, f64)) {
        for triplet in self.iter() {
            f(triplet.row, triplet.col, triplet.value);
        }
    }

    fn nnz(&self) -> usize {
        self.values.iter().map(BTreeMap::len).sum()
    }

    fn sparse_coo(&self) -> SparseCooMatrix {
        self.clone()
    }
}

impl MatrixMut for SparseCooMatrix {
    /// Setting a cell to 0 removes its entry.
    fn try_set_item(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_index(self.dims(), row, col)?;
        if value == 0.0 {
            self.values[row].remove(&col);
        } else {
            self.values[row].insert(col, value);
        }
        Ok(())
    }
}
