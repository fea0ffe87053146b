//! Row-major mapping between flat offsets and n-dimensional coordinates.
//!
//! The last dimension varies fastest, so for a `[rows, cols]` shape the flat
//! offset of `(i, j)` is `i * cols + j`.

/// Number of elements described by `shape`.
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Converts a flat row-major offset into a coordinate for `shape`.
///
/// # Panics
///
/// Panics if `flat >= numel(shape)`.
#[track_caller]
pub fn flat_to_nd(shape: &[usize], flat: usize) -> Vec<usize> {
    let size = numel(shape);
    assert!(
        flat < size,
        "Flat index {} out of range for shape {:?} ({} elements)",
        flat,
        shape,
        size
    );
    let mut coord = vec![0; shape.len()];
    let mut rest = flat;
    for (axis, &extent) in shape.iter().enumerate().rev() {
        coord[axis] = rest % extent;
        rest /= extent;
    }
    coord
}

/// Converts a coordinate into its flat row-major offset; the inverse of
/// [`flat_to_nd`].
///
/// # Panics
///
/// Panics on a rank mismatch or when any component is out of range.
#[track_caller]
pub fn nd_to_flat(shape: &[usize], coord: &[usize]) -> usize {
    assert_eq!(
        shape.len(),
        coord.len(),
        "Coordinate {:?} has the wrong rank for shape {:?}",
        coord,
        shape
    );
    let mut flat = 0;
    for (&index, &extent) in coord.iter().zip(shape) {
        assert!(
            index < extent,
            "Coordinate {:?} out of range for shape {:?}",
            coord,
            shape
        );
        flat = flat * extent + index;
    }
    flat
}

/// Rank-2 shorthand for [`flat_to_nd`]: returns `(row, col)`.
#[track_caller]
pub fn flat_to_2d(rows: usize, cols: usize, flat: usize) -> (usize, usize) {
    let coord = flat_to_nd(&[rows, cols], flat);
    (coord[0], coord[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_to_nd_row_major() {
        assert_eq!(flat_to_nd(&[2, 3], 0), vec![0, 0]);
        assert_eq!(flat_to_nd(&[2, 3], 2), vec![0, 2]);
        assert_eq!(flat_to_nd(&[2, 3], 3), vec![1, 0]);
        assert_eq!(flat_to_nd(&[2, 3], 5), vec![1, 2]);
        assert_eq!(flat_to_nd(&[2, 3, 4], 23), vec![1, 2, 3]);
        assert_eq!(flat_to_nd(&[7], 4), vec![4]);
    }

    #[test]
    fn test_round_trip_is_identity() {
        let shapes: [&[usize]; 5] = [&[1], &[5], &[3, 4], &[4, 1], &[2, 3, 5]];
        for shape in shapes {
            for flat in 0..numel(shape) {
                let coord = flat_to_nd(shape, flat);
                assert_eq!(nd_to_flat(shape, &coord), flat, "shape {:?}", shape);
            }
        }
    }

    #[test]
    fn test_nd_to_flat_matches_dense_layout() {
        let (rows, cols) = (3, 4);
        for i in 0..rows {
            for j in 0..cols {
                assert_eq!(nd_to_flat(&[rows, cols], &[i, j]), i * cols + j);
                assert_eq!(flat_to_2d(rows, cols, i * cols + j), (i, j));
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_flat_to_nd_out_of_range() {
        flat_to_nd(&[2, 2], 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_flat_to_nd_empty_shape() {
        flat_to_nd(&[0, 3], 0);
    }

    #[test]
    #[should_panic(expected = "wrong rank")]
    fn test_nd_to_flat_rank_mismatch() {
        nd_to_flat(&[2, 2], &[1]);
    }
}
