//! Shape and stride arithmetic.
//!
//! Strides are byte strides: the innermost axis of a row-major array steps by
//! the element size, each outer axis by the inner stride times the inner
//! extent. Backstrides undo a full traversal of an axis.

use crate::{NdError, Result, ITEMSIZE};

/// Largest element count whose byte extent still fits an `isize` stride.
pub const MAX_ELEMENTS: usize = isize::MAX as usize / ITEMSIZE;

/// Check that a shape has at least one axis, no zero extent and an
/// addressable size; returns the element count.
pub fn validate_shape(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() || shape.contains(&0) {
        return Err(NdError::InvalidShape(shape.to_vec()));
    }
    match shape_size(shape) {
        Some(size) if size <= MAX_ELEMENTS => Ok(size),
        _ => Err(NdError::InvalidShape(shape.to_vec())),
    }
}

/// Total number of elements described by a shape, or `None` on overflow.
#[inline]
pub fn shape_size(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Compute row-major (C order) byte strides: last index varies fastest.
pub fn row_major_strides(shape: &[usize], itemsize: usize) -> Vec<isize> {
    let rank = shape.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![itemsize as isize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    strides
}

/// Compute column-major (Fortran order) byte strides: first index varies fastest.
pub fn col_major_strides(shape: &[usize], itemsize: usize) -> Vec<isize> {
    let rank = shape.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![itemsize as isize; rank];
    for i in 1..rank {
        strides[i] = strides[i - 1] * shape[i - 1] as isize;
    }
    strides
}

/// Offsets that return to the start of each axis after traversing it fully.
///
/// `backstrides[i] = -strides[i] * (shape[i] - 1)`
pub fn backstrides(shape: &[usize], strides: &[isize]) -> Vec<isize> {
    debug_assert_eq!(shape.len(), strides.len());
    shape
        .iter()
        .zip(strides.iter())
        .map(|(&dim, &stride)| -stride * (dim as isize - 1))
        .collect()
}

/// Layout flags `(c_order, f_order)`.
///
/// An array is flagged C-ordered when its innermost axis has unit (one
/// element) stride and F-ordered when its outermost axis does.
pub fn order_flags(strides: &[isize], itemsize: usize) -> (bool, bool) {
    match (strides.first(), strides.last()) {
        (Some(&first), Some(&last)) => (last == itemsize as isize, first == itemsize as isize),
        _ => (false, false),
    }
}

/// Check whether strides describe a dense row-major layout of `shape`.
pub fn is_row_major_contiguous(shape: &[usize], strides: &[isize], itemsize: usize) -> bool {
    let mut expected = itemsize as isize;
    for i in (0..shape.len()).rev() {
        if shape[i] <= 1 {
            continue;
        }
        if strides[i] != expected {
            return false;
        }
        expected *= shape[i] as isize;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_shape() {
        assert_eq!(validate_shape(&[2, 3]), Ok(6));
        assert_eq!(validate_shape(&[]), Err(NdError::InvalidShape(vec![])));
        assert_eq!(
            validate_shape(&[2, 0, 3]),
            Err(NdError::InvalidShape(vec![2, 0, 3]))
        );
    }

    #[test]
    fn test_validate_shape_overflow() {
        let huge = [usize::MAX / 2 + 2, 2];
        assert_eq!(shape_size(&huge), None);
        assert_eq!(
            validate_shape(&huge),
            Err(NdError::InvalidShape(huge.to_vec()))
        );
        // Fits in usize but not in isize bytes
        assert_eq!(
            validate_shape(&[MAX_ELEMENTS + 1]),
            Err(NdError::InvalidShape(vec![MAX_ELEMENTS + 1]))
        );
        assert_eq!(shape_size(&[3, 4, 5]), Some(60));
    }

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[3, 4], 4), vec![16, 4]);
        assert_eq!(row_major_strides(&[2, 3, 4], 4), vec![48, 16, 4]);
        assert_eq!(row_major_strides(&[5], 4), vec![4]);
    }

    #[test]
    fn test_col_major_strides() {
        assert_eq!(col_major_strides(&[3, 4], 4), vec![4, 12]);
        assert_eq!(col_major_strides(&[2, 3, 4], 4), vec![4, 8, 24]);
    }

    #[test]
    fn test_backstrides() {
        let strides = row_major_strides(&[2, 4, 2], 4);
        assert_eq!(backstrides(&[2, 4, 2], &strides), vec![-32, -24, -4]);
        // A unit axis never moves.
        assert_eq!(backstrides(&[1, 3], &[12, 4]), vec![0, -8]);
    }

    #[test]
    fn test_order_flags() {
        assert_eq!(order_flags(&[16, 4], 4), (true, false));
        assert_eq!(order_flags(&[4, 12], 4), (false, true));
        // 1-D arrays are both.
        assert_eq!(order_flags(&[4], 4), (true, true));
    }

    #[test]
    fn test_is_row_major_contiguous() {
        assert!(is_row_major_contiguous(&[2, 3], &[12, 4], 4));
        assert!(!is_row_major_contiguous(&[2, 3], &[4, 8], 4));
        // Unit axes are ignored.
        assert!(is_row_major_contiguous(&[1, 3], &[99, 4], 4));
    }
}
