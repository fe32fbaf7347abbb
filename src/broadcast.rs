//! NumPy-style broadcasting.
//!
//! Shapes are compared right-aligned; a missing leading axis behaves like an
//! axis of extent 1, and an axis of extent 1 stretches to match the other
//! side. [`broadcast_to`] materializes an array into the unified shape one
//! output coordinate at a time.

use crate::array::Array;
use crate::{NdError, Result};

/// Compute the broadcast shape of two shapes.
///
/// # Errors
/// Returns [`NdError::BroadcastIncompatible`] when an axis pair differs and
/// neither extent is 1.
///
/// # Example
/// ```rust
/// use strided_ndarray::broadcast_shapes;
///
/// assert_eq!(broadcast_shapes(&[3, 1], &[2]).unwrap(), vec![3, 2]);
/// assert!(broadcast_shapes(&[2, 3], &[4]).is_err());
/// ```
pub fn broadcast_shapes(left: &[usize], right: &[usize]) -> Result<Vec<usize>> {
    if left == right {
        return Ok(left.to_vec());
    }

    let max_rank = left.len().max(right.len());
    let mut result = vec![0usize; max_rank];

    for i in 0..max_rank {
        let l_dim = if i < left.len() {
            left[left.len() - 1 - i]
        } else {
            1
        };
        let r_dim = if i < right.len() {
            right[right.len() - 1 - i]
        } else {
            1
        };

        if l_dim == r_dim || r_dim == 1 {
            result[max_rank - 1 - i] = l_dim;
        } else if l_dim == 1 {
            result[max_rank - 1 - i] = r_dim;
        } else {
            return Err(NdError::BroadcastIncompatible(
                left.to_vec(),
                right.to_vec(),
            ));
        }
    }

    Ok(result)
}

/// Check if an array of `shape` can be broadcast to `target`.
pub fn can_broadcast_to(shape: &[usize], target: &[usize]) -> bool {
    if target.len() < shape.len() {
        return false;
    }

    let offset = target.len() - shape.len();
    shape
        .iter()
        .zip(&target[offset..])
        .all(|(&old_dim, &new_dim)| old_dim == new_dim || old_dim == 1)
}

/// Materialize `array` into the broadcast shape `target`.
///
/// For each output coordinate, source axes of extent 1 read coordinate 0,
/// other source axes read the matching output coordinate through the source
/// strides, and leading output axes absent from the source are ignored. The
/// source may be non-contiguous.
///
/// # Errors
/// Returns [`NdError::BroadcastIncompatible`] if `array` cannot be broadcast
/// to `target`, or [`NdError::InvalidShape`] if `target` is not a valid shape.
pub fn broadcast_to(array: &Array, target: &[usize]) -> Result<Array> {
    if !can_broadcast_to(array.shape(), target) {
        return Err(NdError::BroadcastIncompatible(
            array.shape().to_vec(),
            target.to_vec(),
        ));
    }

    let mut res = Array::from_shape(target)?;
    let n_prepend = target.len() - array.ndim();
    let src_shape = array.shape();
    let src_strides = array.strides();
    let src_data = array.data();
    let itemsize = array.itemsize() as isize;

    log::trace!(
        "broadcast {:?} (strides {:?}) -> {:?}",
        src_shape,
        src_strides,
        target
    );

    for i in 0..res.totalsize() {
        let coords = &res.indices().indices[i];
        let mut src_offset = 0isize;
        for dim in 0..src_shape.len() {
            if src_shape[dim] > 1 {
                src_offset += coords[n_prepend + dim] as isize * src_strides[dim];
            }
        }
        let value = src_data[(src_offset / itemsize) as usize];
        res.set(i, value);
    }

    Ok(res)
}
