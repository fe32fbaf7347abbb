//! Batched matrix multiplication.
//!
//! Operands are stacks of matrices: the trailing two axes are the matrix, the
//! leading "batch" axes are broadcast against each other. Offsets are computed
//! from strides, so transposed operands are multiplied without a copy.

use crate::array::Array;
use crate::broadcast::broadcast_shapes;
use crate::index::MultiIndex;
use crate::{NdError, Result};

/// Matrix product over the trailing two axes: `(..., m, n) @ (..., n, p)`.
///
/// The batch axes are unified by broadcasting and the result has shape
/// `batch ++ [m, p]`. Each batch coordinate maps onto an operand
/// right-aligned; batch axes of extent 1 (or absent) repeat the operand's only
/// matrix along that axis. Accumulation is plain `f32` addition in `k` order.
///
/// # Errors
/// Returns [`NdError::ShapeMismatch`] if either operand has fewer than two
/// axes or the inner dimensions disagree, and
/// [`NdError::BroadcastIncompatible`] if the batch axes cannot be unified.
///
/// # Example
/// ```rust
/// use strided_ndarray::{matmul, Array};
///
/// let a = Array::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Array::from_vec(&[2, 1], vec![1.0, 1.0]).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.shape(), &[2, 1]);
/// assert_eq!(c.to_vec(), vec![3.0, 7.0]);
/// ```
pub fn matmul(a: &Array, b: &Array) -> Result<Array> {
    let a_ndim = a.ndim();
    let b_ndim = b.ndim();
    if a_ndim < 2 || b_ndim < 2 || a.shape()[a_ndim - 1] != b.shape()[b_ndim - 2] {
        return Err(NdError::ShapeMismatch(
            a.shape().to_vec(),
            b.shape().to_vec(),
        ));
    }

    let m = a.shape()[a_ndim - 2];
    let n = a.shape()[a_ndim - 1];
    let p = b.shape()[b_ndim - 1];

    let a_batch_dims = &a.shape()[..a_ndim - 2];
    let b_batch_dims = &b.shape()[..b_ndim - 2];
    let batch_dims = broadcast_shapes(a_batch_dims, b_batch_dims)?;

    let mut out_shape = batch_dims.clone();
    out_shape.extend_from_slice(&[m, p]);
    let mut c = Array::from_shape(&out_shape)?;

    log::debug!(
        "matmul {:?} @ {:?} -> {:?}",
        a.shape(),
        b.shape(),
        out_shape
    );

    // Broadcast batch axes read with stride 0
    let a_batch_strides = batch_strides(a_batch_dims, &a.strides()[..a_ndim - 2], &batch_dims);
    let b_batch_strides = batch_strides(b_batch_dims, &b.strides()[..b_ndim - 2], &batch_dims);
    let c_batch_strides = c.strides()[..batch_dims.len()].to_vec();

    let (a_row, a_col) = (a.strides()[a_ndim - 2], a.strides()[a_ndim - 1]);
    let (b_row, b_col) = (b.strides()[b_ndim - 2], b.strides()[b_ndim - 1]);
    let (c_row, c_col) = (c.strides()[batch_dims.len()], c.strides()[batch_dims.len() + 1]);

    let a_data = a.data();
    let b_data = b.data();
    let a_item = a.itemsize() as isize;
    let b_item = b.itemsize() as isize;
    let c_item = c.itemsize() as isize;

    let mut batch_iter = MultiIndex::new(&batch_dims);
    while batch_iter.next().is_some() {
        let a_batch_off = batch_iter.offset(&a_batch_strides);
        let b_batch_off = batch_iter.offset(&b_batch_strides);
        let c_batch_off = batch_iter.offset(&c_batch_strides);

        for i in 0..m {
            for j in 0..p {
                let mut acc = 0.0f32;
                for k in 0..n {
                    let a_off = a_batch_off + i as isize * a_row + k as isize * a_col;
                    let b_off = b_batch_off + k as isize * b_row + j as isize * b_col;
                    acc += a_data[(a_off / a_item) as usize] * b_data[(b_off / b_item) as usize];
                }
                let c_off = c_batch_off + i as isize * c_row + j as isize * c_col;
                c.data_mut()[(c_off / c_item) as usize] = acc;
            }
        }
    }

    Ok(c)
}

/// Strides of an operand's batch axes expressed over the unified batch shape.
///
/// Operand axes are right-aligned with `batch_dims`; missing leading axes and
/// axes of extent 1 get stride 0.
fn batch_strides(dims: &[usize], strides: &[isize], batch_dims: &[usize]) -> Vec<isize> {
    let offset = batch_dims.len() - dims.len();
    let mut out = vec![0isize; batch_dims.len()];
    for (i, (&dim, &stride)) in dims.iter().zip(strides.iter()).enumerate() {
        if dim != 1 {
            out[offset + i] = stride;
        }
    }
    out
}
