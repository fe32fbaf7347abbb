//! Elementwise binary operations.
//!
//! Every pass walks the canonical index range of the output: `out[i] =
//! op(a.at(i), b.at(i))`. Because `at` resolves through the linear index
//! cache, transposed operands need no special handling. The output is always
//! a fresh row-major array, so canonical index `i` is also buffer slot `i`,
//! which is what lets the parallel path hand out disjoint output slices.

use std::borrow::Cow;

use crate::array::Array;
use crate::broadcast::{broadcast_shapes, broadcast_to};
use crate::threading::{chunk_ranges, for_each_chunk, ParallelPolicy};
use crate::unary::negate;
use crate::{NdError, Result};

/// Apply `op` to every pair of elements of two equally shaped arrays.
///
/// No broadcasting is performed. The pass runs in parallel when `policy`
/// says so for `a.totalsize()` elements; both paths produce bit-identical
/// results.
///
/// # Errors
/// Returns [`NdError::ShapeMismatch`] if the shapes differ.
pub fn binary_op<F>(a: &Array, b: &Array, op: F, policy: &ParallelPolicy) -> Result<Array>
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    if a.shape() != b.shape() {
        return Err(NdError::ShapeMismatch(
            a.shape().to_vec(),
            b.shape().to_vec(),
        ));
    }

    let total = a.totalsize();
    if policy.should_parallelize(total) {
        log::debug!(
            "parallel elementwise pass: {} elements, {} chunks",
            total,
            policy.num_chunks
        );
        parallel_binary_op(a, b, &op, policy.num_chunks)
    } else {
        log::debug!("serial elementwise pass: {} elements", total);
        serial_binary_op(a, b, &op)
    }
}

fn serial_binary_op<F>(a: &Array, b: &Array, op: &F) -> Result<Array>
where
    F: Fn(f32, f32) -> f32,
{
    let mut res = Array::from_shape(a.shape())?;
    for i in 0..res.totalsize() {
        res.set(i, op(a.at(i), b.at(i)));
    }
    Ok(res)
}

fn parallel_binary_op<F>(a: &Array, b: &Array, op: &F, num_chunks: usize) -> Result<Array>
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    let mut res = Array::from_shape(a.shape())?;
    debug_assert!(res.is_contiguous());
    let ranges = chunk_ranges(res.totalsize(), num_chunks);
    for_each_chunk(res.data_mut(), &ranges, &|range, chunk| {
        for (slot, i) in chunk.iter_mut().zip(range) {
            *slot = op(a.at(i), b.at(i));
        }
    });
    Ok(res)
}

/// Bring two arrays to a common shape, materializing broadcasts if needed.
fn unify<'a>(a: &'a Array, b: &'a Array) -> Result<(Cow<'a, Array>, Cow<'a, Array>)> {
    if a.shape() == b.shape() {
        return Ok((Cow::Borrowed(a), Cow::Borrowed(b)));
    }
    let shape = broadcast_shapes(a.shape(), b.shape())?;
    log::debug!(
        "broadcasting {:?} and {:?} to {:?}",
        a.shape(),
        b.shape(),
        shape
    );
    let a = if a.shape() == shape.as_slice() {
        Cow::Borrowed(a)
    } else {
        Cow::Owned(broadcast_to(a, &shape)?)
    };
    let b = if b.shape() == shape.as_slice() {
        Cow::Borrowed(b)
    } else {
        Cow::Owned(broadcast_to(b, &shape)?)
    };
    Ok((a, b))
}

/// Elementwise `a + b` with broadcasting, using the default [`ParallelPolicy`].
///
/// # Errors
/// Returns [`NdError::BroadcastIncompatible`] if the shapes cannot be unified.
pub fn add(a: &Array, b: &Array) -> Result<Array> {
    add_with(a, b, &ParallelPolicy::default())
}

/// Elementwise `a + b` with broadcasting and an explicit policy.
pub fn add_with(a: &Array, b: &Array, policy: &ParallelPolicy) -> Result<Array> {
    let (a, b) = unify(a, b)?;
    binary_op(&a, &b, |x, y| x + y, policy)
}

/// Elementwise `a * b` with broadcasting, using the default [`ParallelPolicy`].
///
/// # Errors
/// Returns [`NdError::BroadcastIncompatible`] if the shapes cannot be unified.
pub fn multiply(a: &Array, b: &Array) -> Result<Array> {
    multiply_with(a, b, &ParallelPolicy::default())
}

/// Elementwise `a * b` with broadcasting and an explicit policy.
pub fn multiply_with(a: &Array, b: &Array, policy: &ParallelPolicy) -> Result<Array> {
    let (a, b) = unify(a, b)?;
    binary_op(&a, &b, |x, y| x * y, policy)
}

/// Elementwise `a - b`, computed as `a + negate(b)`.
///
/// # Errors
/// Returns [`NdError::BroadcastIncompatible`] if the shapes cannot be unified.
pub fn subtract(a: &Array, b: &Array) -> Result<Array> {
    subtract_with(a, b, &ParallelPolicy::default())
}

/// Elementwise `a - b` with an explicit policy.
pub fn subtract_with(a: &Array, b: &Array, policy: &ParallelPolicy) -> Result<Array> {
    add_with(a, &negate(b), policy)
}
