//! Reshape and transpose.
//!
//! A transpose never moves data after its one verbatim copy of the source
//! buffer: it permutes the source strides, and the recomputed linear indices
//! make canonical element `i` resolve to the transposed position.

use crate::array::Array;
use crate::index::is_permutation;
use crate::layout::{row_major_strides, shape_size};
use crate::{NdError, Result};

impl Array {
    /// Return a new contiguous array of `shape` holding the same values in
    /// canonical order.
    ///
    /// # Errors
    /// Returns [`NdError::ShapeIncompatible`] if `shape` has a different total
    /// size, or [`NdError::InvalidShape`] if `shape` is not a valid shape.
    pub fn reshape(&self, shape: &[usize]) -> Result<Array> {
        if shape_size(shape) != Some(self.totalsize()) {
            return Err(NdError::ShapeIncompatible(
                self.shape().to_vec(),
                shape.to_vec(),
            ));
        }
        Array::from_vec(shape, self.to_vec())
    }

    /// Reshape without reallocating the buffer.
    ///
    /// The new shape must have the same total size and the same rank. A
    /// non-contiguous array (e.g. a transpose) is first compacted into
    /// canonical order inside its own buffer, so the element sequence seen by
    /// [`Array::at`] is unchanged.
    ///
    /// # Errors
    /// Returns [`NdError::ShapeIncompatible`] on a size or rank change.
    pub fn reshape_in_place(&mut self, shape: &[usize]) -> Result<()> {
        if shape_size(shape) != Some(self.totalsize()) || shape.len() != self.ndim() {
            return Err(NdError::ShapeIncompatible(
                self.shape().to_vec(),
                shape.to_vec(),
            ));
        }
        if !self.is_contiguous() {
            let values = self.to_vec();
            self.data_mut().copy_from_slice(&values);
        }
        let strides = row_major_strides(shape, self.itemsize());
        self.set_layout(shape.to_vec(), strides);
        Ok(())
    }

    /// Permute the axes of the array.
    ///
    /// `axes[i]` names the source axis that becomes axis `i`; `None` reverses
    /// all axes. The result owns a verbatim copy of the source buffer whose
    /// shape and strides are the permuted source ones.
    ///
    /// # Errors
    /// Returns [`NdError::InvalidPermutation`] if `axes` is not a permutation
    /// of `0..ndim`.
    pub fn transpose(&self, axes: Option<&[usize]>) -> Result<Array> {
        let ndim = self.ndim();
        let perm: Vec<usize> = match axes {
            Some(axes) => {
                if !is_permutation(axes, ndim) {
                    return Err(NdError::InvalidPermutation {
                        axes: axes.to_vec(),
                        ndim,
                    });
                }
                axes.to_vec()
            }
            None => (0..ndim).rev().collect(),
        };

        let mut res = Array::from_shape(self.shape())?;
        res.data_mut().copy_from_slice(self.data());
        if ndim == 1 {
            res.set_layout(self.shape().to_vec(), self.strides().to_vec());
            return Ok(res);
        }

        let new_shape: Vec<usize> = perm.iter().map(|&p| self.shape()[p]).collect();
        let new_strides: Vec<isize> = perm.iter().map(|&p| self.strides()[p]).collect();
        res.set_layout(new_shape, new_strides);
        Ok(res)
    }
}
