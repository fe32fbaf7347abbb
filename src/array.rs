//! Owned n-dimensional array.

use crate::index::{enumerate, linear_indices, ArrayIndices, LinearIndices};
use crate::layout::{
    backstrides, is_row_major_contiguous, order_flags, row_major_strides, shape_size,
    validate_shape,
};
use crate::{NdError, Result, ITEMSIZE};

/// Owned n-dimensional array of `f32`.
///
/// The buffer is addressed through byte `strides`. Element `i` as seen by
/// [`Array::at`] and [`Array::set`] is the `i`-th coordinate in row-major
/// order, located in the buffer through the cached linear indices. Any change
/// to shape or strides recomputes backstrides, both index caches and the
/// order flags before control returns to the caller.
#[derive(Clone)]
pub struct Array {
    data: Vec<f32>,
    shape: Vec<usize>,
    strides: Vec<isize>,
    backstrides: Vec<isize>,
    ndim: usize,
    itemsize: usize,
    totalsize: usize,
    idxs: ArrayIndices,
    lidxs: LinearIndices,
    c_order: bool,
    f_order: bool,
}

impl std::fmt::Debug for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("c_order", &self.c_order)
            .field("f_order", &self.f_order)
            .finish()
    }
}

impl Array {
    /// Create a zero-filled row-major array.
    ///
    /// # Errors
    /// Returns [`NdError::InvalidShape`] if `shape` is empty or contains a zero.
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        let totalsize = validate_shape(shape)?;
        let strides = row_major_strides(shape, ITEMSIZE);
        let mut arr = Self {
            data: vec![0.0; totalsize],
            shape: shape.to_vec(),
            strides,
            backstrides: vec![],
            ndim: shape.len(),
            itemsize: ITEMSIZE,
            totalsize,
            idxs: ArrayIndices {
                indices: vec![],
                count: 0,
            },
            lidxs: LinearIndices {
                indices: vec![],
                count: 0,
            },
            c_order: false,
            f_order: false,
        };
        arr.refresh_layout();
        Ok(arr)
    }

    /// Create a row-major array holding `values` in canonical order.
    pub fn from_vec(shape: &[usize], values: Vec<f32>) -> Result<Self> {
        let mut arr = Self::from_shape(shape)?;
        if values.len() != arr.totalsize {
            return Err(NdError::SizeMismatch {
                expected: arr.totalsize,
                actual: values.len(),
            });
        }
        arr.data = values;
        Ok(arr)
    }

    /// Overwrite the buffer with `values`.
    ///
    /// The values are copied into the buffer as-is, in physical order; the
    /// layout is left untouched. For a row-major array this is canonical
    /// order, for a transposed one [`Array::to_vec`] reads them back permuted.
    ///
    /// # Errors
    /// Returns [`NdError::SizeMismatch`] if `values.len() != totalsize`.
    pub fn from_values(&mut self, values: &[f32]) -> Result<()> {
        if values.len() != self.totalsize {
            return Err(NdError::SizeMismatch {
                expected: self.totalsize,
                actual: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Get the `i`-th element in canonical row-major order.
    ///
    /// # Panics
    /// Panics if `i >= totalsize`.
    #[inline]
    pub fn at(&self, i: usize) -> f32 {
        self.data[self.lidxs.indices[i]]
    }

    /// Set the `i`-th element in canonical row-major order.
    ///
    /// # Panics
    /// Panics if `i >= totalsize`.
    #[inline]
    pub fn set(&mut self, i: usize, value: f32) {
        self.data[self.lidxs.indices[i]] = value;
    }

    /// Collect the elements in canonical row-major order.
    pub fn to_vec(&self) -> Vec<f32> {
        self.lidxs.indices.iter().map(|&l| self.data[l]).collect()
    }

    /// Returns the extent of each axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the byte stride of each axis.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Returns the byte backstride of each axis.
    #[inline]
    pub fn backstrides(&self) -> &[isize] {
        &self.backstrides
    }

    /// Returns the number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Returns the size in bytes of one element.
    #[inline]
    pub fn itemsize(&self) -> usize {
        self.itemsize
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn totalsize(&self) -> usize {
        self.totalsize
    }

    /// True when the innermost axis has unit stride.
    #[inline]
    pub fn is_c_order(&self) -> bool {
        self.c_order
    }

    /// True when the outermost axis has unit stride.
    #[inline]
    pub fn is_f_order(&self) -> bool {
        self.f_order
    }

    /// Check if the buffer is laid out densely in row-major order.
    pub fn is_contiguous(&self) -> bool {
        is_row_major_contiguous(&self.shape, &self.strides, self.itemsize)
    }

    /// Every coordinate of the array in row-major order.
    #[inline]
    pub fn indices(&self) -> &ArrayIndices {
        &self.idxs
    }

    /// Buffer offset of each coordinate in [`Array::indices`].
    #[inline]
    pub fn linear_indices(&self) -> &LinearIndices {
        &self.lidxs
    }

    /// Returns the underlying buffer in physical order.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Replace shape and strides, then recompute every derived field.
    ///
    /// The caller guarantees that the new layout addresses exactly the
    /// existing buffer.
    pub(crate) fn set_layout(&mut self, shape: Vec<usize>, strides: Vec<isize>) {
        debug_assert_eq!(shape.len(), strides.len());
        debug_assert_eq!(shape_size(&shape), Some(self.data.len()));
        self.ndim = shape.len();
        self.totalsize = self.data.len();
        self.shape = shape;
        self.strides = strides;
        self.refresh_layout();
    }

    fn refresh_layout(&mut self) {
        self.backstrides = backstrides(&self.shape, &self.strides);
        self.idxs = enumerate(&self.shape);
        self.lidxs = linear_indices(&self.idxs, &self.strides, self.itemsize);
        let (c_order, f_order) = order_flags(&self.strides, self.itemsize);
        self.c_order = c_order;
        self.f_order = f_order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::col_major_strides;

    #[test]
    fn test_from_shape() {
        let arr = Array::from_shape(&[2, 3, 4]).unwrap();
        assert_eq!(arr.shape(), &[2, 3, 4]);
        assert_eq!(arr.ndim(), 3);
        assert_eq!(arr.itemsize(), 4);
        assert_eq!(arr.totalsize(), 24);
        assert_eq!(arr.data().len(), 24);
        assert_eq!(arr.strides(), &[48, 16, 4]);
        assert_eq!(arr.backstrides(), &[-48, -32, -12]);
        assert!(arr.is_c_order());
        assert!(!arr.is_f_order());
        assert!(arr.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_shape_invalid() {
        assert_eq!(
            Array::from_shape(&[]).unwrap_err(),
            NdError::InvalidShape(vec![])
        );
        assert_eq!(
            Array::from_shape(&[3, 0]).unwrap_err(),
            NdError::InvalidShape(vec![3, 0])
        );
    }

    #[test]
    fn test_index_caches() {
        let arr = Array::from_shape(&[2, 3]).unwrap();
        assert_eq!(arr.indices().count, 6);
        assert_eq!(arr.linear_indices().count, 6);
        assert_eq!(arr.indices().indices[4], vec![1, 1]);
        assert_eq!(arr.linear_indices().indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_at_set() {
        let mut arr = Array::from_shape(&[2, 2]).unwrap();
        arr.set(3, 7.5);
        arr.set(0, -1.0);
        assert_eq!(arr.at(3), 7.5);
        assert_eq!(arr.at(0), -1.0);
        assert_eq!(arr.to_vec(), vec![-1.0, 0.0, 0.0, 7.5]);
    }

    #[test]
    #[should_panic]
    fn test_at_out_of_bounds() {
        let arr = Array::from_shape(&[2, 2]).unwrap();
        arr.at(4);
    }

    #[test]
    fn test_from_values() {
        let mut arr = Array::from_shape(&[3]).unwrap();
        arr.from_values(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(arr.to_vec(), vec![1.0, 2.0, 3.0]);

        let err = arr.from_values(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            NdError::SizeMismatch {
                expected: 3,
                actual: 2
            }
        );
        // Untouched after a failed load
        assert_eq!(arr.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_values_fills_buffer_order() {
        let a = Array::from_shape(&[2, 3]).unwrap();
        let mut t = a.transpose(None).unwrap();
        t.from_values(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]).unwrap();
        assert_eq!(t.data(), &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        // Read back through the transposed strides
        assert_eq!(t.to_vec(), vec![10.0, 40.0, 20.0, 50.0, 30.0, 60.0]);
        assert_eq!(t.shape(), &[3, 2]);
    }

    #[test]
    fn test_from_vec() {
        let arr = Array::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(arr.at(2), 3.0);
        assert!(Array::from_vec(&[2, 2], vec![1.0]).is_err());
    }

    #[test]
    fn test_set_layout_recomputes_caches() {
        let mut arr = Array::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        arr.set_layout(vec![3, 2], col_major_strides(&[3, 2], ITEMSIZE));
        assert_eq!(arr.shape(), &[3, 2]);
        assert_eq!(arr.backstrides(), &[-8, -12]);
        assert_eq!(arr.indices().indices[1], vec![0, 1]);
        assert_eq!(arr.linear_indices().indices, vec![0, 3, 1, 4, 2, 5]);
        assert!(!arr.is_c_order());
        assert!(arr.is_f_order());
        assert!(!arr.is_contiguous());
        assert_eq!(arr.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }
}
