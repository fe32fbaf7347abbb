//! Range and random constructors.
//!
//! Random fills take the generator as an argument so callers can seed them.

use rand::Rng;

use crate::array::Array;
use crate::layout::MAX_ELEMENTS;
use crate::{NdError, Result};

impl Array {
    /// 1-D array of `start, start + step, ...` below `end`.
    ///
    /// The length is `ceil((end - start) / step)`.
    ///
    /// # Errors
    /// Returns [`NdError::InvalidRange`] if `start >= end`, if `step` is not
    /// a finite positive number, or if the range holds more elements than an
    /// array can address.
    ///
    /// # Example
    /// ```rust
    /// use strided_ndarray::Array;
    ///
    /// let a = Array::arange(0.0, 2.0, 0.5).unwrap();
    /// assert_eq!(a.to_vec(), vec![0.0, 0.5, 1.0, 1.5]);
    /// ```
    pub fn arange(start: f32, end: f32, step: f32) -> Result<Array> {
        if !(start < end) {
            return Err(NdError::InvalidRange(format!(
                "start {start} must be less than end {end}"
            )));
        }
        if !(step > 0.0) || !step.is_finite() {
            return Err(NdError::InvalidRange(format!(
                "step {step} must be finite and greater than 0"
            )));
        }

        let len = ((f64::from(end) - f64::from(start)) / f64::from(step)).ceil();
        if !(len >= 1.0 && len <= MAX_ELEMENTS as f64) {
            return Err(NdError::InvalidRange(format!(
                "{start}..{end} by {step} yields {len} elements"
            )));
        }
        let len = len as usize;
        let mut arr = Array::from_shape(&[len])?;
        for i in 0..len {
            arr.set(i, start + step * i as f32);
        }
        Ok(arr)
    }

    /// Array of `shape` filled with uniform samples from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Array> {
        let mut arr = Array::from_shape(shape)?;
        for i in 0..arr.totalsize() {
            arr.set(i, rng.gen::<f32>());
        }
        Ok(arr)
    }

    /// Array of `shape` filled with integers drawn uniformly from `[min, max]`.
    ///
    /// # Errors
    /// Returns [`NdError::InvalidRange`] if `min >= max`.
    pub fn random_ints<R: Rng + ?Sized>(
        shape: &[usize],
        min: i32,
        max: i32,
        rng: &mut R,
    ) -> Result<Array> {
        if min >= max {
            return Err(NdError::InvalidRange(format!(
                "min {min} must be less than max {max}"
            )));
        }
        let mut arr = Array::from_shape(shape)?;
        for i in 0..arr.totalsize() {
            arr.set(i, rng.gen_range(min..=max) as f32);
        }
        Ok(arr)
    }
}
