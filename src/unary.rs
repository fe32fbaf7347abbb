//! Elementwise unary maps.
//!
//! The result of [`apply`] keeps the layout of its input: mapping a transposed
//! array yields a transposed array.

use crate::array::Array;

/// Return a copy of `array` with `f` applied to every element.
pub fn apply<F>(array: &Array, f: F) -> Array
where
    F: Fn(f32) -> f32,
{
    let mut res = array.clone();
    apply_in_place(&mut res, f);
    res
}

/// Apply `f` to every element of `array` in place.
pub fn apply_in_place<F>(array: &mut Array, f: F)
where
    F: Fn(f32) -> f32,
{
    for i in 0..array.totalsize() {
        let value = array.at(i);
        array.set(i, f(value));
    }
}

/// `-x` for every element.
pub fn negate(array: &Array) -> Array {
    apply(array, |x| -x)
}

/// `e^x` for every element.
pub fn exp(array: &Array) -> Array {
    apply(array, f32::exp)
}

/// Natural logarithm of every element.
pub fn log(array: &Array) -> Array {
    apply(array, f32::ln)
}

pub fn sin(array: &Array) -> Array {
    apply(array, f32::sin)
}

pub fn cos(array: &Array) -> Array {
    apply(array, f32::cos)
}

pub fn tan(array: &Array) -> Array {
    apply(array, f32::tan)
}

pub fn tanh(array: &Array) -> Array {
    apply(array, f32::tanh)
}

/// Logistic function `1 / (1 + e^-x)` for every element.
pub fn sigmoid(array: &Array) -> Array {
    apply(array, |x| 1.0 / (1.0 + (-x).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arr(values: &[f32]) -> Array {
        Array::from_vec(&[values.len()], values.to_vec()).unwrap()
    }

    #[test]
    fn test_negate() {
        let a = arr(&[1.0, -2.0, 0.5]);
        assert_eq!(negate(&a).to_vec(), vec![-1.0, 2.0, -0.5]);
        // Input untouched
        assert_eq!(a.to_vec(), vec![1.0, -2.0, 0.5]);
    }

    #[test]
    fn test_apply_keeps_layout() {
        let a = Array::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose(None).unwrap();
        let doubled = apply(&t, |x| 2.0 * x);
        assert_eq!(doubled.strides(), t.strides());
        assert_eq!(doubled.to_vec(), vec![2.0, 8.0, 4.0, 10.0, 6.0, 12.0]);
    }

    #[test]
    fn test_apply_in_place() {
        let mut a = arr(&[1.0, 2.0, 3.0]);
        apply_in_place(&mut a, |x| x * x);
        assert_eq!(a.to_vec(), vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_exp_log() {
        let a = arr(&[0.0, 1.0, 2.5]);
        let back = log(&exp(&a));
        for (x, y) in a.to_vec().iter().zip(back.to_vec()) {
            assert_relative_eq!(*x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_trig() {
        let a = arr(&[0.0, std::f32::consts::FRAC_PI_2]);
        let s = sin(&a).to_vec();
        let c = cos(&a).to_vec();
        assert_relative_eq!(s[0], 0.0);
        assert_relative_eq!(s[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(c[0], 1.0);
        assert_relative_eq!(c[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(tan(&arr(&[0.25])).at(0), 0.25f32.tan());
        assert_relative_eq!(tanh(&arr(&[0.25])).at(0), 0.25f32.tanh());
    }

    #[test]
    fn test_sigmoid() {
        let s = sigmoid(&arr(&[0.0, 20.0, -20.0])).to_vec();
        assert_relative_eq!(s[0], 0.5);
        assert_relative_eq!(s[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(s[2], 0.0, epsilon = 1e-6);
    }
}
