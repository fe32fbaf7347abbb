//! Minimal n-dimensional `f32` arrays addressed through shape/stride metadata.
//!
//! An [`Array`] owns a flat buffer and describes it with a shape, byte
//! strides, backstrides and two cached index enumerations:
//!
//! - [`ArrayIndices`]: every coordinate of the shape in row-major order
//! - [`LinearIndices`]: the buffer offset of each of those coordinates
//!
//! Element `i` of an array ([`Array::at`], [`Array::set`]) always means the
//! `i`-th element in canonical row-major order, whatever the physical layout.
//! This is what lets a transpose be expressed purely as a stride permutation.
//!
//! # Operations
//!
//! ## View transforms
//!
//! - [`Array::reshape`], [`Array::reshape_in_place`]
//! - [`Array::transpose`]: permute strides over an unpermuted buffer
//!
//! ## Broadcasting
//!
//! - [`broadcast_shapes`]: NumPy-style shape unification
//! - [`broadcast_to`]: materialize an array into a broadcast shape
//!
//! ## Arithmetic
//!
//! - [`add`], [`subtract`], [`multiply`]: broadcasting elementwise ops
//! - [`binary_op`]: elementwise op on equally shaped arrays
//! - [`matmul`]: batched matrix multiplication over the trailing two axes
//!
//! ## Unary maps
//!
//! - [`apply`], [`apply_in_place`], [`negate`], [`exp`], [`log`], [`sin`],
//!   [`cos`], [`tan`], [`tanh`], [`sigmoid`]
//!
//! # Example
//!
//! ```rust
//! use strided_ndarray::{add, Array};
//!
//! let a = Array::arange(1.0, 17.0, 1.0).unwrap().reshape(&[2, 4, 2]).unwrap();
//! let b = a.transpose(None).unwrap();
//! assert_eq!(b.shape(), &[2, 4, 2]);
//!
//! let c = add(&a, &b).unwrap();
//! assert_eq!(c.at(1), 2.0 + 9.0);
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature (on by default) elementwise operations over at
//! least [`PARALLEL_THRESHOLD`] elements are split into contiguous chunks and
//! run on the rayon thread pool. See [`ParallelPolicy`].

mod array;
pub mod broadcast;
mod construct;
pub mod index;
pub mod layout;
mod linalg;
mod ops;
mod print;
pub mod threading;
mod unary;
mod view;

pub use array::Array;
pub use broadcast::{broadcast_shapes, broadcast_to, can_broadcast_to};
pub use index::{ArrayIndices, LinearIndices};
pub use linalg::matmul;
pub use ops::{add, add_with, binary_op, multiply, multiply_with, subtract, subtract_with};
pub use threading::ParallelPolicy;
pub use unary::{apply, apply_in_place, cos, exp, log, negate, sigmoid, sin, tan, tanh};

// ============================================================================
// Constants
// ============================================================================

/// Size in bytes of one array element (`f32`).
///
/// Strides are expressed in bytes; buffer offsets are strides divided by this.
pub const ITEMSIZE: usize = std::mem::size_of::<f32>();

/// Element count at or above which elementwise operations run in parallel.
pub const PARALLEL_THRESHOLD: usize = 100_000;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdError {
    /// Shape is empty or has a zero extent.
    #[error("invalid shape {0:?}: extents must be positive and rank at least 1")]
    InvalidShape(Vec<usize>),

    /// Number of values does not match the array size.
    #[error("size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Reshape target has a different total size or rank.
    #[error("cannot reshape {0:?} into {1:?}")]
    ShapeIncompatible(Vec<usize>, Vec<usize>),

    /// Transpose axes are not a permutation of `0..ndim`.
    #[error("invalid permutation {axes:?} for rank {ndim}")]
    InvalidPermutation { axes: Vec<usize>, ndim: usize },

    /// Two shapes cannot be unified by broadcasting.
    #[error("shapes {0:?} and {1:?} are not broadcastable")]
    BroadcastIncompatible(Vec<usize>, Vec<usize>),

    /// Operand shapes do not fit the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Constructor bounds are empty or reversed.
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, NdError>;
