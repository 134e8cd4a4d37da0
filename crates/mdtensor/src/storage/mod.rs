//! Owning buffers behind [`Tensor`](crate::tensor::Tensor).
//!
//! ```text
//! TensorStorage<T> (trait)
//! ├── Dense<T>       - heap vector, resizable
//! └── Fixed<T, N, C> - inline array of N rows of C elements (C = 1 by default)
//! ```
//!
//! Storage is always a flat buffer; extents and layout come from the
//! tensor wrapper.

mod dense;
mod fixed;

use crate::scalar::Scalar;

pub use dense::Dense;
pub use fixed::Fixed;

/// Trait for owning tensor buffers.
pub trait TensorStorage<T: Scalar>: Clone + std::fmt::Debug + PartialEq {
    /// Create storage of `len` copies of `value`.
    fn from_elem(len: usize, value: T) -> Self;

    /// Create storage with given length, zero-initialized.
    fn zeros(len: usize) -> Self {
        Self::from_elem(len, T::zero())
    }

    /// Create storage from an existing vector.
    fn from_vec(data: Vec<T>) -> Self;

    /// Length of storage (number of elements).
    fn len(&self) -> usize;

    /// Check if storage is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get immutable slice of data.
    fn as_slice(&self) -> &[T];

    /// Get mutable slice of data.
    fn as_mut_slice(&mut self) -> &mut [T];
}

/// Storage whose length can change after construction.
pub trait ResizableStorage<T: Scalar>: TensorStorage<T> {
    /// Resize to `len` elements; new elements are `value`.
    fn resize(&mut self, len: usize, value: T);
}
