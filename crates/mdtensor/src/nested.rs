//! Construction from nested lists of elements.
//!
//! A nested list is an element, or an array, slice or vector of nested
//! lists of one less depth. Its depth must equal the rank of the tensor,
//! and every list at the same depth must have the same length.
//!
//! ```
//! use mdtensor::prelude::*;
//!
//! let t: Tensor<f64, (Dyn, Const<3>)> =
//!     Tensor::from_nested(&vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! assert_eq!(t.shape(), [2, 3]);
//! assert_eq!(t[[1, 0]], 4.0);
//! ```

use smallvec::{smallvec, SmallVec};

use crate::error::TensorError;
use crate::extents::Extents;
use crate::scalar::{c64, Scalar};
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

/// A row-major nested list of elements of type `T`.
pub trait NestedList<T: Scalar> {
    /// Number of list levels above the elements.
    const DEPTH: usize;

    /// Writes the lengths found along the path of first elements into
    /// `shape` and returns how many axes were reached. The path stops at
    /// the first empty list.
    fn measure_shape(&self, shape: &mut [usize]) -> usize;

    /// Appends the elements in row-major order, checking every list at
    /// depth `axis` against `shape[axis]`.
    fn flatten_into(&self, axis: usize, shape: &[usize], out: &mut Vec<T>) -> Result<(), TensorError>;
}

macro_rules! impl_nested_leaf {
    ($($t:ty),*) => {$(
        impl NestedList<$t> for $t {
            const DEPTH: usize = 0;

            fn measure_shape(&self, _shape: &mut [usize]) -> usize {
                0
            }

            fn flatten_into(
                &self,
                _axis: usize,
                _shape: &[usize],
                out: &mut Vec<$t>,
            ) -> Result<(), TensorError> {
                out.push(*self);
                Ok(())
            }
        }
    )*};
}

impl_nested_leaf!(f32, f64, c64);

impl<T: Scalar, X: NestedList<T>> NestedList<T> for [X] {
    const DEPTH: usize = X::DEPTH + 1;

    fn measure_shape(&self, shape: &mut [usize]) -> usize {
        shape[0] = self.len();
        match self.first() {
            Some(first) => 1 + first.measure_shape(&mut shape[1..]),
            None => 1,
        }
    }

    fn flatten_into(&self, axis: usize, shape: &[usize], out: &mut Vec<T>) -> Result<(), TensorError> {
        if self.len() != shape[axis] {
            return Err(TensorError::ListLengthMismatch {
                axis,
                expected: shape[axis],
                actual: self.len(),
            });
        }
        self.iter()
            .try_for_each(|x| x.flatten_into(axis + 1, shape, out))
    }
}

impl<T: Scalar, X: NestedList<T>, const N: usize> NestedList<T> for [X; N] {
    const DEPTH: usize = X::DEPTH + 1;

    fn measure_shape(&self, shape: &mut [usize]) -> usize {
        self.as_slice().measure_shape(shape)
    }

    fn flatten_into(&self, axis: usize, shape: &[usize], out: &mut Vec<T>) -> Result<(), TensorError> {
        self.as_slice().flatten_into(axis, shape, out)
    }
}

impl<T: Scalar, X: NestedList<T>> NestedList<T> for Vec<X> {
    const DEPTH: usize = X::DEPTH + 1;

    fn measure_shape(&self, shape: &mut [usize]) -> usize {
        self.as_slice().measure_shape(shape)
    }

    fn flatten_into(&self, axis: usize, shape: &[usize], out: &mut Vec<T>) -> Result<(), TensorError> {
        self.as_slice().flatten_into(axis, shape, out)
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> Tensor<T, E, S> {
    /// Create a tensor from a nested list, one level of nesting per axis.
    ///
    /// Extents of dynamic axes are taken from the list. Axes below an
    /// empty list take their static extent, or 0.
    ///
    /// # Errors
    ///
    /// - `TensorError::RankMismatch` if the nesting depth is not the rank.
    /// - `TensorError::ListLengthMismatch` if a list length differs from a
    ///   static extent or from the other lists at the same depth.
    pub fn from_nested<N>(list: &N) -> Result<Self, TensorError>
    where
        N: NestedList<T> + ?Sized,
    {
        if N::DEPTH != E::RANK {
            return Err(TensorError::RankMismatch {
                expected: E::RANK,
                actual: N::DEPTH,
            });
        }

        let mut shape: SmallVec<[usize; 6]> = smallvec![0; E::RANK];
        let reached = list.measure_shape(&mut shape);
        for (axis, extent) in shape.iter_mut().enumerate() {
            match E::static_extent(axis) {
                Some(n) if axis >= reached => *extent = n,
                Some(n) if n != *extent => {
                    return Err(TensorError::ListLengthMismatch {
                        axis,
                        expected: n,
                        actual: *extent,
                    });
                }
                _ => {}
            }
        }

        let mut data = Vec::with_capacity(shape.iter().product());
        list.flatten_into(0, &shape, &mut data)?;
        Self::from_vec(E::from_array(&shape), data)
    }
}
