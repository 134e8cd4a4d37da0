//! Inline storage for fully static tensors.

use crate::scalar::Scalar;
use crate::storage::TensorStorage;

/// `N` rows of `C` elements held inline, without a heap allocation.
///
/// The element count of a static tensor is known at compile time but is
/// not expressible as a const generic of the extents type, so the buffer
/// size is spelled separately and checked against the extents on
/// construction. Rank-1 buffers are `Fixed<T, N>`; the second parameter
/// lets a rank-2 array literal keep its own `[[T; C]; R]` shape.
///
/// ```
/// use mdtensor::storage::{Fixed, TensorStorage};
///
/// let m = Fixed::from_array([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
/// assert_eq!(m.len(), 6);
/// assert_eq!(m.as_slice()[3], 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed<ElT: Scalar, const N: usize, const C: usize = 1> {
    data: [[ElT; C]; N],
}

impl<ElT: Scalar, const N: usize, const C: usize> Fixed<ElT, N, C> {
    pub fn from_array(data: [[ElT; C]; N]) -> Self {
        Self { data }
    }

    fn check_len(len: usize) {
        assert_eq!(
            len,
            N * C,
            "fixed storage of {} elements cannot hold {} elements",
            N * C,
            len
        );
    }
}

impl<ElT: Scalar, const N: usize> From<[ElT; N]> for Fixed<ElT, N> {
    fn from(data: [ElT; N]) -> Self {
        Self {
            data: data.map(|x| [x]),
        }
    }
}

impl<ElT: Scalar, const N: usize, const C: usize> TensorStorage<ElT> for Fixed<ElT, N, C> {
    fn from_elem(len: usize, value: ElT) -> Self {
        Self::check_len(len);
        Self {
            data: [[value; C]; N],
        }
    }

    /// # Panics
    ///
    /// Panics if `data.len() != N * C`.
    fn from_vec(data: Vec<ElT>) -> Self {
        let mut fixed = Self::from_elem(data.len(), ElT::zero());
        fixed.as_mut_slice().copy_from_slice(&data);
        fixed
    }

    #[inline]
    fn len(&self) -> usize {
        N * C
    }

    #[inline]
    fn as_slice(&self) -> &[ElT] {
        self.data.as_flattened()
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [ElT] {
        self.data.as_flattened_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let f: Fixed<f64, 3> = Fixed::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(f.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(f.len(), 3);
        assert_eq!(f, Fixed::from([1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_rows_are_flattened_row_major() {
        let mut f = Fixed::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(f.len(), 6);
        assert_eq!(f.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        f.as_mut_slice()[4] = -5.0;
        assert_eq!(f, Fixed::from_array([[1.0, 2.0, 3.0], [4.0, -5.0, 6.0]]));
    }

    #[test]
    fn test_zeros() {
        let f: Fixed<f64, 2, 2> = Fixed::zeros(4);
        assert_eq!(f.as_slice(), &[0.0; 4]);
    }

    #[test]
    #[should_panic(expected = "cannot hold 2 elements")]
    fn test_wrong_length() {
        let _: Fixed<f64, 3> = Fixed::from_vec(vec![1.0, 2.0]);
    }
}
