//! Stride computation utilities.
//!
//! The closed-form strides of the row-major (rightmost index fastest) and
//! column-major (leftmost index fastest) layouts, and the index arithmetic
//! shared by every strided mapping.

use crate::extents::Extents;

/// Row-major strides: `stride(r)` is the product of all extents after `r`.
///
/// # Examples
///
/// ```
/// use mdtensor::strides::row_major_strides;
///
/// let e: (usize, usize, usize) = (3, 4, 5);
/// assert_eq!(row_major_strides(&e), [20, 5, 1]);
/// assert_eq!(row_major_strides(&()), []);
/// ```
pub fn row_major_strides<E: Extents>(extents: &E) -> E::Index {
    let dims = extents.to_array();
    let mut strides = E::Index::default();
    let mut stride = 1;
    for (s, &dim) in strides.as_mut().iter_mut().zip(dims.as_ref()).rev() {
        *s = stride;
        stride *= dim;
    }
    strides
}

/// Column-major strides: `stride(r)` is the product of all extents before `r`.
///
/// ```
/// use mdtensor::strides::col_major_strides;
///
/// let e: (usize, usize, usize) = (3, 4, 5);
/// assert_eq!(col_major_strides(&e), [1, 3, 12]);
/// ```
pub fn col_major_strides<E: Extents>(extents: &E) -> E::Index {
    let dims = extents.to_array();
    let mut strides = E::Index::default();
    let mut stride = 1;
    for (s, &dim) in strides.as_mut().iter_mut().zip(dims.as_ref()) {
        *s = stride;
        stride *= dim;
    }
    strides
}

/// Convert a multi-index to a linear offset, `Σ index[r] * strides[r]`.
#[inline]
pub fn linear_offset(index: &[usize], strides: &[usize]) -> usize {
    index
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Minimum buffer length for a strided layout.
///
/// One more than the largest reachable offset, 0 if any extent is 0, and
/// 1 for rank 0.
pub fn span_size(extents: &[usize], strides: &[usize]) -> usize {
    if extents.contains(&0) {
        return 0;
    }
    1 + extents
        .iter()
        .zip(strides.iter())
        .map(|(&e, &s)| (e - 1) * s)
        .sum::<usize>()
}

/// Visit every multi-index of `dims` in row-major order.
///
/// The untyped counterpart of [`Extents::for_each_index`], used where the
/// number of axes is only known at runtime.
pub fn for_each_multi_index<F: FnMut(&[usize])>(dims: &[usize], mut f: F) {
    if dims.contains(&0) {
        return;
    }
    let mut index = smallvec::SmallVec::<[usize; 12]>::from_elem(0, dims.len());
    loop {
        f(&index);
        let mut axis = dims.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            index[axis] += 1;
            if index[axis] < dims[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
}
