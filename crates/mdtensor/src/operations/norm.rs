//! Norm kernels over arbitrary tensor-like values.

use crate::access::TensorAccess;
use crate::extents::Extents;
use crate::scalar::{RealScalar, Scalar};

/// Sum of `|x|^2` over all elements.
pub(crate) fn sum_abs2<V: TensorAccess>(v: &V) -> <V::Element as Scalar>::Real {
    let mut sum = <<V::Element as Scalar>::Real as Scalar>::zero();
    v.extents().for_each_index(|i| sum = sum + v.read(i).abs2());
    sum
}

/// Largest `|x|` over all elements, zero if there are none.
pub(crate) fn max_abs<V: TensorAccess>(v: &V) -> <V::Element as Scalar>::Real {
    let mut max = <<V::Element as Scalar>::Real as Scalar>::zero();
    v.extents().for_each_index(|i| {
        let a = v.read(i).abs2();
        if a > max {
            max = a;
        }
    });
    max.sqrt()
}

#[inline]
pub(crate) fn sqrt<R: RealScalar>(x: R) -> R {
    x.sqrt()
}
