//! Matrix-vector products on top of the contraction engine.

use crate::access::{TensorAccess, TensorAccessMut};
use crate::contract::{tensordot_out, update};
use crate::extents::{Dyn, Extents};
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Set every element of `y` to zero.
pub(crate) fn zero_fill<Y: TensorAccessMut>(y: &mut Y) {
    let extents = y.extents();
    extents.for_each_index(|i| *y.element_mut(i) = <Y::Element as Scalar>::zero());
}

/// Apply `update` for every term of `A x` (`transpose == false`) or of
/// `A^T x` into `y`.
///
/// For the transposed product the vector is the left operand, so a
/// conjugating updater conjugates the matrix.
pub(crate) fn apply<A, X, Y, U>(a: &A, x: &X, y: &mut Y, transpose: bool, update: U)
where
    A: TensorAccess,
    X: TensorAccess<Element = A::Element>,
    Y: TensorAccessMut<Element = A::Element>,
    U: FnMut(&mut A::Element, A::Element, A::Element),
{
    if transpose {
        tensordot_out(x, &[0], a, &[0], y, update);
    } else {
        tensordot_out(a, &[1], x, &[0], y, update);
    }
}

pub(crate) fn bilinear<A, U, V>(a: &A, u: &U, v: &V) -> A::Element
where
    A: TensorAccess,
    U: TensorAccess<Element = A::Element>,
    V: TensorAccess<Element = A::Element>,
{
    let mut av: Tensor<A::Element, (Dyn,)> = Tensor::zeros((a.extents().extent(0),));
    apply(a, v, &mut av, false, update::add);
    let mut c: Tensor<A::Element, ()> = Tensor::scalar(<A::Element as Scalar>::zero());
    tensordot_out(u, &[0], &av, &[0], &mut c, update::add);
    c.value()
}
