//! Tensor contraction ("tensordot").
//!
//! Two operands are contracted over paired axes: every output element is
//! the sum, over all values of the contracted indices, of products of
//! elements of the two operands. Matrix products, matrix-vector products,
//! inner and outer products are all instances.
//!
//! # Entry points
//!
//! - [`tensordot`] / [`tensordot_out`]: arbitrary axis pairs given at
//!   runtime, into a new or a caller-provided tensor.
//! - [`tensordot_n`] / [`tensordot_n_out`]: the last `N` axes of the left
//!   operand against the first `N` axes of the right one. The output
//!   extents type is computed at compile time, static wherever the source
//!   axis is static.
//! - [`update`]: accumulation rules for the `_out` forms.
//!
//! # Example
//!
//! ```
//! use mdtensor::prelude::*;
//! use mdtensor::contract::tensordot_n;
//!
//! let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
//! let b: Tensor<f64, _, _> = Tensor::from([[5.0, 6.0], [7.0, 8.0]]);
//!
//! let c: Tensor<f64, (Const<2>, Const<2>)> = tensordot_n::<1, _, _>(&a, &b);
//! assert_eq!(c.data(), &[19.0, 22.0, 43.0, 50.0]);
//! ```

mod naive;
mod properties;
pub mod update;

use smallvec::SmallVec;

use crate::access::{TensorAccess, TensorAccessMut};
use crate::bounds::assert_bounds;
use crate::extents::{Combine, Concat, Extents, SplitFirst, SplitLast};
use crate::tensor::Tensor;

pub use naive::{tensordot, tensordot_out};
pub use properties::ContractionProperties;

/// Extents of the contraction of the last `N` axes of `Self` with the
/// first `N` axes of `F`.
///
/// The contracted axes must be compatible (`Combine`), so contracting a
/// static axis with a different static axis does not compile.
pub trait ContractExtents<F: Extents, const N: usize>: Extents {
    type Output: Extents;

    fn contract_extents(&self, other: &F) -> Self::Output;
}

impl<E, F, const N: usize> ContractExtents<F, N> for E
where
    E: SplitLast<N>,
    F: SplitFirst<N>,
    <E as SplitLast<N>>::Last: Combine<<F as SplitFirst<N>>::Head>,
    <E as SplitLast<N>>::Init: Concat<<F as SplitFirst<N>>::Tail>,
{
    type Output = <<E as SplitLast<N>>::Init as Concat<<F as SplitFirst<N>>::Tail>>::Output;

    fn contract_extents(&self, other: &F) -> Self::Output {
        let (init, last) = SplitLast::<N>::split_last(self);
        let (head, tail) = SplitFirst::<N>::split_first(other);
        assert_bounds!(
            last.same_as(&head),
            "contracted extents differ: {:?} vs {:?}",
            last,
            head
        );
        init.concat(&tail)
    }
}

/// Output extents of `tensordot_n::<N>` for operands with extents `E` and `F`.
pub type ContractOutput<E, F, const N: usize> = <E as ContractExtents<F, N>>::Output;

/// Extents of the contraction of the first axis of `Self` with the first
/// axis of `F`: the remaining axes of `Self` followed by those of `F`.
pub trait ContractLeading<F: Extents>: Extents {
    type Output: Extents;
}

impl<E, F> ContractLeading<F> for E
where
    E: SplitFirst<1>,
    F: SplitFirst<1>,
    <E as SplitFirst<1>>::Head: Combine<<F as SplitFirst<1>>::Head>,
    <E as SplitFirst<1>>::Tail: Concat<<F as SplitFirst<1>>::Tail>,
{
    type Output = <<E as SplitFirst<1>>::Tail as Concat<<F as SplitFirst<1>>::Tail>>::Output;
}

/// Output extents of contracting the first axes of `E` and `F`.
pub type LeadingOutput<E, F> = <E as ContractLeading<F>>::Output;

fn fixed_axes<const N: usize>(rank_a: usize) -> (SmallVec<[usize; 6]>, SmallVec<[usize; 6]>) {
    assert!(
        N <= rank_a,
        "cannot contract {} axes of a rank-{} operand",
        N,
        rank_a
    );
    ((rank_a - N..rank_a).collect(), (0..N).collect())
}

/// Contract the last `N` axes of `a` with the first `N` axes of `b`.
///
/// `N = 0` is the outer product, `N = 1` the matrix product, and `N` equal
/// to both ranks the full contraction to a rank-0 tensor.
///
/// ```
/// use mdtensor::prelude::*;
/// use mdtensor::contract::tensordot_n;
///
/// let x: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
/// let y: Tensor<f64, _, _> = Tensor::from([3.0, 4.0, 5.0]);
/// let outer = tensordot_n::<0, _, _>(&x, &y);
/// assert_eq!(outer.shape(), [2, 3]);
/// assert_eq!(outer[[1, 2]], 10.0);
/// ```
pub fn tensordot_n<const N: usize, A, B>(
    a: &A,
    b: &B,
) -> Tensor<A::Element, ContractOutput<A::Extents, B::Extents, N>>
where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
    A::Extents: ContractExtents<B::Extents, N>,
{
    let extents = ContractExtents::<B::Extents, N>::contract_extents(&a.extents(), &b.extents());
    let mut c = Tensor::zeros(extents);
    tensordot_n_out::<N, _, _, _, _>(a, b, &mut c, update::add);
    c
}

/// Like [`tensordot_n`], writing into `c` through `update`.
pub fn tensordot_n_out<const N: usize, A, B, C, U>(a: &A, b: &B, c: &mut C, update: U)
where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
    C: TensorAccessMut<Element = A::Element>,
    U: FnMut(&mut A::Element, A::Element, A::Element),
{
    let (a_axes, b_axes) = fixed_axes::<N>(<A::Extents as Extents>::RANK);
    tensordot_out(a, &a_axes, b, &b_axes, c, update);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extents::{Const, Dyn, DynExtents2};

    #[test]
    fn test_contract_extents_keeps_static_axes() {
        let a = (Const::<2>, 3 as Dyn);
        let b = (Const::<3>, 4 as Dyn);
        let c: (Const<2>, Dyn) = ContractExtents::<_, 1>::contract_extents(&a, &b);
        assert_eq!(c.to_array(), [2, 4]);
    }

    #[test]
    fn test_contract_extents_outer_and_full() {
        let a = (2 as Dyn,);
        let b = (Const::<3>,);
        let outer: (Dyn, Const<3>) = ContractExtents::<_, 0>::contract_extents(&a, &b);
        assert_eq!(outer.to_array(), [2, 3]);
        let full: () = ContractExtents::<_, 1>::contract_extents(&(3 as Dyn,), &b);
        assert_eq!(full.size(), 1);
    }

    #[test]
    fn test_tensordot_n_matrix_vector() {
        let a: Tensor<f64, DynExtents2> =
            Tensor::from_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
        let y = tensordot_n::<1, _, _>(&a, &x);
        assert_eq!(y.shape(), [2]);
        assert_eq!(y.data(), &[3.0, 7.0]);
    }

    #[test]
    fn test_tensordot_n_double_contraction() {
        let a: Tensor<f64, DynExtents2> =
            Tensor::from_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b: Tensor<f64, DynExtents2> =
            Tensor::from_vec((2, 2), vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let c: Tensor<f64, ()> = tensordot_n::<2, _, _>(&a, &b);
        assert_eq!(c.value(), 5.0 + 12.0 + 21.0 + 32.0);
    }

    #[test]
    fn test_tensordot_n_out_with_updater() {
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
        let mut c: Tensor<f64, ()> = Tensor::scalar(10.0);
        tensordot_n_out::<1, _, _, _, _>(&x, &x, &mut c, update::sub);
        assert_eq!(c.value(), 5.0);
    }

    #[test]
    #[should_panic(expected = "cannot contract 2 axes")]
    fn test_too_many_axes() {
        let _ = fixed_axes::<2>(1);
    }
}
