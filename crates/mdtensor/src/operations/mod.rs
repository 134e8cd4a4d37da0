//! Tensor operations shared by tensors and views.
//!
//! The operations are provided methods of two traits layered over
//! [`TensorAccess`]:
//!
//! ```text
//! DenseTensorOps     rank/extent queries, checked access, products, norms
//! DenseTensorOpsMut  checked mutable access, fill, axpy, aypx
//! ```
//!
//! [`Tensor`], [`TensorSpan`] and [`TensorSpanMut`] take the provided
//! methods as they are; [`ZeroTensor`](crate::zero::ZeroTensor) overrides
//! them with constant-time versions. Arithmetic operators live in
//! `elementwise`, formatting in `display`.
//!
//! Products go through the contraction engine in [`crate::contract`]:
//!
//! | method      | contraction                                  |
//! |-------------|----------------------------------------------|
//! | `dot`       | last axis of `self` with first of `other`    |
//! | `ddot`      | last two axes with the first two             |
//! | `inner`     | all axes pairwise, to a scalar               |
//! | `multi_dot` | every axis with one operand each             |
//! | `mv`        | `y = A x`, axis 1 of `A` with `x`            |
//! | `mtv`       | `y = A^T x`, axis 0 of `A` with `x`          |
//! | `mhv`       | `y = A^H x`, as `mtv` with conjugated `A`    |
//!
//! The conjugating forms conjugate `self` for `dot`, `ddot` and `inner`,
//! and the matrix for `mhv`. A scale factor is never conjugated.

mod display;
mod elementwise;
mod matvec;
mod multidot;
mod norm;

use smallvec::SmallVec;

use crate::access::{IndexOf, TensorAccess, TensorAccessMut};
use crate::accessor::{Accessor, AccessorMut};
use crate::bounds::assert_bounds;
use crate::contract::{tensordot_n_out, tensordot_out, update, ContractExtents, ContractOutput};
use crate::error::TensorError;
use crate::extents::{reindex, Combine, Extents, HasRank};
use crate::layout::Layout;
use crate::scalar::Scalar;
use crate::span::{TensorSpan, TensorSpanMut};
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

pub use elementwise::check_same_extents;
pub use multidot::MultiDotOperands;

pub(crate) use elementwise::{map, zip_map};
pub(crate) use matvec::zero_fill;

/// Real type of the elements of `V`.
pub type RealOf<V> = <<V as TensorAccess>::Element as Scalar>::Real;

fn out_of_bounds<E: Extents>(extents: &E, index: &[usize]) -> TensorError {
    TensorError::IndexOutOfBounds {
        indices: index.to_vec(),
        extents: extents.to_array().as_ref().to_vec(),
    }
}

/// Read-only operations on tensor-like values.
pub trait DenseTensorOps: TensorAccess + Sized {
    #[inline]
    fn rank(&self) -> usize {
        <Self::Extents as Extents>::RANK
    }

    /// Number of elements.
    #[inline]
    fn size(&self) -> usize {
        self.extents().size()
    }

    #[inline]
    fn extent(&self, axis: usize) -> usize {
        self.extents().extent(axis)
    }

    #[inline]
    fn rows(&self) -> usize
    where
        Self::Extents: HasRank<2>,
    {
        self.extents().extent(0)
    }

    #[inline]
    fn cols(&self) -> usize
    where
        Self::Extents: HasRank<2>,
    {
        self.extents().extent(1)
    }

    /// Element at `index`, asserted to be in range in checked builds.
    #[inline]
    fn get(&self, index: &IndexOf<Self>) -> Self::Element {
        assert_bounds!(
            self.exists(index),
            "index {:?} out of range for extents {:?}",
            index,
            self.extents()
        );
        self.read(index)
    }

    /// Element at `index`, always bounds checked.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::IndexOutOfBounds` if any index is not smaller
    /// than the extent of its axis.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    /// use mdtensor::TensorError;
    ///
    /// let t: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(t.at(&[1, 0]), Ok(3.0));
    /// assert!(matches!(t.at(&[2, 0]), Err(TensorError::IndexOutOfBounds { .. })));
    /// ```
    fn at(&self, index: &IndexOf<Self>) -> Result<Self::Element, TensorError> {
        if !self.exists(index) {
            return Err(out_of_bounds(&self.extents(), index.as_ref()));
        }
        Ok(self.read(index))
    }

    /// Whether `index` lies in the index space. Dense tensors store every
    /// element, so this is a bounds check.
    #[inline]
    fn exists(&self, index: &IndexOf<Self>) -> bool {
        self.extents().contains(index.as_ref())
    }

    /// Contract the last axis of `self`, conjugated, with the first axis of
    /// `other`.
    fn dot<V>(&self, other: &V) -> Tensor<Self::Element, ContractOutput<Self::Extents, V::Extents, 1>>
    where
        V: TensorAccess<Element = Self::Element>,
        Self::Extents: ContractExtents<V::Extents, 1>,
    {
        let extents =
            ContractExtents::<V::Extents, 1>::contract_extents(&self.extents(), &other.extents());
        let mut c = Tensor::zeros(extents);
        tensordot_n_out::<1, _, _, _, _>(self, other, &mut c, update::conj_add);
        c
    }

    /// Contract the last two axes of `self`, conjugated, with the first two
    /// axes of `other`.
    fn ddot<V>(&self, other: &V) -> Tensor<Self::Element, ContractOutput<Self::Extents, V::Extents, 2>>
    where
        V: TensorAccess<Element = Self::Element>,
        Self::Extents: ContractExtents<V::Extents, 2>,
    {
        let extents =
            ContractExtents::<V::Extents, 2>::contract_extents(&self.extents(), &other.extents());
        let mut c = Tensor::zeros(extents);
        tensordot_n_out::<2, _, _, _, _>(self, other, &mut c, update::conj_add);
        c
    }

    /// Hermitian inner product: `sum conj(self[i]) * other[i]` over all
    /// multi-indices.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let a = Tensor::from([c64::new(0.0, 1.0), c64::new(2.0, 0.0)]);
    /// let b = Tensor::from([c64::new(0.0, 1.0), c64::new(1.0, 0.0)]);
    /// assert_eq!(a.inner(&b), c64::new(3.0, 0.0));
    /// ```
    fn inner<V>(&self, other: &V) -> Self::Element
    where
        V: TensorAccess<Element = Self::Element>,
        Self::Extents: Combine<V::Extents>,
    {
        let axes: SmallVec<[usize; 6]> = (0..<Self::Extents as Extents>::RANK).collect();
        let mut c: Tensor<Self::Element, ()> = Tensor::scalar(<Self::Element as Scalar>::zero());
        tensordot_out(self, &axes, other, &axes, &mut c, update::conj_add);
        c.value()
    }

    /// `u^T A v` for a matrix `A` and vectors `u`, `v`; nothing is
    /// conjugated.
    fn bilinear<U, V>(&self, u: &U, v: &V) -> Self::Element
    where
        Self::Extents: HasRank<2>,
        U: TensorAccess<Element = Self::Element>,
        U::Extents: HasRank<1>,
        V: TensorAccess<Element = Self::Element>,
        V::Extents: HasRank<1>,
    {
        matvec::bilinear(self, u, v)
    }

    /// Contracts each axis of `self` with the first axis of one operand,
    /// given as a tuple of references with one entry per axis (rank 1 to 3).
    ///
    /// The result holds the remaining axes of the operands in order, so
    /// `a.multi_dot((&b, &c))` is `B^T A C`. Nothing is conjugated.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
    /// let b: Tensor<f64, _, _> = Tensor::from([[1.0, 0.0, 2.0], [0.0, 1.0, 1.0]]);
    /// let btab: Tensor<f64, (Const<3>, Const<3>)> = a.multi_dot((&b, &b));
    /// assert_eq!(btab[[2, 2]], 18.0);
    ///
    /// let u: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
    /// assert_eq!(a.multi_dot((&u, &u)), 10.0);
    /// ```
    fn multi_dot<O>(&self, operands: O) -> Tensor<Self::Element, O::Output>
    where
        O: MultiDotOperands<Self>,
    {
        operands.contract(self)
    }

    /// `y = A x`
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
    /// let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
    /// let mut y: Tensor<f64, (Dyn,)> = Tensor::from_elem((2,), 100.0);
    /// a.mv(&x, &mut y);
    /// assert_eq!(y.data(), &[3.0, 7.0]);
    /// a.mtv(&x, &mut y);
    /// assert_eq!(y.data(), &[4.0, 6.0]);
    /// ```
    fn mv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::zero_fill(y);
        matvec::apply(self, x, y, false, update::add);
    }

    /// `y = A^T x`
    fn mtv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::zero_fill(y);
        matvec::apply(self, x, y, true, update::add);
    }

    /// `y = A^H x`
    fn mhv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::zero_fill(y);
        matvec::apply(self, x, y, true, update::add_conj);
    }

    /// `y += A x`
    fn umv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, false, update::add);
    }

    /// `y += A^T x`
    fn umtv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, true, update::add);
    }

    /// `y += A^H x`
    fn umhv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, true, update::add_conj);
    }

    /// `y -= A x`
    fn mmv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, false, update::sub);
    }

    /// `y -= A^T x`
    fn mmtv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, true, update::sub);
    }

    /// `y -= A^H x`
    fn mmhv<X, Y>(&self, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, true, update::sub_conj);
    }

    /// `y += alpha A x`
    fn usmv<X, Y>(&self, alpha: Self::Element, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, false, update::scaled(alpha));
    }

    /// `y += alpha A^T x`
    fn usmtv<X, Y>(&self, alpha: Self::Element, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, true, update::scaled(alpha));
    }

    /// `y += alpha A^H x`; `alpha` is used as given.
    fn usmhv<X, Y>(&self, alpha: Self::Element, x: &X, y: &mut Y)
    where
        Self::Extents: HasRank<2>,
        X: TensorAccess<Element = Self::Element>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = Self::Element>,
        Y::Extents: HasRank<1>,
    {
        matvec::apply(self, x, y, true, update::scaled_conj(alpha));
    }

    /// Sum of squared magnitudes of all elements.
    fn frobenius_norm2(&self) -> RealOf<Self> {
        norm::sum_abs2(self)
    }

    fn frobenius_norm(&self) -> RealOf<Self> {
        norm::sqrt(self.frobenius_norm2())
    }

    /// Squared Euclidean norm of a vector.
    fn two_norm2(&self) -> RealOf<Self>
    where
        Self::Extents: HasRank<1>,
    {
        self.frobenius_norm2()
    }

    /// Euclidean norm of a vector.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let v: Tensor<f64, _, _> = Tensor::from([3.0, 4.0]);
    /// assert_eq!(v.two_norm(), 5.0);
    /// ```
    fn two_norm(&self) -> RealOf<Self>
    where
        Self::Extents: HasRank<1>,
    {
        self.frobenius_norm()
    }

    /// Largest magnitude of any element, zero for an empty tensor.
    fn infinity_norm(&self) -> RealOf<Self> {
        norm::max_abs(self)
    }
}

/// Mutating operations on writable tensor-like values.
pub trait DenseTensorOpsMut: DenseTensorOps + TensorAccessMut {
    /// Mutable element at `index`, asserted to be in range in checked builds.
    #[inline]
    fn get_mut(&mut self, index: &IndexOf<Self>) -> &mut Self::Element {
        assert_bounds!(
            self.exists(index),
            "index {:?} out of range for extents {:?}",
            index,
            self.extents()
        );
        self.element_mut(index)
    }

    /// Mutable element at `index`, always bounds checked.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::IndexOutOfBounds` for an index outside the
    /// index space.
    fn at_mut(&mut self, index: &IndexOf<Self>) -> Result<&mut Self::Element, TensorError> {
        if !self.exists(index) {
            return Err(out_of_bounds(&self.extents(), index.as_ref()));
        }
        Ok(self.element_mut(index))
    }

    /// Set every element to `value`.
    fn fill(&mut self, value: Self::Element) {
        self.map_inplace(|_| value);
    }

    /// Replace every element `x` with `f(x)`.
    fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(Self::Element) -> Self::Element,
    {
        let extents = self.extents();
        extents.for_each_index(|index| {
            let x = self.element_mut(index);
            *x = f(*x);
        });
    }

    /// Replace every element `x` with `f(x, y)`, `y` the element of
    /// `other` at the same multi-index.
    fn zip_apply<V, F>(&mut self, other: &V, mut f: F)
    where
        V: TensorAccess<Element = Self::Element>,
        Self::Extents: Combine<V::Extents>,
        F: FnMut(Self::Element, Self::Element) -> Self::Element,
    {
        let extents = self.extents();
        assert_bounds!(
            extents.same_as(&other.extents()),
            "extents {:?} and {:?} differ",
            extents,
            other.extents()
        );
        extents.for_each_index(|index| {
            let y = other.read(&reindex(index.as_ref()));
            let x = self.element_mut(index);
            *x = f(*x, y);
        });
    }

    /// `self += alpha * x`
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let mut y: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
    /// let x: Tensor<f64, _, _> = Tensor::from([10.0, 20.0]);
    /// y.axpy(0.5, &x);
    /// assert_eq!(y.data(), &[6.0, 12.0]);
    /// y.aypx(2.0, &x);
    /// assert_eq!(y.data(), &[22.0, 44.0]);
    /// ```
    fn axpy<V>(&mut self, alpha: Self::Element, x: &V)
    where
        V: TensorAccess<Element = Self::Element>,
        Self::Extents: Combine<V::Extents>,
    {
        self.zip_apply(x, |s, v| s + alpha * v);
    }

    /// `self = alpha * self + x`
    fn aypx<V>(&mut self, alpha: Self::Element, x: &V)
    where
        V: TensorAccess<Element = Self::Element>,
        Self::Extents: Combine<V::Extents>,
    {
        self.zip_apply(x, |s, v| alpha * s + v);
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> DenseTensorOps for Tensor<T, E, S> {
    fn frobenius_norm2(&self) -> T::Real {
        self.data()
            .iter()
            .fold(<T::Real as Scalar>::zero(), |acc, x| acc + x.abs2())
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> DenseTensorOpsMut for Tensor<T, E, S> {
    fn fill(&mut self, value: T) {
        self.data_mut().fill(value);
    }
}

impl<'a, T, E, L, A> DenseTensorOps for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
}

impl<'a, T, E, L, A> DenseTensorOps for TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
}

impl<'a, T, E, L, A> DenseTensorOpsMut for TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extents::{Const, Dyn, DynExtents1, DynExtents2};
    use crate::scalar::c64;
    use approx::assert_relative_eq;

    fn matrix() -> Tensor<f64, DynExtents2> {
        Tensor::from_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_rank_and_extents() {
        let t: Tensor<f64, (Const<2>, Dyn, Dyn)> = Tensor::zeros((Const, 3, 4));
        assert_eq!(t.rank(), 3);
        assert_eq!(t.size(), 24);
        assert_eq!(t.extent(2), 4);
        let m = matrix();
        assert_eq!((m.rows(), m.cols()), (2, 2));
    }

    #[test]
    fn test_at_matches_get() {
        let m = matrix();
        assert_eq!(m.at(&[1, 1]), Ok(m.get(&[1, 1])));
        assert_eq!(
            m.at(&[0, 2]),
            Err(TensorError::IndexOutOfBounds {
                indices: vec![0, 2],
                extents: vec![2, 2],
            })
        );
        assert!(m.exists(&[1, 0]));
        assert!(!m.exists(&[2, 0]));
    }

    #[test]
    fn test_at_mut() {
        let mut m = matrix();
        *m.at_mut(&[0, 1]).unwrap() = 9.0;
        assert_eq!(m[[0, 1]], 9.0);
        assert!(m.at_mut(&[5, 0]).is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        let _ = matrix().get(&[2, 0]);
    }

    #[test]
    fn test_fill_on_view() {
        let mut m = matrix();
        m.subview_mut(1).fill(0.0);
        assert_eq!(m.data(), &[1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_dot_conjugates_left() {
        let a = Tensor::from([c64::new(1.0, 1.0), c64::new(0.0, 2.0)]);
        let b = Tensor::from([c64::new(1.0, 0.0), c64::new(1.0, 0.0)]);
        let c = a.dot(&b);
        // conj(1+i) + conj(2i) = 1 - 3i
        assert_eq!(c.value(), c64::new(1.0, -3.0));
    }

    #[test]
    fn test_dot_matrix_vector() {
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
        let y = matrix().dot(&x);
        assert_eq!(y.data(), &[3.0, 7.0]);
    }

    #[test]
    fn test_ddot_and_inner_agree_for_matrices() {
        let a = matrix();
        let b: Tensor<f64, DynExtents2> =
            Tensor::from_vec((2, 2), vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(a.ddot(&b).value(), 70.0);
        assert_eq!(a.inner(&b), 70.0);
    }

    #[test]
    fn test_inner_rank_zero() {
        let a: Tensor<f64, ()> = Tensor::scalar(3.0);
        let b: Tensor<f64, ()> = Tensor::scalar(4.0);
        assert_eq!(a.inner(&b), 12.0);
    }

    #[test]
    fn test_mv_family_real() {
        let a = matrix();
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
        let mut y: Tensor<f64, DynExtents1> = Tensor::zeros((2,));

        a.mv(&x, &mut y);
        assert_eq!(y.data(), &[3.0, 7.0]);
        a.umv(&x, &mut y);
        assert_eq!(y.data(), &[6.0, 14.0]);
        a.mmtv(&x, &mut y);
        assert_eq!(y.data(), &[2.0, 8.0]);
        a.usmv(0.5, &x, &mut y);
        assert_eq!(y.data(), &[3.5, 11.5]);

        a.mtv(&x, &mut y);
        assert_eq!(y.data(), &[4.0, 6.0]);
        a.umtv(&x, &mut y);
        assert_eq!(y.data(), &[8.0, 12.0]);
        a.mmv(&x, &mut y);
        assert_eq!(y.data(), &[5.0, 5.0]);
        a.usmtv(2.0, &x, &mut y);
        assert_eq!(y.data(), &[13.0, 17.0]);
    }

    #[test]
    fn test_mhv_family_complex() {
        let i = c64::new(0.0, 1.0);
        let one = c64::new(1.0, 0.0);
        // A = [[i, 1], [0, i]]
        let a: Tensor<c64, _, _> = Tensor::from([[i, one], [c64::new(0.0, 0.0), i]]);
        let x = Tensor::from([one, one]);
        let mut y: Tensor<c64, DynExtents1> = Tensor::zeros((2,));

        // A^H = [[-i, 0], [1, -i]]
        a.mhv(&x, &mut y);
        assert_eq!(y.data(), &[-i, one - i]);
        a.umhv(&x, &mut y);
        assert_eq!(y.data(), &[-i - i, (one - i) + (one - i)]);
        a.mmhv(&x, &mut y);
        assert_eq!(y.data(), &[-i, one - i]);

        // alpha scales without being conjugated
        y.fill(c64::new(0.0, 0.0));
        a.usmhv(i, &x, &mut y);
        assert_eq!(y.data(), &[i * -i, i * (one - i)]);
    }

    #[test]
    fn test_transposed_view_mv_is_mtv() {
        let a = matrix();
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
        let mut y1: Tensor<f64, DynExtents1> = Tensor::zeros((2,));
        let mut y2: Tensor<f64, DynExtents1> = Tensor::zeros((2,));
        a.transposed().mv(&x, &mut y1);
        a.mtv(&x, &mut y2);
        assert_eq!(y1, y2);
    }

    #[test]
    fn test_hermitian_view_mv_is_mhv() {
        let a: Tensor<c64, _, _> = Tensor::from([
            [c64::new(1.0, 2.0), c64::new(0.0, -1.0)],
            [c64::new(3.0, 0.0), c64::new(2.0, 2.0)],
        ]);
        let x = Tensor::from([c64::new(1.0, 1.0), c64::new(-1.0, 0.5)]);
        let mut y1: Tensor<c64, DynExtents1> = Tensor::zeros((2,));
        let mut y2: Tensor<c64, DynExtents1> = Tensor::zeros((2,));
        a.hermitian().mv(&x, &mut y1);
        a.mhv(&x, &mut y2);
        assert_eq!(y1, y2);
    }

    #[test]
    fn test_mv_into_view() {
        let a = matrix();
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
        let mut out: Tensor<f64, DynExtents2> = Tensor::zeros((2, 2));
        a.mv(&x, &mut out.subview_mut(1));
        assert_eq!(out.data(), &[0.0, 0.0, 3.0, 7.0]);
    }

    #[test]
    fn test_norms() {
        let v: Tensor<f64, _, _> = Tensor::from([3.0, -4.0]);
        assert_eq!(v.two_norm2(), 25.0);
        assert_eq!(v.two_norm(), 5.0);
        assert_eq!(v.infinity_norm(), 4.0);

        let m = matrix();
        assert_relative_eq!(m.frobenius_norm(), 30.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.as_span().frobenius_norm2(), 30.0, epsilon = 1e-12);

        let z = Tensor::from([c64::new(3.0, 4.0)]);
        assert_relative_eq!(z.two_norm(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(z.infinity_norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_of_empty() {
        let t: Tensor<f64, DynExtents1> = Tensor::zeros((0,));
        assert_eq!(t.frobenius_norm(), 0.0);
        assert_eq!(t.infinity_norm(), 0.0);
    }

    #[test]
    fn test_bilinear() {
        let a = matrix();
        let u: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
        let v: Tensor<f64, _, _> = Tensor::from([3.0, 4.0]);
        // u^T A v = [1, 2] . [11, 25]
        assert_eq!(a.bilinear(&u, &v), 61.0);
    }

    #[test]
    fn test_axpy_aypx_on_spans() {
        let mut data = [1.0, 2.0, 3.0];
        let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0, 1.0]);
        let mut y = TensorSpanMut::<'_, f64, (Dyn,)>::from_slice_mut(&mut data, (3,)).unwrap();
        y.axpy(2.0, &x);
        y.aypx(-1.0, &x);
        assert_eq!(data, [-2.0, -3.0, -4.0]);
    }

    #[test]
    fn test_map_inplace() {
        let mut m = matrix();
        m.map_inplace(|x| x * x);
        assert_eq!(m.data(), &[1.0, 4.0, 9.0, 16.0]);
    }
}
