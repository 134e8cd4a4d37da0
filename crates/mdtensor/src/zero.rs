//! The zero tensor: a tensor of given extents whose elements are all zero.
//!
//! A [`ZeroTensor`] owns no buffer. It reads through [`ZeroMapping`] and
//! [`ZeroAccessor`], and the algebra involving it takes shortcuts that
//! never touch element data:
//!
//! | expression            | result                              |
//! |-----------------------|-------------------------------------|
//! | `zero + t`, `t + zero`| `t`, moved                          |
//! | `t - zero`            | `t`, moved                          |
//! | `zero - t`            | `-t`                                |
//! | `-zero`, `zero * s`   | `zero`                              |
//! | `zero.dot(t)`, `&t * zero` | zero tensor of the product extents |
//! | `zero.inner(t)`, norms | `0`                                |
//!
//! Mutating operations (`+=`, `fill`, `axpy`, ...) are not implemented, so
//! writing into a zero tensor does not compile.
//!
//! ```
//! use mdtensor::prelude::*;
//!
//! let t: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
//! let zero = ZeroTensor::<f64, (Const<2>,)>::default();
//!
//! let same = zero + t.clone();
//! assert_eq!(same, t);
//! assert_eq!(zero.inner(&t), 0.0);
//! assert_eq!(zero, Tensor::<f64, (Dyn,)>::zeros((2,)));
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::access::{TensorAccess, TensorAccessMut};
use crate::accessor::{Accessor, ZeroAccessor};
use crate::bounds::assert_bounds;
use crate::contract::{ContractExtents, ContractOutput};
use crate::extents::{Combine, Extents, HasRank, StaticExtents};
use crate::layout::{LayoutZero, Mapping, ZeroMapping};
use crate::operations::{map, zero_fill, zip_map, DenseTensorOps, RealOf};
use crate::scalar::{c64, Scalar};
use crate::span::TensorSpan;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

/// A tensor whose elements are all zero, stored as its extents only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroTensor<T: Scalar, E: Extents> {
    mapping: ZeroMapping<E>,
    accessor: ZeroAccessor<T>,
}

fn assert_same<E: Extents, F: Extents>(lhs: &E, rhs: &F) {
    assert_bounds!(
        lhs.same_as(rhs),
        "extents {:?} and {:?} differ",
        lhs,
        rhs
    );
}

impl<T: Scalar, E: Extents> ZeroTensor<T, E> {
    pub fn new(extents: E) -> Self {
        Self {
            mapping: ZeroMapping::new(extents),
            accessor: ZeroAccessor::new(),
        }
    }

    /// A zero tensor built from a fill value, which must be zero.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not the additive identity.
    pub fn with_value(extents: E, value: T) -> Self {
        assert!(
            value == T::zero(),
            "zero tensor cannot hold the value {:?}",
            value
        );
        Self::new(extents)
    }

    #[inline]
    pub fn mapping(&self) -> &ZeroMapping<E> {
        &self.mapping
    }

    #[inline]
    pub fn shape(&self) -> E::Index {
        self.mapping.extents().to_array()
    }

    /// View through the zero layout and accessor.
    pub fn as_span(&self) -> TensorSpan<'static, T, E, LayoutZero, ZeroAccessor<T>> {
        TensorSpan::from_parts((), self.mapping, self.accessor)
    }

    /// A dense tensor of zeros with the same extents.
    pub fn to_tensor(&self) -> Tensor<T, E> {
        Tensor::zeros(*self.mapping.extents())
    }

    /// Zero tensor with the extents of `self.dot(other)` on dense tensors.
    pub fn dot<V>(&self, other: &V) -> ZeroTensor<T, ContractOutput<E, V::Extents, 1>>
    where
        V: TensorAccess<Element = T>,
        E: ContractExtents<V::Extents, 1>,
    {
        ZeroTensor::new(ContractExtents::<V::Extents, 1>::contract_extents(
            self.mapping.extents(),
            &other.extents(),
        ))
    }

    /// Zero tensor with the extents of `self.ddot(other)` on dense tensors.
    pub fn ddot<V>(&self, other: &V) -> ZeroTensor<T, ContractOutput<E, V::Extents, 2>>
    where
        V: TensorAccess<Element = T>,
        E: ContractExtents<V::Extents, 2>,
    {
        ZeroTensor::new(ContractExtents::<V::Extents, 2>::contract_extents(
            self.mapping.extents(),
            &other.extents(),
        ))
    }
}

impl<T: Scalar, E: StaticExtents> Default for ZeroTensor<T, E> {
    fn default() -> Self {
        Self::new(E::new())
    }
}

impl<T: Scalar, E: Extents> TensorAccess for ZeroTensor<T, E> {
    type Element = T;
    type Extents = E;

    #[inline]
    fn extents(&self) -> E {
        *self.mapping.extents()
    }

    #[inline]
    fn read(&self, index: &E::Index) -> T {
        self.accessor.read(&(), self.mapping.offset(index))
    }
}

impl<T: Scalar, E: Extents> DenseTensorOps for ZeroTensor<T, E> {
    fn dot<V>(&self, other: &V) -> Tensor<T, ContractOutput<E, V::Extents, 1>>
    where
        V: TensorAccess<Element = T>,
        E: ContractExtents<V::Extents, 1>,
    {
        ZeroTensor::dot(self, other).to_tensor()
    }

    fn ddot<V>(&self, other: &V) -> Tensor<T, ContractOutput<E, V::Extents, 2>>
    where
        V: TensorAccess<Element = T>,
        E: ContractExtents<V::Extents, 2>,
    {
        ZeroTensor::ddot(self, other).to_tensor()
    }

    fn inner<V>(&self, other: &V) -> T
    where
        V: TensorAccess<Element = T>,
        E: Combine<V::Extents>,
    {
        assert_same(self.mapping.extents(), &other.extents());
        T::zero()
    }

    fn bilinear<U, V>(&self, _u: &U, _v: &V) -> T
    where
        E: HasRank<2>,
        U: TensorAccess<Element = T>,
        U::Extents: HasRank<1>,
        V: TensorAccess<Element = T>,
        V::Extents: HasRank<1>,
    {
        T::zero()
    }

    fn mv<X, Y>(&self, _x: &X, y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
        zero_fill(y);
    }

    fn mtv<X, Y>(&self, _x: &X, y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
        zero_fill(y);
    }

    fn mhv<X, Y>(&self, _x: &X, y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
        zero_fill(y);
    }

    fn umv<X, Y>(&self, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn umtv<X, Y>(&self, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn umhv<X, Y>(&self, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn mmv<X, Y>(&self, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn mmtv<X, Y>(&self, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn mmhv<X, Y>(&self, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn usmv<X, Y>(&self, _alpha: T, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn usmtv<X, Y>(&self, _alpha: T, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn usmhv<X, Y>(&self, _alpha: T, _x: &X, _y: &mut Y)
    where
        E: HasRank<2>,
        X: TensorAccess<Element = T>,
        X::Extents: HasRank<1>,
        Y: TensorAccessMut<Element = T>,
        Y::Extents: HasRank<1>,
    {
    }

    fn frobenius_norm2(&self) -> RealOf<Self> {
        <T::Real as Scalar>::zero()
    }

    fn infinity_norm(&self) -> RealOf<Self> {
        <T::Real as Scalar>::zero()
    }
}

impl<T: Scalar, E: Extents> Neg for ZeroTensor<T, E> {
    type Output = Self;

    fn neg(self) -> Self {
        self
    }
}

impl<T, E, F> Add<ZeroTensor<T, F>> for ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
{
    type Output = ZeroTensor<T, <E as Combine<F>>::Output>;

    fn add(self, rhs: ZeroTensor<T, F>) -> Self::Output {
        ZeroTensor::new(self.mapping.extents().combine(rhs.mapping.extents()))
    }
}

impl<T, E, F> Sub<ZeroTensor<T, F>> for ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
{
    type Output = ZeroTensor<T, <E as Combine<F>>::Output>;

    fn sub(self, rhs: ZeroTensor<T, F>) -> Self::Output {
        ZeroTensor::new(self.mapping.extents().combine(rhs.mapping.extents()))
    }
}

impl<T, E, F, S> Add<Tensor<T, F, S>> for ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
    S: TensorStorage<T>,
{
    type Output = Tensor<T, F, S>;

    fn add(self, rhs: Tensor<T, F, S>) -> Tensor<T, F, S> {
        assert_same(self.mapping.extents(), &rhs.extents());
        rhs
    }
}

impl<T, E, F, S> Sub<Tensor<T, F, S>> for ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
    S: TensorStorage<T>,
{
    type Output = Tensor<T, F, S>;

    fn sub(self, rhs: Tensor<T, F, S>) -> Tensor<T, F, S> {
        assert_same(self.mapping.extents(), &rhs.extents());
        -rhs
    }
}

impl<T, E, F, S> Add<ZeroTensor<T, F>> for Tensor<T, E, S>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
    S: TensorStorage<T>,
{
    type Output = Self;

    fn add(self, rhs: ZeroTensor<T, F>) -> Self {
        assert_same(&self.extents(), rhs.mapping.extents());
        self
    }
}

impl<T, E, F, S> Sub<ZeroTensor<T, F>> for Tensor<T, E, S>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
    S: TensorStorage<T>,
{
    type Output = Self;

    fn sub(self, rhs: ZeroTensor<T, F>) -> Self {
        assert_same(&self.extents(), rhs.mapping.extents());
        self
    }
}

impl<'r, T, E, V> Add<&'r V> for &ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<V::Extents>,
    V: TensorAccess<Element = T>,
{
    type Output = Tensor<T, <E as Combine<V::Extents>>::Output>;

    fn add(self, rhs: &'r V) -> Self::Output {
        zip_map(self, rhs, |_, b| b)
    }
}

impl<'r, T, E, V> Sub<&'r V> for &ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<V::Extents>,
    V: TensorAccess<Element = T>,
{
    type Output = Tensor<T, <E as Combine<V::Extents>>::Output>;

    fn sub(self, rhs: &'r V) -> Self::Output {
        zip_map(self, rhs, |_, b| -b)
    }
}

impl<'r, T, E, V> Mul<&'r V> for ZeroTensor<T, E>
where
    T: Scalar,
    E: ContractExtents<V::Extents, 1>,
    V: TensorAccess<Element = T>,
{
    type Output = ZeroTensor<T, ContractOutput<E, V::Extents, 1>>;

    fn mul(self, rhs: &'r V) -> Self::Output {
        ZeroTensor::new(ContractExtents::<V::Extents, 1>::contract_extents(
            self.mapping.extents(),
            &rhs.extents(),
        ))
    }
}

impl<T, E, F, S> Mul<ZeroTensor<T, F>> for &Tensor<T, E, S>
where
    T: Scalar,
    E: ContractExtents<F, 1>,
    F: Extents,
    S: TensorStorage<T>,
{
    type Output = ZeroTensor<T, ContractOutput<E, F, 1>>;

    fn mul(self, rhs: ZeroTensor<T, F>) -> Self::Output {
        ZeroTensor::new(ContractExtents::<F, 1>::contract_extents(
            &self.extents(),
            rhs.mapping.extents(),
        ))
    }
}

fn all_zero<V: TensorAccess>(v: &V) -> bool {
    let mut zero = true;
    v.extents().for_each_index(|i| {
        if zero && v.read(i) != <V::Element as Scalar>::zero() {
            zero = false;
        }
    });
    zero
}

impl<T, E, F, S> PartialEq<Tensor<T, F, S>> for ZeroTensor<T, E>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents,
    S: TensorStorage<T>,
{
    fn eq(&self, other: &Tensor<T, F, S>) -> bool {
        self.mapping.extents().same_as(&other.extents()) && all_zero(other)
    }
}

impl<T, E, F, S> PartialEq<ZeroTensor<T, F>> for Tensor<T, E, S>
where
    T: Scalar,
    E: Combine<F>,
    F: Extents + Combine<E>,
    S: TensorStorage<T>,
{
    fn eq(&self, other: &ZeroTensor<T, F>) -> bool {
        other == self
    }
}

macro_rules! impl_zero_scalar_ops {
    ($($t:ty),*) => {$(
        impl<E: Extents> Mul<$t> for ZeroTensor<$t, E> {
            type Output = Self;

            fn mul(self, _alpha: $t) -> Self {
                self
            }
        }

        impl<E: Extents> Mul<ZeroTensor<$t, E>> for $t {
            type Output = ZeroTensor<$t, E>;

            fn mul(self, zero: ZeroTensor<$t, E>) -> ZeroTensor<$t, E> {
                zero
            }
        }

        impl<E: Extents> Div<$t> for ZeroTensor<$t, E> {
            type Output = Self;

            fn div(self, _alpha: $t) -> Self {
                self
            }
        }

        impl PartialEq<$t> for ZeroTensor<$t, ()> {
            fn eq(&self, other: &$t) -> bool {
                *other == <$t as Scalar>::zero()
            }
        }
    )*};
}

impl_zero_scalar_ops!(f32, f64, c64);

impl<T, E> std::fmt::Display for ZeroTensor<T, E>
where
    T: Scalar + std::fmt::Display,
    E: Extents,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&map(self, |x| x), f)
    }
}
