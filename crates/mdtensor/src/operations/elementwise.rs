//! Elementwise arithmetic, scaling by scalars, and equality.
//!
//! Binary `+` and `-` take any tensor-like right operand of the same rank
//! and produce a new [`Tensor`] whose extents are the
//! [`Combine`](crate::extents::Combine) of the operand extents: an axis is
//! static in the result if it is static in either operand. Mismatched
//! static axes do not compile; mismatched runtime extents are asserted in
//! checked builds. The `try_*` methods check the extents at runtime and
//! return `TensorError::ExtentsMismatch` instead.
//!
//! ```
//! use mdtensor::prelude::*;
//!
//! let a: Tensor<f64, (Const<2>, Dyn)> = Tensor::from_vec((Const, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b: Tensor<f64, (Dyn, Const<2>)> = Tensor::from_vec((2, Const), vec![4.0, 3.0, 2.0, 1.0]).unwrap();
//!
//! let c: Tensor<f64, (Const<2>, Const<2>)> = &a + &b;
//! assert_eq!(c.data(), &[5.0, 5.0, 5.0, 5.0]);
//!
//! let d = &(2.0 * &a) - &b;
//! assert_eq!(d.data(), &[-2.0, 1.0, 4.0, 7.0]);
//! ```

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::access::TensorAccess;
use crate::accessor::{Accessor, AccessorMut};
use crate::contract::{tensordot_n, ContractExtents, ContractOutput};
use crate::error::TensorError;
use crate::extents::{reindex, Combine, Extents};
use crate::layout::Layout;
use crate::operations::DenseTensorOpsMut;
use crate::scalar::{c64, Scalar};
use crate::span::{TensorSpan, TensorSpanMut};
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

/// Check that two extents have equal rank and equal sizes.
///
/// # Errors
///
/// Returns `TensorError::ExtentsMismatch` with both shapes otherwise.
pub fn check_same_extents<E: Extents, F: Extents>(lhs: &E, rhs: &F) -> Result<(), TensorError> {
    if lhs.same_as(rhs) {
        Ok(())
    } else {
        Err(TensorError::ExtentsMismatch {
            lhs: lhs.to_array().as_ref().to_vec(),
            rhs: rhs.to_array().as_ref().to_vec(),
        })
    }
}

/// `f(a[i], b[i])` at every multi-index, into a new tensor.
pub(crate) fn zip_map<A, B, F>(
    a: &A,
    b: &B,
    mut f: F,
) -> Tensor<A::Element, <A::Extents as Combine<B::Extents>>::Output>
where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
    A::Extents: Combine<B::Extents>,
    F: FnMut(A::Element, A::Element) -> A::Element,
{
    let extents = a.extents().combine(&b.extents());
    Tensor::from_fn(extents, |i| {
        f(a.read(&reindex(i.as_ref())), b.read(&reindex(i.as_ref())))
    })
}

/// `f(a[i])` at every multi-index, into a new tensor.
pub(crate) fn map<A, F>(a: &A, mut f: F) -> Tensor<A::Element, A::Extents>
where
    A: TensorAccess,
    F: FnMut(A::Element) -> A::Element,
{
    Tensor::from_fn(a.extents(), |i| f(a.read(i)))
}

/// Whether `a` and `b` have the same extents and equal elements.
pub(crate) fn elements_eq<A, B>(a: &A, b: &B) -> bool
where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
{
    let extents = a.extents();
    if !extents.same_as(&b.extents()) {
        return false;
    }
    let mut equal = true;
    extents.for_each_index(|i| {
        if equal && a.read(i) != b.read(&reindex(i.as_ref())) {
            equal = false;
        }
    });
    equal
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> Tensor<T, E, S> {
    /// `self + rhs`, with the extents checked at runtime.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ExtentsMismatch` if the runtime extents differ.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    /// use mdtensor::TensorError;
    ///
    /// let a: Tensor<f64, (Dyn,)> = Tensor::from_elem((2,), 1.0);
    /// let b: Tensor<f64, (Dyn,)> = Tensor::from_elem((3,), 1.0);
    /// assert_eq!(
    ///     a.try_add(&b).unwrap_err(),
    ///     TensorError::ExtentsMismatch { lhs: vec![2], rhs: vec![3] }
    /// );
    /// ```
    pub fn try_add<V>(&self, rhs: &V) -> Result<Tensor<T, <E as Combine<V::Extents>>::Output>, TensorError>
    where
        V: TensorAccess<Element = T>,
        E: Combine<V::Extents>,
    {
        check_same_extents(&self.extents(), &rhs.extents())?;
        Ok(zip_map(self, rhs, |a, b| a + b))
    }

    /// `self - rhs`, with the extents checked at runtime.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ExtentsMismatch` if the runtime extents differ.
    pub fn try_sub<V>(&self, rhs: &V) -> Result<Tensor<T, <E as Combine<V::Extents>>::Output>, TensorError>
    where
        V: TensorAccess<Element = T>,
        E: Combine<V::Extents>,
    {
        check_same_extents(&self.extents(), &rhs.extents())?;
        Ok(zip_map(self, rhs, |a, b| a - b))
    }

    /// `self += rhs`, with the extents checked at runtime.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ExtentsMismatch` and leaves `self` untouched if
    /// the runtime extents differ.
    pub fn try_add_assign<V>(&mut self, rhs: &V) -> Result<(), TensorError>
    where
        V: TensorAccess<Element = T>,
        E: Combine<V::Extents>,
    {
        check_same_extents(&self.extents(), &rhs.extents())?;
        self.zip_apply(rhs, |a, b| a + b);
        Ok(())
    }

    /// `self -= rhs`, with the extents checked at runtime.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ExtentsMismatch` and leaves `self` untouched if
    /// the runtime extents differ.
    pub fn try_sub_assign<V>(&mut self, rhs: &V) -> Result<(), TensorError>
    where
        V: TensorAccess<Element = T>,
        E: Combine<V::Extents>,
    {
        check_same_extents(&self.extents(), &rhs.extents())?;
        self.zip_apply(rhs, |a, b| a - b);
        Ok(())
    }
}

// Binary operators on borrowed tensors and views. The right operand is any
// tensor-like reference.
macro_rules! impl_binary_ops {
    (impl[$($g:tt)*] $lhs:ty where [$($w:tt)*]) => {
        impl<'r, $($g)*, V> Add<&'r V> for &$lhs
        where
            V: TensorAccess<Element = T>,
            E: Combine<V::Extents>,
            $($w)*
        {
            type Output = Tensor<T, <E as Combine<V::Extents>>::Output>;

            fn add(self, rhs: &'r V) -> Self::Output {
                zip_map(self, rhs, |a, b| a + b)
            }
        }

        impl<'r, $($g)*, V> Sub<&'r V> for &$lhs
        where
            V: TensorAccess<Element = T>,
            E: Combine<V::Extents>,
            $($w)*
        {
            type Output = Tensor<T, <E as Combine<V::Extents>>::Output>;

            fn sub(self, rhs: &'r V) -> Self::Output {
                zip_map(self, rhs, |a, b| a - b)
            }
        }

        // Tensor product: contraction of the last axis of the left operand
        // with the first axis of the right one.
        impl<'r, $($g)*, V> Mul<&'r V> for &$lhs
        where
            V: TensorAccess<Element = T>,
            E: ContractExtents<V::Extents, 1>,
            $($w)*
        {
            type Output = Tensor<T, ContractOutput<E, V::Extents, 1>>;

            fn mul(self, rhs: &'r V) -> Self::Output {
                tensordot_n::<1, _, _>(self, rhs)
            }
        }

        impl<$($g)*> Neg for &$lhs
        where
            $($w)*
        {
            type Output = Tensor<T, E>;

            fn neg(self) -> Tensor<T, E> {
                map(self, |x| -x)
            }
        }
    };
}

impl_binary_ops!(impl[T, E, S] Tensor<T, E, S> where [T: Scalar, E: Extents, S: TensorStorage<T>]);
impl_binary_ops!(
    impl['a, T, E, L, A] TensorSpan<'a, T, E, L, A>
    where [T: Scalar, E: Extents, L: Layout, A: Accessor<Element = T> + 'a]
);

impl<T: Scalar, E: Extents, S: TensorStorage<T>> Neg for Tensor<T, E, S> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.map_inplace(|x| -x);
        self
    }
}

// Compound assignment on owning tensors and writable views.
macro_rules! impl_assign_ops {
    (impl[$($g:tt)*] $lhs:ty where [$($w:tt)*]) => {
        impl<'r, $($g)*, V> AddAssign<&'r V> for $lhs
        where
            V: TensorAccess<Element = T>,
            E: Combine<V::Extents>,
            $($w)*
        {
            fn add_assign(&mut self, rhs: &'r V) {
                self.zip_apply(rhs, |a, b| a + b);
            }
        }

        impl<'r, $($g)*, V> SubAssign<&'r V> for $lhs
        where
            V: TensorAccess<Element = T>,
            E: Combine<V::Extents>,
            $($w)*
        {
            fn sub_assign(&mut self, rhs: &'r V) {
                self.zip_apply(rhs, |a, b| a - b);
            }
        }

        impl<$($g)*> MulAssign<T> for $lhs
        where
            $($w)*
        {
            fn mul_assign(&mut self, alpha: T) {
                self.map_inplace(|x| x * alpha);
            }
        }

        impl<$($g)*> DivAssign<T> for $lhs
        where
            $($w)*
        {
            fn div_assign(&mut self, alpha: T) {
                self.map_inplace(|x| x / alpha);
            }
        }
    };
}

impl_assign_ops!(impl[T, E, S] Tensor<T, E, S> where [T: Scalar, E: Extents, S: TensorStorage<T>]);
impl_assign_ops!(
    impl['a, T, E, L, A] TensorSpanMut<'a, T, E, L, A>
    where [T: Scalar, E: Extents, L: Layout, A: AccessorMut<Element = T> + 'a]
);

// Scalar operands are spelled per element type: a blanket `T * Tensor<T>`
// would need a foreign trait implemented for an uncovered type parameter.
macro_rules! impl_scalar_ops {
    ($($t:ty),*) => {$(
        impl<E: Extents, S: TensorStorage<$t>> Mul<$t> for Tensor<$t, E, S> {
            type Output = Self;

            fn mul(mut self, alpha: $t) -> Self {
                self *= alpha;
                self
            }
        }

        impl<E: Extents, S: TensorStorage<$t>> Mul<Tensor<$t, E, S>> for $t {
            type Output = Tensor<$t, E, S>;

            fn mul(self, mut tensor: Tensor<$t, E, S>) -> Tensor<$t, E, S> {
                tensor.map_inplace(|x| self * x);
                tensor
            }
        }

        impl<E: Extents, S: TensorStorage<$t>> Div<$t> for Tensor<$t, E, S> {
            type Output = Self;

            fn div(mut self, alpha: $t) -> Self {
                self /= alpha;
                self
            }
        }

        impl<E: Extents, S: TensorStorage<$t>> Mul<$t> for &Tensor<$t, E, S> {
            type Output = Tensor<$t, E>;

            fn mul(self, alpha: $t) -> Tensor<$t, E> {
                map(self, |x| x * alpha)
            }
        }

        impl<'t, E: Extents, S: TensorStorage<$t>> Mul<&'t Tensor<$t, E, S>> for $t {
            type Output = Tensor<$t, E>;

            fn mul(self, tensor: &'t Tensor<$t, E, S>) -> Tensor<$t, E> {
                map(tensor, |x| self * x)
            }
        }

        impl<E: Extents, S: TensorStorage<$t>> Div<$t> for &Tensor<$t, E, S> {
            type Output = Tensor<$t, E>;

            fn div(self, alpha: $t) -> Tensor<$t, E> {
                map(self, |x| x / alpha)
            }
        }

        impl<'a, E, L, A> Mul<$t> for &TensorSpan<'a, $t, E, L, A>
        where
            E: Extents,
            L: Layout,
            A: Accessor<Element = $t> + 'a,
        {
            type Output = Tensor<$t, E>;

            fn mul(self, alpha: $t) -> Tensor<$t, E> {
                map(self, |x| x * alpha)
            }
        }

        impl<'t, 'a, E, L, A> Mul<&'t TensorSpan<'a, $t, E, L, A>> for $t
        where
            E: Extents,
            L: Layout,
            A: Accessor<Element = $t> + 'a,
        {
            type Output = Tensor<$t, E>;

            fn mul(self, span: &'t TensorSpan<'a, $t, E, L, A>) -> Tensor<$t, E> {
                map(span, |x| self * x)
            }
        }

        impl<'a, E, L, A> Div<$t> for &TensorSpan<'a, $t, E, L, A>
        where
            E: Extents,
            L: Layout,
            A: Accessor<Element = $t> + 'a,
        {
            type Output = Tensor<$t, E>;

            fn div(self, alpha: $t) -> Tensor<$t, E> {
                map(self, |x| x / alpha)
            }
        }

        impl<S: TensorStorage<$t>> PartialEq<$t> for Tensor<$t, (), S> {
            fn eq(&self, other: &$t) -> bool {
                self.value() == *other
            }
        }

        impl<S: TensorStorage<$t>> PartialEq<Tensor<$t, (), S>> for $t {
            fn eq(&self, other: &Tensor<$t, (), S>) -> bool {
                *self == other.value()
            }
        }

        impl<'a, L, A> PartialEq<$t> for TensorSpan<'a, $t, (), L, A>
        where
            L: Layout,
            A: Accessor<Element = $t> + 'a,
        {
            fn eq(&self, other: &$t) -> bool {
                self.value() == *other
            }
        }

        impl<'a, L, A> PartialEq<TensorSpan<'a, $t, (), L, A>> for $t
        where
            L: Layout,
            A: Accessor<Element = $t> + 'a,
        {
            fn eq(&self, other: &TensorSpan<'a, $t, (), L, A>) -> bool {
                *self == other.value()
            }
        }
    )*};
}

impl_scalar_ops!(f32, f64, c64);

impl<T, E, S, S2> PartialEq<Tensor<T, E, S2>> for Tensor<T, E, S>
where
    T: Scalar,
    E: Extents,
    S: TensorStorage<T>,
    S2: TensorStorage<T>,
{
    fn eq(&self, other: &Tensor<T, E, S2>) -> bool {
        elements_eq(self, other)
    }
}

impl<'a, T, E, S, L, A> PartialEq<TensorSpan<'a, T, E, L, A>> for Tensor<T, E, S>
where
    T: Scalar,
    E: Extents,
    S: TensorStorage<T>,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    fn eq(&self, other: &TensorSpan<'a, T, E, L, A>) -> bool {
        elements_eq(self, other)
    }
}

impl<'a, T, E, S, L, A> PartialEq<Tensor<T, E, S>> for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    S: TensorStorage<T>,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    fn eq(&self, other: &Tensor<T, E, S>) -> bool {
        elements_eq(self, other)
    }
}

impl<'a, 'b, T, E, L, A, L2, A2> PartialEq<TensorSpan<'b, T, E, L2, A2>> for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
    L2: Layout,
    A2: Accessor<Element = T> + 'b,
{
    fn eq(&self, other: &TensorSpan<'b, T, E, L2, A2>) -> bool {
        elements_eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extents::{Const, Dyn, DynExtents1, DynExtents2};
    use crate::layout::LayoutLeft;
    use crate::operations::DenseTensorOps;

    fn dyn_matrix(data: [f64; 4]) -> Tensor<f64, DynExtents2> {
        Tensor::from_vec((2, 2), data.to_vec()).unwrap()
    }

    #[test]
    fn test_add_sub_combines_extents() {
        let a: Tensor<f64, (Const<2>, Dyn)> = Tensor::from_elem((Const, 3), 1.0);
        let b: Tensor<f64, (Dyn, Const<3>)> = Tensor::from_elem((2, Const), 2.0);
        let c: Tensor<f64, (Const<2>, Const<3>)> = &a + &b;
        assert!(c.data().iter().all(|&x| x == 3.0));
        let d = &a - &b;
        assert_eq!(d.shape(), [2, 3]);
        assert!(d.data().iter().all(|&x| x == -1.0));
    }

    #[test]
    fn test_add_across_layouts() {
        let a = dyn_matrix([1.0, 2.0, 3.0, 4.0]);
        let col_major = [1.0, 3.0, 2.0, 4.0];
        let b: TensorSpan<'_, f64, DynExtents2, LayoutLeft> =
            TensorSpan::from_slice(&col_major, (2, 2)).unwrap();
        let c = &a + &b;
        assert_eq!(c.data(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(b, a);
        assert_eq!(a, b);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "differ")]
    fn test_add_mismatched_runtime_extents() {
        let a: Tensor<f64, DynExtents1> = Tensor::zeros((2,));
        let b: Tensor<f64, DynExtents1> = Tensor::zeros((3,));
        let _ = &a + &b;
    }

    #[test]
    fn test_try_variants() {
        let mut a: Tensor<f64, DynExtents1> = Tensor::from_elem((2,), 1.0);
        let b: Tensor<f64, DynExtents1> = Tensor::from_elem((3,), 1.0);
        let ok: Tensor<f64, DynExtents1> = Tensor::from_elem((2,), 5.0);

        assert!(matches!(a.try_sub(&b), Err(TensorError::ExtentsMismatch { .. })));
        assert!(a.try_add_assign(&b).is_err());
        assert_eq!(a.data(), &[1.0, 1.0]);

        a.try_add_assign(&ok).unwrap();
        assert_eq!(a.data(), &[6.0, 6.0]);
        a.try_sub_assign(&ok).unwrap();
        assert_eq!(a.try_add(&ok).unwrap().data(), &[6.0, 6.0]);
    }

    #[test]
    fn test_compound_assignment() {
        let mut a = dyn_matrix([1.0, 2.0, 3.0, 4.0]);
        let b = dyn_matrix([1.0, 1.0, 1.0, 1.0]);
        a += &b;
        assert_eq!(a.data(), &[2.0, 3.0, 4.0, 5.0]);
        a -= &b.as_span();
        a *= 2.0;
        a /= 4.0;
        assert_eq!(a.data(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_assign_into_subview() {
        let mut a = dyn_matrix([1.0, 2.0, 3.0, 4.0]);
        let row: Tensor<f64, _, _> = Tensor::from([10.0, 20.0]);
        let mut second = a.subview_mut(1);
        second += &row;
        second *= 0.5;
        assert_eq!(a.data(), &[1.0, 2.0, 6.5, 12.0]);
    }

    #[test]
    fn test_negation() {
        let a = dyn_matrix([1.0, -2.0, 0.0, 4.0]);
        let n = -&a;
        assert_eq!(n.data(), &[-1.0, 2.0, 0.0, -4.0]);
        assert_eq!(-(-a.clone()), a);
        assert_eq!(-&a.as_span(), n);
    }

    #[test]
    fn test_scalar_products() {
        let a: Tensor<f64, _, _> = Tensor::from([1.0, 2.0]);
        assert_eq!((&a * 3.0).data(), &[3.0, 6.0]);
        assert_eq!((3.0 * &a).data(), &[3.0, 6.0]);
        assert_eq!((&a / 2.0).data(), &[0.5, 1.0]);
        assert_eq!((a.clone() * 2.0).data(), &[2.0, 4.0]);
        assert_eq!((2.0 * a.clone()).data(), &[2.0, 4.0]);
        assert_eq!((a.clone() / 2.0).data(), &[0.5, 1.0]);
        assert_eq!((&a.as_span() * 2.0).data(), &[2.0, 4.0]);
        assert_eq!((2.0 * &a.as_span()).data(), &[2.0, 4.0]);

        let z = Tensor::from([c64::new(1.0, 1.0)]);
        assert_eq!((c64::new(0.0, 1.0) * &z).data(), &[c64::new(-1.0, 1.0)]);
    }

    #[test]
    fn test_tensor_product_operator() {
        let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
        let b: Tensor<f64, _, _> = Tensor::from([[5.0, 6.0], [7.0, 8.0]]);
        let c = &a * &b;
        assert_eq!(c.data(), &[19.0, 22.0, 43.0, 50.0]);
        let v = &a.as_span() * &Tensor::<f64, (Dyn,)>::from_elem((2,), 1.0);
        assert_eq!(v.data(), &[3.0, 7.0]);
    }

    #[test]
    fn test_rank_zero_scalar_equality() {
        let t: Tensor<f64, ()> = Tensor::scalar(42.0);
        assert!(t == 42.0);
        assert!(42.0 == t);
        assert!(t != 41.0);
        assert_eq!(*t, 42.0);
        assert!(t.as_span() == 42.0);
        assert!(42.0 == t.as_span());
    }

    #[test]
    fn test_equality_checks_extents() {
        let a: Tensor<f64, DynExtents1> = Tensor::zeros((2,));
        let b: Tensor<f64, DynExtents1> = Tensor::zeros((3,));
        assert_ne!(a, b);
        assert_eq!(a, Tensor::<f64, DynExtents1>::zeros((2,)));
    }

    #[test]
    fn test_check_same_extents() {
        assert!(check_same_extents(&(Const::<2>,), &(2 as Dyn,)).is_ok());
        assert_eq!(
            check_same_extents(&(2 as Dyn, 3 as Dyn), &(2 as Dyn,)),
            Err(TensorError::ExtentsMismatch {
                lhs: vec![2, 3],
                rhs: vec![2],
            })
        );
    }

    #[test]
    fn test_frobenius_after_ops() {
        let a = dyn_matrix([1.0, 0.0, 0.0, 1.0]);
        let two = &a + &a;
        assert_eq!(two.frobenius_norm2(), 8.0);
    }
}
