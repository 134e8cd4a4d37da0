//! Accessor policies: from a data handle and a linear offset to an element.
//!
//! An accessor pairs a handle type (a slice, an iterator, nothing) with the
//! rule that reads through it. The reference type is associated with the
//! accessor and may be a real reference or a value: reading code borrows
//! the element through [`Borrow`] and never assumes there is a place in
//! memory behind it.
//!
//! | accessor             | handle        | reference | writable |
//! |----------------------|---------------|-----------|----------|
//! | [`DefaultAccessor`]  | `&[T]`        | `&T`      | yes      |
//! | [`IteratorAccessor`] | `I: Iterator` | `T`       | no       |
//! | [`ConjAccessor`]     | `&[T]`        | `T`       | no       |
//! | [`ZeroAccessor`]     | `()`          | `T`       | no       |

use std::borrow::Borrow;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::scalar::Scalar;

/// Read access to elements through a data handle.
pub trait Accessor: Clone + Debug + Default {
    type Element: Scalar;

    /// Data handle; advancing it yields the handle of a sub-view.
    type Handle<'a>: Clone
    where
        Self: 'a;

    /// What `access` returns: a reference or an element by value.
    type Reference<'a>: Borrow<Self::Element>
    where
        Self: 'a;

    /// The element `i` positions past `handle`.
    fn access<'a>(&self, handle: &Self::Handle<'a>, i: usize) -> Self::Reference<'a>;

    /// The handle advanced by `i` positions.
    fn offset<'a>(&self, handle: Self::Handle<'a>, i: usize) -> Self::Handle<'a>;

    /// Reads the element `i` positions past `handle` by value.
    #[inline]
    fn read(&self, handle: &Self::Handle<'_>, i: usize) -> Self::Element {
        *self.access(handle, i).borrow()
    }
}

/// Write access through an exclusive data handle.
pub trait AccessorMut: Accessor {
    type HandleMut<'a>
    where
        Self: 'a;

    fn access_mut<'b>(
        &self,
        handle: &'b mut Self::HandleMut<'_>,
        i: usize,
    ) -> &'b mut Self::Element;

    fn offset_mut<'a>(&self, handle: Self::HandleMut<'a>, i: usize) -> Self::HandleMut<'a>;

    /// Borrows the exclusive handle for a shorter lifetime.
    fn reborrow<'b, 'a: 'b>(handle: &'b mut Self::HandleMut<'a>) -> Self::HandleMut<'b>;

    /// A shared handle reading the same data.
    fn downgrade<'b, 'a: 'b>(handle: &'b Self::HandleMut<'a>) -> Self::Handle<'b>;

    /// Gives up exclusivity for the full lifetime of the handle.
    fn into_shared<'a>(handle: Self::HandleMut<'a>) -> Self::Handle<'a>;
}

/// Plain slice access: the handle is a slice, references are `&T`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultAccessor<T> {
    _marker: PhantomData<T>,
}

impl<T> DefaultAccessor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Scalar> Accessor for DefaultAccessor<T> {
    type Element = T;
    type Handle<'a> = &'a [T];
    type Reference<'a> = &'a T;

    #[inline]
    fn access<'a>(&self, handle: &Self::Handle<'a>, i: usize) -> Self::Reference<'a> {
        let data: &'a [T] = *handle;
        &data[i]
    }

    #[inline]
    fn offset<'a>(&self, handle: Self::Handle<'a>, i: usize) -> Self::Handle<'a> {
        &handle[i..]
    }
}

impl<T: Scalar> AccessorMut for DefaultAccessor<T> {
    type HandleMut<'a> = &'a mut [T];

    #[inline]
    fn access_mut<'b>(&self, handle: &'b mut &mut [T], i: usize) -> &'b mut T {
        &mut handle[i]
    }

    #[inline]
    fn offset_mut<'a>(&self, handle: Self::HandleMut<'a>, i: usize) -> Self::HandleMut<'a> {
        &mut handle[i..]
    }

    #[inline]
    fn reborrow<'b, 'a: 'b>(handle: &'b mut &'a mut [T]) -> &'b mut [T] {
        handle
    }

    #[inline]
    fn downgrade<'b, 'a: 'b>(handle: &'b &'a mut [T]) -> &'b [T] {
        handle
    }

    #[inline]
    fn into_shared<'a>(handle: Self::HandleMut<'a>) -> Self::Handle<'a> {
        handle
    }
}

/// Read-only access through a cloneable iterator.
///
/// `access(h, i)` is the `i`-th item of a fresh clone of `h`, reached with
/// `nth`: constant time for slice iterators and ranges, linear in `i` for
/// adaptors that only step. [`TensorSpan::from_iterator`] builds checked
/// views with it.
///
/// [`TensorSpan::from_iterator`]: crate::span::TensorSpan::from_iterator
///
/// ```
/// use mdtensor::accessor::{Accessor, IteratorAccessor};
///
/// let squares = [0.0, 1.0, 4.0, 9.0, 16.0];
/// let acc = IteratorAccessor::<std::slice::Iter<'_, f64>, f64>::new();
/// assert_eq!(acc.read(&squares.iter(), 4), 16.0);
/// let shifted = acc.offset(squares.iter(), 2);
/// assert_eq!(acc.read(&shifted, 0), 4.0);
/// ```
pub struct IteratorAccessor<I, T> {
    _marker: PhantomData<fn() -> (I, T)>,
}

impl<I, T> IteratorAccessor<I, T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<I, T> Default for IteratorAccessor<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T> Clone for IteratorAccessor<I, T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<I, T> Debug for IteratorAccessor<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IteratorAccessor")
    }
}

impl<I, T> Accessor for IteratorAccessor<I, T>
where
    I: Iterator + Clone,
    I::Item: Borrow<T>,
    T: Scalar,
{
    type Element = T;
    type Handle<'a>
        = I
    where
        Self: 'a;
    type Reference<'a>
        = T
    where
        Self: 'a;

    fn access<'a>(&self, handle: &Self::Handle<'a>, i: usize) -> Self::Reference<'a>
    where
        Self: 'a,
    {
        match handle.clone().nth(i) {
            Some(item) => *item.borrow(),
            None => panic!("iterator exhausted before position {}", i),
        }
    }

    fn offset<'a>(&self, handle: Self::Handle<'a>, i: usize) -> Self::Handle<'a>
    where
        Self: 'a,
    {
        let mut it = handle;
        if i > 0 {
            let _ = it.nth(i - 1);
        }
        it
    }
}

/// Reads the complex conjugate of each element, by value.
///
/// Viewing a matrix through its transpose mapping and this accessor gives
/// the Hermitian adjoint without copying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConjAccessor<T> {
    _marker: PhantomData<T>,
}

impl<T> ConjAccessor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Scalar> Accessor for ConjAccessor<T> {
    type Element = T;
    type Handle<'a> = &'a [T];
    type Reference<'a> = T;

    #[inline]
    fn access<'a>(&self, handle: &Self::Handle<'a>, i: usize) -> Self::Reference<'a> {
        handle[i].conj()
    }

    #[inline]
    fn offset<'a>(&self, handle: Self::Handle<'a>, i: usize) -> Self::Handle<'a> {
        &handle[i..]
    }
}

impl<T> From<DefaultAccessor<T>> for ConjAccessor<T> {
    fn from(_: DefaultAccessor<T>) -> Self {
        Self::new()
    }
}

/// Ignores the handle and the offset; every element is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroAccessor<T> {
    _marker: PhantomData<T>,
}

impl<T> ZeroAccessor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Scalar> Accessor for ZeroAccessor<T> {
    type Element = T;
    type Handle<'a> = ();
    type Reference<'a> = T;

    #[inline]
    fn access<'a>(&self, _handle: &Self::Handle<'a>, _i: usize) -> Self::Reference<'a> {
        T::zero()
    }

    #[inline]
    fn offset<'a>(&self, _handle: Self::Handle<'a>, _i: usize) -> Self::Handle<'a> {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    #[test]
    fn test_default_access_and_offset() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let acc = DefaultAccessor::<f64>::new();
        let h: &[f64] = &data;
        assert_eq!(*acc.access(&h, 2), 3.0);
        let h2 = acc.offset(h, 1);
        assert_eq!(acc.read(&h2, 0), 2.0);
    }

    #[test]
    fn test_default_access_mut() {
        let mut data = [1.0, 2.0, 3.0];
        let acc = DefaultAccessor::<f64>::new();
        let mut h: &mut [f64] = &mut data;
        *acc.access_mut(&mut h, 1) = 9.0;
        {
            let mut sub = acc.offset_mut(DefaultAccessor::<f64>::reborrow(&mut h), 2);
            *acc.access_mut(&mut sub, 0) = 7.0;
        }
        let shared = DefaultAccessor::<f64>::downgrade(&h);
        assert_eq!(shared, &[1.0, 9.0, 7.0]);
    }

    #[test]
    fn test_iterator_accessor() {
        let values = vec![1.0, 2.0, 3.0];
        let acc = IteratorAccessor::<std::slice::Iter<'_, f64>, f64>::default();
        assert_eq!(acc.read(&values.iter(), 2), 3.0);
        let rest = acc.offset(values.iter(), 1);
        assert_eq!(acc.read(&rest, 1), 3.0);
    }

    #[test]
    #[should_panic(expected = "iterator exhausted")]
    fn test_iterator_accessor_past_end() {
        let values = [1.0];
        let acc = IteratorAccessor::<std::slice::Iter<'_, f64>, f64>::new();
        let _ = acc.read(&values.iter(), 3);
    }

    #[test]
    fn test_conj_accessor() {
        let data = [c64::new(1.0, 2.0)];
        let acc = ConjAccessor::<c64>::new();
        let h: &[c64] = &data;
        assert_eq!(acc.access(&h, 0), c64::new(1.0, -2.0));
    }

    #[test]
    fn test_zero_accessor() {
        let acc = ZeroAccessor::<f64>::new();
        assert_eq!(acc.access(&(), 123), 0.0);
        acc.offset((), 5);
    }
}
