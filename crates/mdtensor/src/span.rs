//! Non-owning tensor views.
//!
//! A view is the triple (data handle, mapping, accessor). [`TensorSpan`]
//! reads through a shared handle and is `Clone`; [`TensorSpanMut`] holds an
//! exclusive handle and can write. Neither owns the data, and the borrow
//! checker keeps both from outliving it.
//!
//! # Example
//!
//! ```
//! use mdtensor::prelude::*;
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let view: TensorSpan<'_, f64, (Dyn, Dyn)> = TensorSpan::from_slice(&data, (2, 3)).unwrap();
//! assert_eq!(view.get(&[1, 0]), 4.0);
//!
//! let row = view.subview(1);
//! assert_eq!(row.get(&[2]), 6.0);
//!
//! let t = view.transposed();
//! assert_eq!(t.get(&[0, 1]), 4.0);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::access::{TensorAccess, TensorAccessMut};
use crate::accessor::{Accessor, AccessorMut, ConjAccessor, DefaultAccessor, IteratorAccessor};
use crate::bounds::assert_bounds;
use crate::error::TensorError;
use crate::extents::{Extents, SplitFirst, Transpose};
use crate::layout::{Layout, LayoutRight, LayoutStride, Mapping, RightMapping, StrideMapping};
use crate::scalar::Scalar;

/// A read-only view of tensor data.
///
/// Generic over the layout `L` (row-major by default) and the accessor `A`
/// (plain slice access by default).
pub struct TensorSpan<'a, T, E, L = LayoutRight, A = DefaultAccessor<T>>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    handle: A::Handle<'a>,
    mapping: L::Mapping<E>,
    accessor: A,
}

/// A writable view of tensor data.
pub struct TensorSpanMut<'a, T, E, L = LayoutRight, A = DefaultAccessor<T>>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    handle: A::HandleMut<'a>,
    mapping: L::Mapping<E>,
    accessor: A,
}

fn check_span_len(len: usize, required: usize) -> Result<(), TensorError> {
    if len < required {
        return Err(TensorError::ShapeMismatch {
            expected: required,
            actual: len,
        });
    }
    Ok(())
}

fn swapped_strides<M: Mapping, F: Extents>(mapping: &M) -> F::Index {
    assert!(
        mapping.is_strided(),
        "cannot transpose a mapping without strides"
    );
    let mut strides = F::Index::default();
    strides.as_mut()[0] = mapping.stride(1);
    strides.as_mut()[1] = mapping.stride(0);
    strides
}

impl<'a, T, E, L, A> TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    /// Builds a view from its three parts.
    ///
    /// The handle must reach at least `mapping.required_span_size()`
    /// elements; this is the caller's responsibility.
    pub fn from_parts(handle: A::Handle<'a>, mapping: L::Mapping<E>, accessor: A) -> Self {
        Self {
            handle,
            mapping,
            accessor,
        }
    }

    #[inline]
    pub fn mapping(&self) -> &L::Mapping<E> {
        &self.mapping
    }

    #[inline]
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    #[inline]
    pub fn handle(&self) -> &A::Handle<'a> {
        &self.handle
    }

    /// Rank-(r-1) view with the first index fixed to `i`.
    pub fn subview(&self, i: usize) -> TensorSpan<'a, T, E::Tail, L::Sub, A>
    where
        E: SplitFirst<1>,
    {
        assert_bounds!(
            i < self.mapping.extents().extent(0),
            "sub-view index {} out of range for extent {}",
            i,
            self.mapping.extents().extent(0)
        );
        let handle = self
            .accessor
            .offset(self.handle.clone(), self.mapping.stride(0) * i);
        TensorSpan {
            handle,
            mapping: L::sub_mapping(&self.mapping),
            accessor: self.accessor.clone(),
        }
    }

    /// Rank-2 view with the axes swapped, sharing the data.
    pub fn transposed(&self) -> TensorSpan<'a, T, E::Output, LayoutStride, A>
    where
        E: Transpose,
    {
        let extents = self.mapping.extents().transpose();
        let strides = swapped_strides::<_, E::Output>(&self.mapping);
        TensorSpan {
            handle: self.handle.clone(),
            mapping: StrideMapping::new(extents, strides),
            accessor: self.accessor.clone(),
        }
    }

    /// The single element of a rank-0 view.
    pub fn value(&self) -> T
    where
        E: Extents<Index = [usize; 0]>,
    {
        self.accessor.read(&self.handle, self.mapping.offset(&[]))
    }
}

impl<'a, T: Scalar, E: Extents, L: Layout> TensorSpan<'a, T, E, L> {
    /// Views `data` with the default mapping of `L` for `extents`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if `data` is shorter than the
    /// mapping's required span.
    pub fn from_slice(data: &'a [T], extents: E) -> Result<Self, TensorError> {
        Self::from_slice_with_mapping(data, L::Mapping::<E>::from_extents(extents))
    }

    pub fn from_slice_with_mapping(
        data: &'a [T],
        mapping: L::Mapping<E>,
    ) -> Result<Self, TensorError> {
        check_span_len(data.len(), mapping.required_span_size())?;
        Ok(Self::from_parts(data, mapping, DefaultAccessor::new()))
    }

    /// Rank-2 view of the conjugate transpose, sharing the data.
    pub fn hermitian(&self) -> TensorSpan<'a, T, E::Output, LayoutStride, ConjAccessor<T>>
    where
        E: Transpose,
    {
        let extents = self.mapping.extents().transpose();
        let strides = swapped_strides::<_, E::Output>(&self.mapping);
        TensorSpan {
            handle: self.handle,
            mapping: StrideMapping::new(extents, strides),
            accessor: ConjAccessor::new(),
        }
    }
}

impl<'a, T, E, I> TensorSpan<'a, T, E, LayoutRight, IteratorAccessor<I, T>>
where
    T: Scalar,
    E: Extents,
    I: ExactSizeIterator + Clone + 'a,
    I::Item: Borrow<T>,
{
    /// Views the items of `iter` as a row-major tensor.
    ///
    /// Every read advances a clone of `iter` with `nth`, which is constant
    /// time for slice iterators and integer ranges.
    ///
    /// ```
    /// use mdtensor::accessor::IteratorAccessor;
    /// use mdtensor::layout::LayoutRight;
    /// use mdtensor::prelude::*;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0];
    /// let view = TensorSpan::<'_, f64, (Dyn, Dyn), LayoutRight, IteratorAccessor<_, f64>>::from_iterator(
    ///     data.iter(),
    ///     (2, 2),
    /// )
    /// .unwrap();
    /// assert_eq!(view.read(&[1, 0]), 3.0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if `iter` yields fewer items
    /// than the extents hold.
    pub fn from_iterator(iter: I, extents: E) -> Result<Self, TensorError> {
        let mapping = RightMapping::new(extents);
        check_span_len(iter.len(), mapping.required_span_size())?;
        Ok(Self::from_parts(iter, mapping, IteratorAccessor::new()))
    }
}

impl<'a, T, E, L, A> Clone for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            mapping: self.mapping.clone(),
            accessor: self.accessor.clone(),
        }
    }
}

impl<'a, T, E, L, A> fmt::Debug for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorSpan")
            .field("mapping", &self.mapping)
            .field("accessor", &self.accessor)
            .finish_non_exhaustive()
    }
}

impl<'a, T, E, L, A> TensorAccess for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    type Element = T;
    type Extents = E;

    #[inline]
    fn extents(&self) -> E {
        *self.mapping.extents()
    }

    #[inline]
    fn read(&self, index: &E::Index) -> T {
        self.accessor.read(&self.handle, self.mapping.offset(index))
    }
}

impl<'a, T: Scalar, L: Layout> Deref for TensorSpan<'a, T, (), L> {
    type Target = T;

    fn deref(&self) -> &T {
        self.accessor.access(&self.handle, self.mapping.offset(&[]))
    }
}

impl<'a, T, E, L, A> TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    pub fn from_parts(handle: A::HandleMut<'a>, mapping: L::Mapping<E>, accessor: A) -> Self {
        Self {
            handle,
            mapping,
            accessor,
        }
    }

    #[inline]
    pub fn mapping(&self) -> &L::Mapping<E> {
        &self.mapping
    }

    /// A read-only view of the same data, borrowing this one.
    pub fn as_span(&self) -> TensorSpan<'_, T, E, L, A> {
        TensorSpan {
            handle: A::downgrade(&self.handle),
            mapping: self.mapping.clone(),
            accessor: self.accessor.clone(),
        }
    }

    /// Converts into a read-only view for the full lifetime.
    pub fn into_span(self) -> TensorSpan<'a, T, E, L, A> {
        TensorSpan {
            handle: A::into_shared(self.handle),
            mapping: self.mapping,
            accessor: self.accessor,
        }
    }

    /// A shorter-lived writable view of the same data.
    pub fn reborrow(&mut self) -> TensorSpanMut<'_, T, E, L, A> {
        TensorSpanMut {
            handle: A::reborrow(&mut self.handle),
            mapping: self.mapping.clone(),
            accessor: self.accessor.clone(),
        }
    }

    /// Writable rank-(r-1) view with the first index fixed to `i`.
    pub fn subview_mut(&mut self, i: usize) -> TensorSpanMut<'_, T, E::Tail, L::Sub, A>
    where
        E: SplitFirst<1>,
    {
        self.reborrow().into_subview(i)
    }

    /// Like [`subview_mut`](Self::subview_mut), consuming the view.
    pub fn into_subview(self, i: usize) -> TensorSpanMut<'a, T, E::Tail, L::Sub, A>
    where
        E: SplitFirst<1>,
    {
        assert_bounds!(
            i < self.mapping.extents().extent(0),
            "sub-view index {} out of range for extent {}",
            i,
            self.mapping.extents().extent(0)
        );
        let mapping = L::sub_mapping(&self.mapping);
        let handle = self
            .accessor
            .offset_mut(self.handle, self.mapping.stride(0) * i);
        TensorSpanMut {
            handle,
            mapping,
            accessor: self.accessor,
        }
    }
}

impl<'a, T: Scalar, E: Extents, L: Layout> TensorSpanMut<'a, T, E, L> {
    /// Writable view of `data` with the default mapping of `L`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if `data` is shorter than the
    /// mapping's required span.
    pub fn from_slice_mut(data: &'a mut [T], extents: E) -> Result<Self, TensorError> {
        let mapping = L::Mapping::<E>::from_extents(extents);
        check_span_len(data.len(), mapping.required_span_size())?;
        Ok(Self::from_parts(data, mapping, DefaultAccessor::new()))
    }
}

impl<'a, T, E, L, A> From<TensorSpanMut<'a, T, E, L, A>> for TensorSpan<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    fn from(span: TensorSpanMut<'a, T, E, L, A>) -> Self {
        span.into_span()
    }
}

impl<'a, T, E, L, A> fmt::Debug for TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorSpanMut")
            .field("mapping", &self.mapping)
            .field("accessor", &self.accessor)
            .finish_non_exhaustive()
    }
}

impl<'a, T, E, L, A> TensorAccess for TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    type Element = T;
    type Extents = E;

    #[inline]
    fn extents(&self) -> E {
        *self.mapping.extents()
    }

    #[inline]
    fn read(&self, index: &E::Index) -> T {
        let handle = A::downgrade(&self.handle);
        self.accessor.read(&handle, self.mapping.offset(index))
    }
}

impl<'a, T, E, L, A> TensorAccessMut for TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    #[inline]
    fn element_mut(&mut self, index: &E::Index) -> &mut T {
        let offset = self.mapping.offset(index);
        self.accessor.access_mut(&mut self.handle, offset)
    }
}

impl<'a, T: Scalar, L: Layout> Deref for TensorSpanMut<'a, T, (), L> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.handle[self.mapping.offset(&[])]
    }
}

impl<'a, T: Scalar, L: Layout> DerefMut for TensorSpanMut<'a, T, (), L> {
    fn deref_mut(&mut self) -> &mut T {
        let offset = self.mapping.offset(&[]);
        &mut self.handle[offset]
    }
}
