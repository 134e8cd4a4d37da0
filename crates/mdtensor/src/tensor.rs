//! Owning tensor type with typed extents and polymorphic storage.
//!
//! ```text
//! Tensor<T, E, S>
//! ├── DenseTensor<T, E>        = Tensor<T, E, Dense<T>>      heap buffer
//! └── FixedTensor<T, E, N>     = Tensor<T, E, Fixed<T, N>>   inline buffer
//! ```
//!
//! Constructors taking extents default to `Dense` storage. Array literals
//! (`Tensor::from([[1.0, 2.0], [3.0, 4.0]])`) know their size and build
//! `Fixed` storage.
//!
//! Elements are stored row-major. Views over the buffer are obtained with
//! [`Tensor::as_span`] and [`Tensor::as_span_mut`].

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Index, IndexMut};

use tracing::debug;

use crate::access::{TensorAccess, TensorAccessMut};
use crate::accessor::{ConjAccessor, DefaultAccessor};
use crate::bounds::assert_bounds;
use crate::error::TensorError;
use crate::extents::{Combine, Const, Extents, SplitFirst, StaticExtents, Transpose};
use crate::layout::{LayoutStride, Mapping, RightMapping};
use crate::scalar::Scalar;
use crate::span::{TensorSpan, TensorSpanMut};
use crate::storage::{Dense, Fixed, ResizableStorage, TensorStorage};

/// An owning n-dimensional tensor.
///
/// `E` is the extents type, a tuple of [`Const`] and [`Dyn`](crate::extents::Dyn)
/// dimensions. The storage type `S` holds exactly
/// `mapping().required_span_size()` elements.
#[derive(Debug, Clone)]
pub struct Tensor<T: Scalar, E: Extents, S: TensorStorage<T> = Dense<T>> {
    storage: S,
    mapping: RightMapping<E>,
    _phantom: PhantomData<T>,
}

/// Tensor with a heap buffer.
pub type DenseTensor<T, E> = Tensor<T, E, Dense<T>>;

/// Tensor with an inline buffer of `N` elements, for fully static extents.
pub type FixedTensor<T, E, const N: usize> = Tensor<T, E, Fixed<T, N>>;

impl<T: Scalar, E: Extents, S: TensorStorage<T>> Tensor<T, E, S> {
    /// Create a zero-initialized tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let t: Tensor<f64, (Const<2>, Dyn)> = Tensor::zeros((Const, 3));
    /// assert_eq!(t.shape(), [2, 3]);
    /// assert_eq!(t.size(), 6);
    /// ```
    pub fn zeros(extents: E) -> Self {
        Self::from_elem(extents, T::zero())
    }

    /// Same as [`zeros`](Self::zeros).
    pub fn new(extents: E) -> Self {
        Self::zeros(extents)
    }

    /// Create a tensor with every element set to `value`.
    pub fn from_elem(extents: E, value: T) -> Self {
        let mapping = RightMapping::new(extents);
        Self {
            storage: S::from_elem(mapping.required_span_size(), value),
            mapping,
            _phantom: PhantomData,
        }
    }

    /// Create a tensor from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if `data.len()` is not the
    /// number of elements of `extents`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let t: Tensor<f64, (Dyn, Dyn)> =
    ///     Tensor::from_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(t[[0, 2]], 3.0);
    /// assert_eq!(t[[1, 0]], 4.0);
    /// ```
    pub fn from_vec(extents: E, data: Vec<T>) -> Result<Self, TensorError> {
        let mapping = RightMapping::new(extents);
        let expected = mapping.required_span_size();
        if data.len() != expected {
            return Err(TensorError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            storage: S::from_vec(data),
            mapping,
            _phantom: PhantomData,
        })
    }

    /// Create a tensor whose element at each multi-index is `f(index)`.
    pub fn from_fn<F>(extents: E, mut f: F) -> Self
    where
        F: FnMut(&E::Index) -> T,
    {
        let mut data = Vec::with_capacity(extents.size());
        extents.for_each_index(|idx| data.push(f(idx)));
        Self {
            storage: S::from_vec(data),
            mapping: RightMapping::new(extents),
            _phantom: PhantomData,
        }
    }

    /// Copy any tensor-like value with compatible extents.
    ///
    /// Static axes of `E` must match the source, at compile time where both
    /// are static and by assertion otherwise.
    pub fn from_view<V>(view: &V) -> Self
    where
        V: TensorAccess<Element = T>,
        V::Extents: Combine<E>,
    {
        let extents: E = view.extents().convert();
        let mut data = Vec::with_capacity(extents.size());
        view.extents()
            .for_each_index(|idx| data.push(view.read(idx)));
        Self {
            storage: S::from_vec(data),
            mapping: RightMapping::new(extents),
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn mapping(&self) -> &RightMapping<E> {
        &self.mapping
    }

    /// All extents as an array.
    #[inline]
    pub fn shape(&self) -> E::Index {
        self.mapping.extents().to_array()
    }

    /// Get underlying data as slice, in row-major order.
    #[inline]
    pub fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get underlying data as mutable slice.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read-only view of the whole tensor.
    pub fn as_span(&self) -> TensorSpan<'_, T, E> {
        TensorSpan::from_parts(self.storage.as_slice(), self.mapping, DefaultAccessor::new())
    }

    /// Writable view of the whole tensor.
    pub fn as_span_mut(&mut self) -> TensorSpanMut<'_, T, E> {
        TensorSpanMut::from_parts(
            self.storage.as_mut_slice(),
            self.mapping,
            DefaultAccessor::new(),
        )
    }

    /// Rank-(r-1) view with the first index fixed to `i`.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let t: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
    /// let row = t.subview(1);
    /// assert_eq!(row.get(&[0]), 3.0);
    /// ```
    pub fn subview(&self, i: usize) -> TensorSpan<'_, T, E::Tail>
    where
        E: SplitFirst<1>,
    {
        self.as_span().subview(i)
    }

    /// Writable rank-(r-1) view with the first index fixed to `i`.
    pub fn subview_mut(&mut self, i: usize) -> TensorSpanMut<'_, T, E::Tail>
    where
        E: SplitFirst<1>,
    {
        self.as_span_mut().into_subview(i)
    }

    /// Rank-2 transpose as a strided view.
    pub fn transposed(&self) -> TensorSpan<'_, T, E::Output, LayoutStride>
    where
        E: Transpose,
    {
        self.as_span().transposed()
    }

    /// Rank-2 conjugate transpose as a view.
    pub fn hermitian(&self) -> TensorSpan<'_, T, E::Output, LayoutStride, ConjAccessor<T>>
    where
        E: Transpose,
    {
        self.as_span().hermitian()
    }
}

impl<T: Scalar, E: Extents, S: ResizableStorage<T>> Tensor<T, E, S> {
    /// Change the extents, reallocating the buffer.
    ///
    /// The buffer is resized to the new element count; positions past the
    /// old length are set to `value`. Elements are not moved, so for rank
    /// above 1 surviving values do not keep their multi-index. Outstanding
    /// views are invalidated by the borrow checker.
    ///
    /// Static axes cannot change: `E` is fixed, so resizing a fully static
    /// tensor can only restate its extents. Fully static tensors should use
    /// [`Fixed`] storage, which has no `resize` at all.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    ///
    /// let mut t: Tensor<f64, (Dyn,)> = Tensor::from_vec((2,), vec![1.0, 2.0]).unwrap();
    /// t.resize((5,), 0.0);
    /// assert_eq!(t.size(), 5);
    /// assert_eq!(t.get(&[4]), 0.0);
    /// ```
    pub fn resize(&mut self, extents: E, value: T) {
        let mapping = RightMapping::new(extents);
        debug!(
            old = ?self.mapping.extents(),
            new = ?extents,
            "resizing tensor"
        );
        self.storage.resize(mapping.required_span_size(), value);
        self.mapping = mapping;
    }

    /// Resize, filling new positions with zero.
    pub fn resize_default(&mut self, extents: E) {
        self.resize(extents, T::zero());
    }
}

impl<T: Scalar, E: StaticExtents, S: TensorStorage<T>> Default for Tensor<T, E, S> {
    fn default() -> Self {
        Self::zeros(E::new())
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> TensorAccess for Tensor<T, E, S> {
    type Element = T;
    type Extents = E;

    #[inline]
    fn extents(&self) -> E {
        *self.mapping.extents()
    }

    #[inline]
    fn read(&self, index: &E::Index) -> T {
        self.storage.as_slice()[self.mapping.offset(index)]
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> TensorAccessMut for Tensor<T, E, S> {
    #[inline]
    fn element_mut(&mut self, index: &E::Index) -> &mut T {
        let offset = self.mapping.offset(index);
        &mut self.storage.as_mut_slice()[offset]
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> Index<E::Index> for Tensor<T, E, S> {
    type Output = T;

    #[inline]
    fn index(&self, index: E::Index) -> &T {
        assert_bounds!(
            self.mapping.extents().contains(index.as_ref()),
            "index {:?} out of range for extents {:?}",
            index,
            self.mapping.extents()
        );
        &self.storage.as_slice()[self.mapping.offset(&index)]
    }
}

impl<T: Scalar, E: Extents, S: TensorStorage<T>> IndexMut<E::Index> for Tensor<T, E, S> {
    #[inline]
    fn index_mut(&mut self, index: E::Index) -> &mut T {
        assert_bounds!(
            self.mapping.extents().contains(index.as_ref()),
            "index {:?} out of range for extents {:?}",
            index,
            self.mapping.extents()
        );
        self.element_mut(&index)
    }
}

impl<T: Scalar, S: TensorStorage<T>> Tensor<T, (), S> {
    /// Create a rank-0 tensor holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::from_elem((), value)
    }

    /// The single element of a rank-0 tensor.
    pub fn value(&self) -> T {
        self.storage.as_slice()[0]
    }
}

impl<T: Scalar, S: TensorStorage<T>> Deref for Tensor<T, (), S> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.storage.as_slice()[0]
    }
}

impl<T: Scalar, S: TensorStorage<T>> DerefMut for Tensor<T, (), S> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.storage.as_mut_slice()[0]
    }
}

impl<'a, T: Scalar, E: Extents, S: TensorStorage<T>> From<&'a Tensor<T, E, S>>
    for TensorSpan<'a, T, E>
{
    fn from(tensor: &'a Tensor<T, E, S>) -> Self {
        tensor.as_span()
    }
}

impl<'a, T: Scalar, E: Extents, S: TensorStorage<T>> From<&'a mut Tensor<T, E, S>>
    for TensorSpanMut<'a, T, E>
{
    fn from(tensor: &'a mut Tensor<T, E, S>) -> Self {
        tensor.as_span_mut()
    }
}

/// A rank-1 array literal becomes a static vector with inline storage.
impl<T: Scalar, const N: usize> From<[T; N]> for Tensor<T, (Const<N>,), Fixed<T, N>> {
    fn from(data: [T; N]) -> Self {
        Self {
            storage: Fixed::from(data),
            mapping: RightMapping::new((Const,)),
            _phantom: PhantomData,
        }
    }
}

/// A rank-2 array literal becomes a static matrix with inline storage,
/// rows kept in order.
impl<T: Scalar, const R: usize, const C: usize> From<[[T; C]; R]>
    for Tensor<T, (Const<R>, Const<C>), Fixed<T, R, C>>
{
    fn from(data: [[T; C]; R]) -> Self {
        Self {
            storage: Fixed::from_array(data),
            mapping: RightMapping::new((Const, Const)),
            _phantom: PhantomData,
        }
    }
}
