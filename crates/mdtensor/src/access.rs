//! Element access shared by owning tensors, views and the zero tensor.
//!
//! Every tensor-like type implements [`TensorAccess`]: its extents and an
//! unchecked read of the element at a multi-index. Writable types add
//! [`TensorAccessMut`]. Arithmetic, norms and contraction are written once
//! against these two traits.

use crate::extents::Extents;
use crate::scalar::Scalar;

/// The multi-index type of a tensor-like value.
pub type IndexOf<V> = <<V as TensorAccess>::Extents as Extents>::Index;

/// Read access to the elements of a tensor-like value.
pub trait TensorAccess {
    type Element: Scalar;
    type Extents: Extents;

    fn extents(&self) -> Self::Extents;

    /// The element at `index`, by value.
    ///
    /// The index is not checked against the extents beyond what the
    /// underlying buffer enforces.
    fn read(&self, index: &<Self::Extents as Extents>::Index) -> Self::Element;
}

/// Write access to the elements of a tensor-like value.
pub trait TensorAccessMut: TensorAccess {
    fn element_mut(
        &mut self,
        index: &<Self::Extents as Extents>::Index,
    ) -> &mut Self::Element;
}

impl<V: TensorAccess + ?Sized> TensorAccess for &V {
    type Element = V::Element;
    type Extents = V::Extents;

    #[inline]
    fn extents(&self) -> V::Extents {
        (**self).extents()
    }

    #[inline]
    fn read(&self, index: &<V::Extents as Extents>::Index) -> V::Element {
        (**self).read(index)
    }
}

impl<V: TensorAccess + ?Sized> TensorAccess for &mut V {
    type Element = V::Element;
    type Extents = V::Extents;

    #[inline]
    fn extents(&self) -> V::Extents {
        (**self).extents()
    }

    #[inline]
    fn read(&self, index: &<V::Extents as Extents>::Index) -> V::Element {
        (**self).read(index)
    }
}

impl<V: TensorAccessMut + ?Sized> TensorAccessMut for &mut V {
    #[inline]
    fn element_mut(&mut self, index: &<V::Extents as Extents>::Index) -> &mut V::Element {
        (**self).element_mut(index)
    }
}
