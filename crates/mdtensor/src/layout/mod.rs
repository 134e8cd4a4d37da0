//! Layout mappings: from a multi-index to a linear buffer offset.
//!
//! ```text
//! Layout (policy, zero-sized)      Mapping<E> (value: extents [+ strides])
//! ├── LayoutRight                  RightMapping<E>   row-major
//! ├── LayoutLeft                   LeftMapping<E>    column-major
//! ├── LayoutStride                 StrideMapping<E>  explicit strides
//! └── LayoutZero                   ZeroMapping<E>    every offset is 0
//! ```
//!
//! A layout is a type-level policy that names a family of mappings, one per
//! extents type. Views are generic over the layout; the mapping is what they
//! store.

mod left;
mod right;
mod stride;
mod zero;

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use crate::extents::{Extents, SplitFirst};

pub use left::LeftMapping;
pub use right::RightMapping;
pub use stride::StrideMapping;
pub use zero::ZeroMapping;

/// A function from multi-indices of one extents value to buffer offsets.
pub trait Mapping: Clone + Debug + PartialEq + Send + Sync {
    type Extents: Extents;

    /// The default mapping for `extents`.
    fn from_extents(extents: Self::Extents) -> Self;

    fn extents(&self) -> &Self::Extents;

    /// Minimum buffer length covering every offset the mapping produces.
    fn required_span_size(&self) -> usize;

    /// Linear offset of `index`. The index is not checked against the extents.
    fn offset(&self, index: &<Self::Extents as Extents>::Index) -> usize;

    /// Distance in the buffer between neighbours along `axis`.
    ///
    /// Requires `axis < RANK`.
    fn stride(&self, axis: usize) -> usize;

    /// Whether every mapping of this type sends distinct indices to distinct
    /// offsets.
    fn is_always_unique() -> bool;

    /// Whether every mapping of this type covers `0..required_span_size()`.
    fn is_always_exhaustive() -> bool;

    /// Whether every mapping of this type is described by per-axis strides.
    fn is_always_strided() -> bool;

    fn is_unique(&self) -> bool {
        Self::is_always_unique()
    }

    fn is_exhaustive(&self) -> bool {
        Self::is_always_exhaustive()
    }

    fn is_strided(&self) -> bool {
        Self::is_always_strided()
    }

    /// Whether `other` has the same extents values and the same stride
    /// along every axis, whatever the extents types and layouts.
    ///
    /// ```
    /// use mdtensor::extents::Const;
    /// use mdtensor::layout::{LeftMapping, Mapping, RightMapping};
    ///
    /// let dynamic = RightMapping::new((2usize, 3usize));
    /// let fixed = RightMapping::new((Const::<2>, 3usize));
    /// assert!(dynamic.same_as(&fixed));
    /// assert!(!dynamic.same_as(&LeftMapping::new((2usize, 3usize))));
    /// ```
    fn same_as<M: Mapping>(&self, other: &M) -> bool {
        self.extents().same_as(other.extents())
            && (0..<Self::Extents as Extents>::RANK).all(|axis| self.stride(axis) == other.stride(axis))
    }
}

// Mappings of one family compare across extents types by value.
macro_rules! impl_mapping_eq {
    ($($mapping:ident),*) => {
        $(
            impl<E: Extents, F: Extents> PartialEq<$mapping<F>> for $mapping<E> {
                fn eq(&self, other: &$mapping<F>) -> bool {
                    self.same_as(other)
                }
            }

            impl<E: Extents> Eq for $mapping<E> {}

            impl<E: Extents> Hash for $mapping<E> {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.extents().hash(state);
                }
            }
        )*
    };
}

impl_mapping_eq!(RightMapping, LeftMapping, StrideMapping, ZeroMapping);

/// A layout policy: a family of mappings indexed by extents type.
pub trait Layout: Copy + Debug + Default + Send + Sync + 'static {
    type Mapping<E: Extents>: Mapping<Extents = E>;

    /// Layout of the sub-view obtained by fixing the first index.
    type Sub: Layout;

    /// Mapping of the sub-view obtained by fixing the first index.
    ///
    /// The sub-view starts `mapping.stride(0) * i` elements into the buffer.
    fn sub_mapping<E: SplitFirst<1>>(
        mapping: &Self::Mapping<E>,
    ) -> <Self::Sub as Layout>::Mapping<E::Tail>;
}

/// Row-major layout: the rightmost index varies fastest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutRight;

/// Column-major layout: the leftmost index varies fastest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutLeft;

/// Layout with explicit per-axis strides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutStride;

/// Layout mapping every index to offset 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutZero;

fn tail_strides<E: SplitFirst<1>>(strides: &E::Index) -> <E::Tail as Extents>::Index {
    let mut tail = <E::Tail as Extents>::Index::default();
    tail.as_mut().copy_from_slice(&strides.as_ref()[1..]);
    tail
}

impl Layout for LayoutRight {
    type Mapping<E: Extents> = RightMapping<E>;
    type Sub = LayoutRight;

    fn sub_mapping<E: SplitFirst<1>>(mapping: &RightMapping<E>) -> RightMapping<E::Tail> {
        let (_, tail) = mapping.extents().split_first();
        RightMapping::new(tail)
    }
}

impl Layout for LayoutLeft {
    type Mapping<E: Extents> = LeftMapping<E>;
    type Sub = LayoutStride;

    fn sub_mapping<E: SplitFirst<1>>(mapping: &LeftMapping<E>) -> StrideMapping<E::Tail> {
        let (_, tail) = mapping.extents().split_first();
        let strides = crate::strides::col_major_strides(mapping.extents());
        StrideMapping::new(tail, tail_strides::<E>(&strides))
    }
}

impl Layout for LayoutStride {
    type Mapping<E: Extents> = StrideMapping<E>;
    type Sub = LayoutStride;

    fn sub_mapping<E: SplitFirst<1>>(mapping: &StrideMapping<E>) -> StrideMapping<E::Tail> {
        let (_, tail) = mapping.extents().split_first();
        StrideMapping::new(tail, tail_strides::<E>(mapping.strides()))
    }
}

impl Layout for LayoutZero {
    type Mapping<E: Extents> = ZeroMapping<E>;
    type Sub = LayoutZero;

    fn sub_mapping<E: SplitFirst<1>>(mapping: &ZeroMapping<E>) -> ZeroMapping<E::Tail> {
        let (_, tail) = mapping.extents().split_first();
        ZeroMapping::new(tail)
    }
}
