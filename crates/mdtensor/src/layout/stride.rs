use crate::extents::Extents;
use crate::layout::Mapping;
use crate::strides::{linear_offset, row_major_strides, span_size};

/// Mapping with an explicit stride per axis, independent of the extents.
///
/// Uniqueness is assumed: strided views built by this crate (transposes,
/// sub-views of column-major data) never alias. Exhaustiveness is a runtime
/// property, true exactly when the required span equals the element count.
///
/// ```
/// use mdtensor::layout::{Mapping, StrideMapping};
///
/// // every other column of a 3x8 row-major buffer
/// let m = StrideMapping::new((3usize, 4usize), [8, 2]);
/// assert_eq!(m.offset(&[1, 3]), 14);
/// assert_eq!(m.required_span_size(), 23);
/// assert!(!m.is_exhaustive());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StrideMapping<E: Extents> {
    extents: E,
    strides: E::Index,
}

impl<E: Extents> StrideMapping<E> {
    pub fn new(extents: E, strides: E::Index) -> Self {
        Self { extents, strides }
    }

    pub fn strides(&self) -> &E::Index {
        &self.strides
    }
}

impl<E: Extents> From<E> for StrideMapping<E> {
    /// Row-major strides for `extents`.
    fn from(extents: E) -> Self {
        Self::new(extents, row_major_strides(&extents))
    }
}

impl<E: Extents> Mapping for StrideMapping<E> {
    type Extents = E;

    fn from_extents(extents: E) -> Self {
        extents.into()
    }

    #[inline]
    fn extents(&self) -> &E {
        &self.extents
    }

    fn required_span_size(&self) -> usize {
        span_size(self.extents.to_array().as_ref(), self.strides.as_ref())
    }

    #[inline]
    fn offset(&self, index: &E::Index) -> usize {
        linear_offset(index.as_ref(), self.strides.as_ref())
    }

    #[inline]
    fn stride(&self, axis: usize) -> usize {
        self.strides.as_ref()[axis]
    }

    fn is_always_unique() -> bool {
        true
    }

    fn is_always_exhaustive() -> bool {
        false
    }

    fn is_always_strided() -> bool {
        true
    }

    fn is_exhaustive(&self) -> bool {
        E::RANK == 0 || self.required_span_size() == self.extents.size()
    }
}
