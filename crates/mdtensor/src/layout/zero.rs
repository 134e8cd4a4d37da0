use crate::extents::Extents;
use crate::layout::Mapping;

/// Mapping that sends every multi-index to offset 0.
///
/// Backs the zero tensor, which has no buffer at all: the required span is
/// 0 and the accessor never looks at the handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroMapping<E: Extents> {
    extents: E,
}

impl<E: Extents> ZeroMapping<E> {
    pub fn new(extents: E) -> Self {
        Self { extents }
    }
}

impl<E: Extents> From<E> for ZeroMapping<E> {
    fn from(extents: E) -> Self {
        Self::new(extents)
    }
}

impl<E: Extents> Mapping for ZeroMapping<E> {
    type Extents = E;

    fn from_extents(extents: E) -> Self {
        Self::new(extents)
    }

    #[inline]
    fn extents(&self) -> &E {
        &self.extents
    }

    #[inline]
    fn required_span_size(&self) -> usize {
        0
    }

    #[inline]
    fn offset(&self, _index: &E::Index) -> usize {
        0
    }

    #[inline]
    fn stride(&self, _axis: usize) -> usize {
        0
    }

    fn is_always_unique() -> bool {
        E::RANK == 0
    }

    fn is_always_exhaustive() -> bool {
        true
    }

    fn is_always_strided() -> bool {
        false
    }
}
