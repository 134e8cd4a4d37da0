use crate::bounds::assert_bounds;
use crate::extents::Extents;
use crate::layout::right::RightMapping;
use crate::layout::stride::StrideMapping;
use crate::layout::Mapping;
use crate::strides::col_major_strides;

/// Column-major mapping: `offset = Σ i[r] * Π_{k<r} extent(k)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeftMapping<E: Extents> {
    extents: E,
}

impl<E: Extents> LeftMapping<E> {
    pub fn new(extents: E) -> Self {
        Self { extents }
    }

    pub fn strides(&self) -> E::Index {
        col_major_strides(&self.extents)
    }

    /// Builds a column-major mapping from a strided one, asserting in
    /// checked builds that the strides are column-major.
    pub fn from_strided(other: &StrideMapping<E>) -> Self {
        assert_bounds!(
            E::RANK == 0
                || other.extents().size() == 0
                || other.strides() == &col_major_strides(other.extents()),
            "strides {:?} are not column-major for extents {:?}",
            other.strides(),
            other.extents()
        );
        Self::new(*other.extents())
    }

    /// Reinterprets a row-major mapping; both coincide for rank <= 1.
    ///
    /// # Panics
    ///
    /// Panics if `E::RANK > 1`.
    pub fn from_right(other: &RightMapping<E>) -> Self {
        assert!(
            E::RANK <= 1,
            "row-major and column-major mappings differ for rank {}",
            E::RANK
        );
        Self::new(*other.extents())
    }
}

impl<E: Extents> From<E> for LeftMapping<E> {
    fn from(extents: E) -> Self {
        Self::new(extents)
    }
}

impl<E: Extents> Mapping for LeftMapping<E> {
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
        self.extents.size()
    }

    #[inline]
    fn offset(&self, index: &E::Index) -> usize {
        let dims = self.extents.to_array();
        index
            .as_ref()
            .iter()
            .zip(dims.as_ref())
            .rev()
            .fold(0, |acc, (&i, &e)| acc * e + i)
    }

    #[inline]
    fn stride(&self, axis: usize) -> usize {
        self.extents.fwd_product(axis)
    }

    fn is_always_unique() -> bool {
        true
    }

    fn is_always_exhaustive() -> bool {
        true
    }

    fn is_always_strided() -> bool {
        true
    }
}

impl<E: Extents> From<LeftMapping<E>> for StrideMapping<E> {
    fn from(m: LeftMapping<E>) -> Self {
        StrideMapping::new(m.extents, m.strides())
    }
}
