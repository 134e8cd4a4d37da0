use crate::bounds::assert_bounds;
use crate::extents::Extents;
use crate::layout::left::LeftMapping;
use crate::layout::stride::StrideMapping;
use crate::layout::Mapping;
use crate::strides::{linear_offset, row_major_strides};

/// Row-major mapping: `offset = Σ i[r] * Π_{k>r} extent(k)`.
///
/// Stores nothing but the extents; strides are derived on demand.
///
/// ```
/// use mdtensor::layout::{Mapping, RightMapping};
///
/// let m = RightMapping::new((2usize, 3usize));
/// assert_eq!(m.offset(&[1, 2]), 5);
/// assert_eq!(m.required_span_size(), 6);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RightMapping<E: Extents> {
    extents: E,
}

impl<E: Extents> RightMapping<E> {
    pub fn new(extents: E) -> Self {
        Self { extents }
    }

    /// All strides at once.
    pub fn strides(&self) -> E::Index {
        row_major_strides(&self.extents)
    }

    /// Builds a row-major mapping from a strided one.
    ///
    /// The strides must be the row-major strides of the extents, which is
    /// asserted in checked builds.
    pub fn from_strided(other: &StrideMapping<E>) -> Self {
        assert_bounds!(
            E::RANK == 0
                || other.extents().size() == 0
                || other.strides() == &row_major_strides(other.extents()),
            "strides {:?} are not row-major for extents {:?}",
            other.strides(),
            other.extents()
        );
        Self::new(*other.extents())
    }

    /// Reinterprets a column-major mapping; both coincide for rank <= 1.
    ///
    /// # Panics
    ///
    /// Panics if `E::RANK > 1`.
    pub fn from_left(other: &LeftMapping<E>) -> Self {
        assert!(
            E::RANK <= 1,
            "column-major and row-major mappings differ for rank {}",
            E::RANK
        );
        Self::new(*other.extents())
    }
}

impl<E: Extents> From<E> for RightMapping<E> {
    fn from(extents: E) -> Self {
        Self::new(extents)
    }
}

impl<E: Extents> Mapping for RightMapping<E> {
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
            .fold(0, |acc, (&i, &e)| acc * e + i)
    }

    #[inline]
    fn stride(&self, axis: usize) -> usize {
        self.extents.rev_product(axis)
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

impl<E: Extents> From<RightMapping<E>> for StrideMapping<E> {
    fn from(m: RightMapping<E>) -> Self {
        StrideMapping::new(m.extents, m.strides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extents::{Const, DynExtents2, DynExtents3};

    #[test]
    fn test_row_major_offset() {
        let m = RightMapping::new((3usize, 4usize));
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(m.offset(&[i, j]), i * 4 + j);
                assert_eq!(m.offset(&[i, j]), linear_offset(&[i, j], &m.strides()));
            }
        }
    }

    #[test]
    fn test_strides() {
        let e: DynExtents3 = (2, 3, 4);
        let m = RightMapping::new(e);
        assert_eq!(m.stride(0), 12);
        assert_eq!(m.stride(1), 4);
        assert_eq!(m.stride(2), 1);
    }

    #[test]
    fn test_rank_zero() {
        let m = RightMapping::new(());
        assert_eq!(m.offset(&[]), 0);
        assert_eq!(m.required_span_size(), 1);
    }

    #[test]
    fn test_traits() {
        let m = RightMapping::new((Const::<2>, Const::<2>));
        assert!(m.is_unique());
        assert!(m.is_exhaustive());
        assert!(m.is_strided());
    }

    #[test]
    fn test_to_and_from_stride() {
        let e: DynExtents2 = (2, 5);
        let s: StrideMapping<DynExtents2> = RightMapping::new(e).into();
        assert_eq!(s.strides(), &[5, 1]);
        assert_eq!(RightMapping::from_strided(&s), RightMapping::new(e));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not row-major")]
    fn test_from_wrong_strides() {
        let s = StrideMapping::new((2usize, 5usize), [1, 2]);
        let _ = RightMapping::from_strided(&s);
    }

    #[test]
    fn test_from_left_rank_one() {
        let l = LeftMapping::new((7usize,));
        assert_eq!(RightMapping::from_left(&l).offset(&[3]), 3);
    }

    #[test]
    #[should_panic(expected = "differ for rank 2")]
    fn test_from_left_rank_two_panics() {
        let l = LeftMapping::new((2usize, 2usize));
        let _ = RightMapping::from_left(&l);
    }
}
