//! Tests for layout mappings and accessors.
//!
//! Covers:
//! - offsets of row-major, column-major, strided and zero mappings
//! - conversions between mappings
//! - views over column-major, strided and iterator-backed data

use mdtensor::accessor::{ConjAccessor, IteratorAccessor};
use mdtensor::layout::{
    LayoutLeft, LayoutRight, LayoutStride, LeftMapping, Mapping, RightMapping, StrideMapping,
    ZeroMapping,
};
use mdtensor::prelude::*;
use proptest::prelude::*;

fn offsets<M: Mapping>(mapping: &M) -> Vec<usize> {
    let mut out = Vec::new();
    mapping
        .extents()
        .for_each_index(|i| out.push(mapping.offset(i)));
    out
}

#[test]
fn test_layout_properties() {
    assert!(RightMapping::<DynExtents2>::is_always_exhaustive());
    assert!(LeftMapping::<DynExtents2>::is_always_unique());
    assert!(StrideMapping::<DynExtents2>::is_always_strided());
    assert!(!StrideMapping::<DynExtents2>::is_always_exhaustive());
    assert!(!ZeroMapping::<DynExtents2>::is_always_unique());
    assert!(ZeroMapping::<()>::is_always_unique());
}

#[test]
fn test_static_extents_mapping() {
    let m = LeftMapping::new((Const::<2>, Const::<3>, Const::<4>));
    assert_eq!(m.offset(&[1, 2, 3]), 1 + 2 * 2 + 3 * 6);
    assert_eq!(m.strides(), [1, 2, 6]);
    assert_eq!(m.required_span_size(), 24);
}

#[test]
fn test_mapping_conversions() {
    let right = RightMapping::new((2usize, 3usize));
    let strided: StrideMapping<_> = right.into();
    assert_eq!(strided.strides(), &[3, 1]);
    assert_eq!(RightMapping::from_strided(&strided), right);

    let left = LeftMapping::new((2usize, 3usize));
    let strided: StrideMapping<_> = left.into();
    assert_eq!(strided.strides(), &[1, 2]);
    assert_eq!(LeftMapping::from_strided(&strided), left);

    let vector = RightMapping::new((5usize,));
    assert_eq!(offsets(&LeftMapping::from_right(&vector)), offsets(&vector));
}

#[test]
#[should_panic(expected = "differ for rank 2")]
fn test_row_to_column_major_rank_two_panics() {
    let _ = LeftMapping::from_right(&RightMapping::new((2usize, 2usize)));
}

#[test]
fn test_column_major_span_matches_transpose() {
    // column-major storage of [[1, 2, 3], [4, 5, 6]]
    let data = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
    let left: TensorSpan<'_, f64, DynExtents2, LayoutLeft> =
        TensorSpan::from_slice(&data, (2, 3)).unwrap();
    let right: TensorSpan<'_, f64, DynExtents2, LayoutRight> =
        TensorSpan::from_slice(&data, (3, 2)).unwrap();

    assert_eq!(left.get(&[0, 2]), 3.0);
    assert_eq!(left, right.transposed());

    // sub-views of column-major data are strided
    let row = left.subview(1);
    assert_eq!(row.mapping().strides(), &[2]);
    assert_eq!(row.get(&[1]), 5.0);
}

#[test]
fn test_padded_strided_span() {
    // 2x2 block out of a 2x3 buffer
    let data = [1.0, 2.0, -1.0, 3.0, 4.0, -1.0];
    let mapping = StrideMapping::new((2usize, 2usize), [3, 1]);
    let span: TensorSpan<'_, f64, DynExtents2, LayoutStride> =
        TensorSpan::from_slice_with_mapping(&data, mapping).unwrap();
    assert!(!span.mapping().is_exhaustive());
    assert_eq!(span.frobenius_norm2(), 30.0);
    assert_eq!(Tensor::<f64, DynExtents2>::from_view(&span).data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_iterator_accessor_span() {
    let values = vec![1.0, 2.0, 3.0, 4.0];
    let span: TensorSpan<'_, f64, DynExtents2, LayoutRight, IteratorAccessor<std::slice::Iter<'_, f64>, f64>> =
        TensorSpan::from_parts(values.iter(), RightMapping::new((2, 2)), IteratorAccessor::new());
    assert_eq!(span.get(&[1, 0]), 3.0);
    assert_eq!(span.subview(1).get(&[1]), 4.0);
    let owned: Tensor<f64, DynExtents2> = Tensor::from_view(&span);
    assert_eq!(owned.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_conj_accessor_span() {
    let data = [c64::new(1.0, 1.0), c64::new(0.0, -2.0)];
    let span: TensorSpan<'_, c64, DynExtents1, LayoutRight, ConjAccessor<c64>> =
        TensorSpan::from_parts(&data[..], RightMapping::new((2,)), ConjAccessor::new());
    assert_eq!(span.get(&[0]), c64::new(1.0, -1.0));
    assert_eq!(span.get(&[1]), c64::new(0.0, 2.0));
}

#[test]
fn test_zero_mapping() {
    let m = ZeroMapping::new((3usize, Const::<4>));
    assert_eq!(m.required_span_size(), 0);
    assert!(offsets(&m).iter().all(|&o| o == 0));
    assert_eq!(offsets(&m).len(), 12);
}

proptest! {
    /// Row-major offsets enumerate 0..size in index order.
    #[test]
    fn prop_right_offsets_are_sequential(d0 in 0usize..5, d1 in 0usize..5, d2 in 0usize..5) {
        let m = RightMapping::new((d0, d1, d2));
        let expected: Vec<usize> = (0..d0 * d1 * d2).collect();
        prop_assert_eq!(offsets(&m), expected);
        prop_assert_eq!(m.required_span_size(), d0 * d1 * d2);
    }

    /// Column-major offsets are a permutation of 0..size matching the
    /// column-major formula.
    #[test]
    fn prop_left_offsets_are_a_permutation(d0 in 1usize..5, d1 in 1usize..5, d2 in 1usize..5) {
        let m = LeftMapping::new((d0, d1, d2));
        let mut seen = offsets(&m);
        let mut formula = Vec::new();
        (d0, d1, d2).for_each_index(|&[i, j, k]| formula.push(i + d0 * (j + d1 * k)));
        prop_assert_eq!(&seen, &formula);
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..d0 * d1 * d2).collect::<Vec<_>>());
    }

    /// Converting to a strided mapping preserves every offset.
    #[test]
    fn prop_strided_conversion_preserves_offsets(d0 in 0usize..5, d1 in 0usize..5) {
        let right = RightMapping::new((d0, d1));
        let left = LeftMapping::new((d0, d1));
        prop_assert_eq!(offsets(&StrideMapping::from(right)), offsets(&right));
        prop_assert_eq!(offsets(&StrideMapping::from(left)), offsets(&left));
    }
}
