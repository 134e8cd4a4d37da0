//! Tests for Tensor, TensorSpan and the dense operations.
//!
//! Covers:
//! - construction (extents, fill value, nested lists, views, arrays)
//! - checked and unchecked element access
//! - sub-views, transposed and Hermitian views
//! - elementwise arithmetic with combined extents
//! - products, matrix-vector family and norms for f64 and c64

use approx::assert_relative_eq;
use mdtensor::prelude::*;
use mdtensor::storage::Fixed;
use mdtensor::{FixedTensor, TensorError};

fn matrix() -> Tensor<f64, DynExtents2> {
    Tensor::from_nested(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap()
}

#[test]
fn test_construction_forms() {
    let a: Tensor<f64, (Const<2>, Dyn)> = Tensor::new((Const, 3));
    assert_eq!(a.shape(), [2, 3]);
    assert_eq!(a.rank(), 2);

    let b: Tensor<f64, DynExtents2> = Tensor::from_elem((2, 2), 1.5);
    assert!(b.data().iter().all(|&x| x == 1.5));

    let c: Tensor<f64, (Const<2>, Const<3>)> = Tensor::from_view(&matrix());
    assert_eq!(c.data(), matrix().data());

    let d: Tensor<f64, DynExtents2> = Tensor::from_view(&matrix().transposed());
    assert_eq!(d.shape(), [3, 2]);
    assert_eq!(d.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

    let e: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    assert_eq!(e.data(), matrix().data());
}

#[test]
fn test_fixed_storage_tensor() {
    let t: FixedTensor<f64, (Const<2>, Const<2>), 4> =
        Tensor::from_fn(Default::default(), |&[i, j]| (i * 2 + j) as f64);
    assert_eq!(t.data(), &[0.0, 1.0, 2.0, 3.0]);
    let u: Tensor<f64, (Const<2>, Const<2>), Fixed<f64, 4>> = Tensor::default();
    assert_eq!(u.frobenius_norm(), 0.0);
}

#[test]
fn test_from_vec_errors() {
    let err = Tensor::<f64, DynExtents2>::from_vec((2, 2), vec![1.0; 3]).unwrap_err();
    assert_eq!(
        err,
        TensorError::ShapeMismatch {
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn test_nested_errors() {
    assert!(matches!(
        Tensor::<f64, (Const<2>, Dyn)>::from_nested(&[[1.0], [2.0], [3.0]]),
        Err(TensorError::ListLengthMismatch { axis: 0, expected: 2, actual: 3 })
    ));
    assert!(matches!(
        Tensor::<f64, DynExtents1>::from_nested(&[[1.0]]),
        Err(TensorError::RankMismatch { expected: 1, actual: 2 })
    ));
}

#[test]
fn test_element_access() {
    let mut t = matrix();
    assert_eq!(t[[1, 2]], 6.0);
    assert_eq!(t.get(&[0, 1]), 2.0);
    assert_eq!(t.at(&[1, 0]), Ok(4.0));
    assert!(t.at(&[0, 3]).is_err());

    t[[0, 0]] = 10.0;
    *t.at_mut(&[1, 1]).unwrap() += 1.0;
    assert_eq!(t.data(), &[10.0, 2.0, 3.0, 4.0, 6.0, 6.0]);

    let err = t.at_mut(&[2, 0]).unwrap_err();
    assert!(err.to_string().starts_with("Indices out of bounds"));
}

#[test]
fn test_rank_zero_tensor() {
    let mut s: Tensor<c64, ()> = Tensor::scalar(c64::new(1.0, 2.0));
    assert_eq!(*s, c64::new(1.0, 2.0));
    assert_eq!(s, c64::new(1.0, 2.0));
    assert_eq!(c64::new(1.0, 2.0), s);
    *s = c64::new(0.0, 0.0);
    assert_eq!(s.value(), c64::new(0.0, 0.0));
    assert_eq!(s.size(), 1);
}

#[test]
fn test_resize_dynamic() {
    let mut t: Tensor<f64, (Dyn, Const<2>)> = Tensor::from_elem((1, Const), 1.0);
    t.resize((3, Const), 2.0);
    assert_eq!(t.shape(), [3, 2]);
    assert_eq!(t.data(), &[1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
    t.resize_default((0, Const));
    assert_eq!(t.size(), 0);
}

#[test]
fn test_subviews() {
    let mut t: Tensor<f64, DynExtents3> =
        Tensor::from_fn((2, 2, 3), |&[i, j, k]| (i * 6 + j * 3 + k) as f64);

    let plane = t.subview(1);
    assert_eq!((plane.extent(0), plane.extent(1)), (2, 3));
    assert_eq!(plane.subview(1).get(&[2]), 11.0);

    let mut row = t.subview_mut(0).into_subview(1);
    row.fill(-1.0);
    assert_eq!(t.subview(0).subview(1).get(&[0]), -1.0);
    assert_eq!(t[[0, 1, 2]], -1.0);
    assert_eq!(t[[0, 0, 2]], 2.0);
}

#[test]
fn test_views_share_data() {
    let data = vec![1.0, 2.0, 3.0, 4.0];
    let span: TensorSpan<'_, f64, DynExtents2> = TensorSpan::from_slice(&data, (2, 2)).unwrap();
    let copy = Tensor::<f64, DynExtents2>::from_view(&span);
    assert_eq!(span, copy);
    assert_eq!(copy, span);

    let short = [1.0, 2.0, 3.0];
    let err = TensorSpan::<'_, f64, DynExtents2>::from_slice(&short, (2, 2)).unwrap_err();
    assert_eq!(err, TensorError::ShapeMismatch { expected: 4, actual: 3 });
}

#[test]
fn test_mut_span_converts_to_read_only() {
    let mut data = vec![0.0; 4];
    let mut span: TensorSpanMut<'_, f64, DynExtents1> =
        TensorSpanMut::from_slice_mut(&mut data, (4,)).unwrap();
    span.fill(3.0);
    let read: TensorSpan<'_, f64, DynExtents1> = span.into();
    assert_eq!(read.frobenius_norm2(), 36.0);
}

#[test]
fn test_elementwise_combines_extents() {
    let a: Tensor<f64, (Const<2>, Dyn)> = Tensor::from_elem((Const, 3), 1.0);
    let b = matrix();
    let c: Tensor<f64, (Const<2>, Dyn)> = &a + &b;
    assert_eq!(c.data(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

    let d = &b - &a.as_span();
    assert_eq!(d.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    let mut e = b.clone();
    e += &a;
    e -= &b;
    assert_eq!(e.data(), a.data());

    e *= 4.0;
    e /= 2.0;
    assert_eq!(e.data(), &[2.0; 6]);
    let ones: Tensor<f64, DynExtents2> = Tensor::from_elem((2, 3), 1.0);
    assert_eq!(&e / 2.0, ones);
    assert_eq!(-&e, -2.0 * &ones);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "differ")]
fn test_elementwise_runtime_mismatch_asserts() {
    let a: Tensor<f64, DynExtents2> = Tensor::zeros((2, 3));
    let b: Tensor<f64, DynExtents2> = Tensor::zeros((3, 2));
    let _ = &a + &b;
}

#[test]
fn test_try_variants_report_mismatch() {
    let mut a: Tensor<f64, DynExtents2> = Tensor::zeros((2, 3));
    let b: Tensor<f64, DynExtents2> = Tensor::zeros((3, 2));
    assert!(matches!(a.try_add(&b), Err(TensorError::ExtentsMismatch { .. })));
    assert!(a.try_sub_assign(&b).is_err());
    assert!(a.try_add_assign(&matrix()).is_ok());
    assert_eq!(a, matrix());
}

#[test]
fn test_axpy_and_aypx() {
    let x = matrix();
    let mut y: Tensor<f64, DynExtents2> = Tensor::from_elem((2, 3), 1.0);
    y.axpy(2.0, &x);
    assert_eq!(y.data(), &[3.0, 5.0, 7.0, 9.0, 11.0, 13.0]);
    y.aypx(0.5, &x);
    assert_eq!(y.data(), &[2.5, 4.5, 6.5, 8.5, 10.5, 12.5]);
}

#[test]
fn test_products_complex() {
    let i = c64::new(0.0, 1.0);
    let one = c64::new(1.0, 0.0);
    let a: Tensor<c64, _, _> = Tensor::from([[one, i], [-i, one]]);
    let x = Tensor::from([one, c64::new(2.0, 0.0)]);

    // dot conjugates the left operand
    let ax = a.dot(&x);
    assert_eq!(ax.data(), &[c64::new(1.0, -2.0), c64::new(2.0, 1.0)]);

    let mut y: Tensor<c64, DynExtents1> = Tensor::zeros((2,));
    a.mv(&x, &mut y);
    assert_eq!(y.data(), &[c64::new(1.0, 2.0), c64::new(2.0, -1.0)]);

    a.mhv(&x, &mut y);
    let mut expected: Tensor<c64, DynExtents1> = Tensor::zeros((2,));
    a.hermitian().mv(&x, &mut expected);
    assert_eq!(y, expected);

    assert_eq!(x.inner(&x), c64::new(5.0, 0.0));
    assert_relative_eq!(x.two_norm(), 5.0_f64.sqrt());
    assert_eq!(a.ddot(&a), a.inner(&a));
}

#[test]
fn test_multi_dot_congruence() {
    // B^T A B
    let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
    let b: Tensor<f64, (Const<2>, Dyn)> =
        Tensor::from_nested(&[[1.0, 0.0, 2.0], [0.0, 1.0, 1.0]]).unwrap();
    let btab: Tensor<f64, DynExtents2> = a.multi_dot((&b, &b));
    assert_eq!(btab.shape(), [3, 3]);
    assert_eq!(btab.data(), &[1.0, 2.0, 4.0, 3.0, 4.0, 10.0, 5.0, 8.0, 18.0]);

    let via_products = b.transposed().dot(&a).dot(&b);
    assert_eq!(btab, via_products);
}

#[test]
fn test_multi_dot_rank_three_with_vectors() {
    let t: Tensor<f64, DynExtents3> =
        Tensor::from_fn((3, 2, 4), |&[i, j, k]| (i as f64) - 2.0 * (j as f64) + 0.5 * (k as f64));
    let u: Tensor<f64, _, _> = Tensor::from([1.0, -1.0, 2.0]);
    let v: Tensor<f64, _, _> = Tensor::from([0.5, 3.0]);
    let w: Tensor<f64, _, _> = Tensor::from([1.0, 2.0, 0.0, -1.0]);

    let mut expected = 0.0;
    for i in 0..3 {
        for j in 0..2 {
            for k in 0..4 {
                expected += t[[i, j, k]] * u[[i]] * v[[j]] * w[[k]];
            }
        }
    }
    let s: Tensor<f64, ()> = t.multi_dot((&u, &v, &w));
    assert_relative_eq!(s.value(), expected, epsilon = 1e-12);
}

#[test]
fn test_norms_f32() {
    let v: Tensor<f32, _, _> = Tensor::from([3.0, -4.0]);
    assert_relative_eq!(v.two_norm(), 5.0);
    assert_relative_eq!(v.two_norm2(), 25.0);
    assert_relative_eq!(v.infinity_norm(), 4.0);
}

#[test]
fn test_display() {
    assert_eq!(matrix().to_string(), "[[1, 2, 3], [4, 5, 6]]");
    assert_eq!(Tensor::<f64, ()>::scalar(2.0).to_string(), "2");
    let t: Tensor<f64, DynExtents4> = Tensor::zeros((1, 1, 1, 2));
    assert_eq!(t.to_string(), "Tensor<4>[1, 1, 1, 2]");
}
