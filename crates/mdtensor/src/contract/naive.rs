//! Loop-based tensor contraction.

use tracing::trace;

use crate::access::{TensorAccess, TensorAccessMut};
use crate::bounds::assert_bounds;
use crate::contract::properties::ContractionProperties;
use crate::contract::update;
use crate::extents::Extents;
use crate::strides::for_each_multi_index;
use crate::tensor::Tensor;

/// Contract `a` and `b` into the caller-provided `c`.
///
/// Axis `a_axes[p]` of `a` is contracted with axis `b_axes[p]` of `b`. The
/// axes of `c` are the free axes of `a` followed by the free axes of `b`,
/// each in ascending order. For every output index and every combination
/// of contracted indices, `update(&mut c[..], a[..], b[..])` is called once.
/// The loops run contracted axes outermost, then the free axes of `a`,
/// then those of `b`.
///
/// Nothing is allocated and `c` is not cleared: with an accumulating
/// updater such as [`update::add`] the caller zeroes `c` first.
///
/// # Panics
///
/// Panics if the axis lists are malformed (see
/// [`ContractionProperties::compute`]). Mismatched extents are asserted
/// in checked builds.
///
/// # Example
///
/// ```
/// use mdtensor::prelude::*;
/// use mdtensor::contract::{tensordot_out, update};
///
/// let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
/// let x: Tensor<f64, _, _> = Tensor::from([1.0, 1.0]);
/// let mut y: Tensor<f64, (Dyn,)> = Tensor::zeros((2,));
///
/// // y[i] = sum_j A[i, j] x[j]
/// tensordot_out(&a, &[1], &x, &[0], &mut y, update::add);
/// assert_eq!(y.data(), &[3.0, 7.0]);
/// ```
pub fn tensordot_out<A, B, C, U>(
    a: &A,
    a_axes: &[usize],
    b: &B,
    b_axes: &[usize],
    c: &mut C,
    update: U,
) where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
    C: TensorAccessMut<Element = A::Element>,
    U: FnMut(&mut A::Element, A::Element, A::Element),
{
    let shape_a = a.extents().to_array();
    let shape_b = b.extents().to_array();
    let props = ContractionProperties::compute(a_axes, shape_a.as_ref(), b_axes, shape_b.as_ref());
    contract_into(a, b, c, &props, update);
}

/// Contract over the given axes into a freshly allocated tensor.
///
/// The output extents type `EC` is chosen by the caller and must have the
/// rank of the result; its static axes must match the result's extents.
///
/// ```
/// use mdtensor::prelude::*;
/// use mdtensor::contract::tensordot;
///
/// // C[i, l] = sum_{j,k} A[i, j, k] B[k, j, l]
/// let a: Tensor<f64, (Dyn, Dyn, Dyn)> = Tensor::from_elem((2, 3, 4), 1.0);
/// let b: Tensor<f64, (Dyn, Dyn, Dyn)> = Tensor::from_elem((4, 3, 5), 2.0);
/// let c: Tensor<f64, (Dyn, Dyn)> = tensordot(&a, &[1, 2], &b, &[1, 0]);
/// assert_eq!(c.shape(), [2, 5]);
/// assert_eq!(c[[1, 4]], 24.0);
/// ```
pub fn tensordot<EC, A, B>(a: &A, a_axes: &[usize], b: &B, b_axes: &[usize]) -> Tensor<A::Element, EC>
where
    EC: Extents,
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
{
    let shape_a = a.extents().to_array();
    let shape_b = b.extents().to_array();
    let props = ContractionProperties::compute(a_axes, shape_a.as_ref(), b_axes, shape_b.as_ref());
    let mut c = Tensor::zeros(EC::from_array(&props.output_dims));
    contract_into(a, b, &mut c, &props, update::add);
    c
}

pub(crate) fn contract_into<A, B, C, U>(
    a: &A,
    b: &B,
    c: &mut C,
    props: &ContractionProperties,
    mut update: U,
) where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
    C: TensorAccessMut<Element = A::Element>,
    U: FnMut(&mut A::Element, A::Element, A::Element),
{
    let shape_c = c.extents().to_array();
    assert_bounds!(
        shape_c.as_ref() == props.output_dims.as_slice(),
        "output extents {:?} do not match contraction result {:?}",
        shape_c,
        props.output_dims
    );
    trace!(
        a = ?a.extents(),
        b = ?b.extents(),
        c = ?shape_c,
        pairs = ?props.contracted_pairs,
        "tensordot"
    );

    let n = props.contracted_pairs.len();
    let n_free_a = props.uncontracted_a.len();
    let loop_dims: Vec<usize> = props
        .contracted_dims
        .iter()
        .chain(props.output_dims.iter())
        .copied()
        .collect();

    let mut a_idx = <A::Extents as Extents>::Index::default();
    let mut b_idx = <B::Extents as Extents>::Index::default();
    let mut c_idx = <C::Extents as Extents>::Index::default();

    for_each_multi_index(&loop_dims, |pos| {
        let (summed, free) = pos.split_at(n);
        for (&k, &(i, j)) in summed.iter().zip(&props.contracted_pairs) {
            a_idx.as_mut()[i] = k;
            b_idx.as_mut()[j] = k;
        }
        let (free_a, free_b) = free.split_at(n_free_a);
        for (&k, &i) in free_a.iter().zip(&props.uncontracted_a) {
            a_idx.as_mut()[i] = k;
        }
        for (&k, &j) in free_b.iter().zip(&props.uncontracted_b) {
            b_idx.as_mut()[j] = k;
        }
        c_idx.as_mut().copy_from_slice(free);
        update(c.element_mut(&c_idx), a.read(&a_idx), b.read(&b_idx));
    });
}
