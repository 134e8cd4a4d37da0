//! Index bookkeeping for a contraction.
//!
//! `ContractionProperties` pairs up the contracted axes of two operands,
//! lists the free axes of each, and derives the loop extents and the
//! output extents of the contraction.

use crate::bounds::assert_bounds;

/// Properties computed for a tensor contraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionProperties {
    /// Contracted axis pairs: (axis of A, axis of B).
    pub contracted_pairs: Vec<(usize, usize)>,

    /// Axes of A that are not contracted, ascending.
    pub uncontracted_a: Vec<usize>,

    /// Axes of B that are not contracted, ascending.
    pub uncontracted_b: Vec<usize>,

    /// Extent of each contracted pair.
    pub contracted_dims: Vec<usize>,

    /// Output extents: A's free extents followed by B's.
    pub output_dims: Vec<usize>,
}

impl ContractionProperties {
    /// Compute contraction properties from axis lists and shapes.
    ///
    /// `a_axes[p]` of A is contracted with `b_axes[p]` of B.
    ///
    /// # Panics
    ///
    /// Panics if the axis lists differ in length, name an axis out of range,
    /// or name an axis twice. Unequal extents of a contracted pair are
    /// asserted in checked builds.
    ///
    /// # Example
    ///
    /// ```
    /// use mdtensor::contract::ContractionProperties;
    ///
    /// // C[i,k] = A[i,j] * B[j,k]
    /// let props = ContractionProperties::compute(&[1], &[2, 3], &[0], &[3, 4]);
    ///
    /// assert_eq!(props.output_dims, vec![2, 4]);
    /// assert_eq!(props.contracted_dims, vec![3]);
    /// ```
    pub fn compute(a_axes: &[usize], shape_a: &[usize], b_axes: &[usize], shape_b: &[usize]) -> Self {
        assert_eq!(
            a_axes.len(),
            b_axes.len(),
            "contracting {} axes of the left operand with {} axes of the right operand",
            a_axes.len(),
            b_axes.len()
        );
        check_axes(a_axes, shape_a.len());
        check_axes(b_axes, shape_b.len());

        let contracted_pairs: Vec<(usize, usize)> =
            a_axes.iter().copied().zip(b_axes.iter().copied()).collect();
        for &(i, j) in &contracted_pairs {
            assert_bounds!(
                shape_a[i] == shape_b[j],
                "contracted extents differ: axis {} has {}, axis {} has {}",
                i,
                shape_a[i],
                j,
                shape_b[j]
            );
        }

        let uncontracted_a: Vec<usize> = (0..shape_a.len())
            .filter(|i| !a_axes.contains(i))
            .collect();
        let uncontracted_b: Vec<usize> = (0..shape_b.len())
            .filter(|j| !b_axes.contains(j))
            .collect();

        let contracted_dims: Vec<usize> = a_axes.iter().map(|&i| shape_a[i]).collect();
        let output_dims: Vec<usize> = uncontracted_a
            .iter()
            .map(|&i| shape_a[i])
            .chain(uncontracted_b.iter().map(|&j| shape_b[j]))
            .collect();

        Self {
            contracted_pairs,
            uncontracted_a,
            uncontracted_b,
            contracted_dims,
            output_dims,
        }
    }
}

fn check_axes(axes: &[usize], rank: usize) {
    for (p, &axis) in axes.iter().enumerate() {
        assert!(axis < rank, "axis {} out of range for rank {}", axis, rank);
        assert!(
            !axes[..p].contains(&axis),
            "axis {} contracted more than once",
            axis
        );
    }
}
