//! Conversions between rank-2 tensors and faer matrices.

use faer::linalg::matmul::matmul as gemm;
use faer::{Accum, Mat, MatMut, MatRef, Par};
use faer_traits::ComplexField;
use tracing::debug;

use crate::access::TensorAccess;
use crate::contract::{ContractExtents, ContractOutput};
use crate::extents::{reindex, DynExtents2, Extents, HasRank};
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

/// Zero-copy faer views of a rank-2 tensor.
pub trait AsFaerMat<T> {
    /// The tensor as a `rows x cols` faer matrix sharing its buffer.
    ///
    /// ```
    /// use mdtensor::prelude::*;
    /// use mdtensor::backend::AsFaerMat;
    ///
    /// let t: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// let m = t.as_faer_mat();
    /// assert_eq!((m.nrows(), m.ncols()), (2, 3));
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    fn as_faer_mat(&self) -> MatRef<'_, T>;

    fn as_faer_mat_mut(&mut self) -> MatMut<'_, T>;
}

impl<T, E, S> AsFaerMat<T> for Tensor<T, E, S>
where
    T: Scalar,
    E: HasRank<2>,
    S: TensorStorage<T>,
{
    fn as_faer_mat(&self) -> MatRef<'_, T> {
        let extents = self.extents();
        MatRef::from_column_major_slice(self.data(), extents.extent(1), extents.extent(0))
            .transpose()
    }

    fn as_faer_mat_mut(&mut self) -> MatMut<'_, T> {
        let extents = self.extents();
        MatMut::from_column_major_slice_mut(self.data_mut(), extents.extent(1), extents.extent(0))
            .transpose_mut()
    }
}

/// Copy a faer matrix into a new tensor.
pub fn tensor_from_faer_mat<T: Scalar>(mat: MatRef<'_, T>) -> Tensor<T, DynExtents2> {
    Tensor::from_fn((mat.nrows(), mat.ncols()), |&[i, j]| mat[(i, j)])
}

/// Copy any rank-2 tensor or view into an owned faer matrix.
pub fn faer_mat_from_tensor<V>(tensor: &V) -> Mat<V::Element>
where
    V: TensorAccess,
    V::Extents: HasRank<2>,
{
    let extents = tensor.extents();
    Mat::from_fn(extents.extent(0), extents.extent(1), |i, j| {
        tensor.read(&reindex(&[i, j]))
    })
}

/// Matrix product of two rank-2 tensors computed by faer.
///
/// Equal to `tensordot_n::<1, _, _>(a, b)` up to rounding. Static axes of
/// the operands carry over to the result.
///
/// # Panics
///
/// Panics if the columns of `a` and the rows of `b` differ, in checked
/// builds.
///
/// ```
/// use mdtensor::prelude::*;
/// use mdtensor::backend::matmul;
///
/// let a: Tensor<f64, _, _> = Tensor::from([[1.0, 2.0], [3.0, 4.0]]);
/// let b: Tensor<f64, _, _> = Tensor::from([[5.0, 6.0], [7.0, 8.0]]);
/// assert_eq!(matmul(&a, &b).data(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn matmul<T, EA, EB, SA, SB>(
    a: &Tensor<T, EA, SA>,
    b: &Tensor<T, EB, SB>,
) -> Tensor<T, ContractOutput<EA, EB, 1>>
where
    T: Scalar + ComplexField,
    EA: HasRank<2> + ContractExtents<EB, 1>,
    EB: HasRank<2>,
    SA: TensorStorage<T>,
    SB: TensorStorage<T>,
{
    let extents = ContractExtents::<EB, 1>::contract_extents(&a.extents(), &b.extents());
    let (m, k, n) = (a.extents().extent(0), a.extents().extent(1), b.extents().extent(1));
    debug!(m, k, n, "faer matmul");

    let mut c: Tensor<T, ContractOutput<EA, EB, 1>> = Tensor::zeros(extents);
    let dst = MatMut::from_column_major_slice_mut(c.data_mut(), n, m).transpose_mut();
    gemm(
        dst,
        Accum::Replace,
        a.as_faer_mat(),
        b.as_faer_mat(),
        <T as Scalar>::one(),
        Par::Seq,
    );
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tensordot_n;
    use crate::extents::{Const, Dyn};
    use crate::scalar::c64;
    use approx::assert_relative_eq;

    fn rect() -> Tensor<f64, DynExtents2> {
        Tensor::from_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    fn test_as_faer_mat_is_row_major() {
        let t = rect();
        let mat = t.as_faer_mat();
        assert_eq!(mat.nrows(), 2);
        assert_eq!(mat.ncols(), 3);
        assert_relative_eq!(mat[(0, 1)], 2.0);
        assert_relative_eq!(mat[(1, 0)], 4.0);
        assert_relative_eq!(mat[(1, 2)], 6.0);
    }

    #[test]
    fn test_as_faer_mat_shares_memory() {
        let t = rect();
        assert_eq!(t.as_faer_mat().as_ptr(), t.data().as_ptr());
    }

    #[test]
    fn test_as_faer_mat_mut_writes_through() {
        let mut t: Tensor<f64, DynExtents2> = Tensor::zeros((2, 3));
        {
            let mut mat = t.as_faer_mat_mut();
            mat[(0, 2)] = 1.0;
            mat[(1, 1)] = 5.0;
        }
        assert_eq!(t[[0, 2]], 1.0);
        assert_eq!(t[[1, 1]], 5.0);
        assert_eq!(t.data(), &[0.0, 0.0, 1.0, 0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_round_trip_through_faer() {
        let mat = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        let t = tensor_from_faer_mat(mat.as_ref());
        assert_eq!(t.shape(), [2, 3]);
        assert_eq!(t.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let back = faer_mat_from_tensor(&t.transposed());
        assert_eq!((back.nrows(), back.ncols()), (3, 2));
        assert_relative_eq!(back[(2, 1)], 5.0);
    }

    #[test]
    fn test_matmul_matches_tensordot() {
        let a = rect();
        let b: Tensor<f64, (Dyn, Dyn)> =
            Tensor::from_fn((3, 2), |&[i, j]| (i as f64) - 2.0 * (j as f64));
        let fast = matmul(&a, &b);
        let slow = tensordot_n::<1, _, _>(&a, &b);
        assert_eq!(fast.shape(), [2, 2]);
        for (x, y) in fast.data().iter().zip(slow.data()) {
            assert_relative_eq!(x, y);
        }
    }

    #[test]
    fn test_matmul_static_complex() {
        let i = c64::new(0.0, 1.0);
        let one = c64::new(1.0, 0.0);
        let a: Tensor<c64, _, _> = Tensor::from([[one, i], [i, one]]);
        let b: Tensor<c64, (Const<2>, Dyn)> = Tensor::from_vec((Const, 1), vec![one, one]).unwrap();
        let c: Tensor<c64, (Const<2>, Dyn)> = matmul(&a, &b);
        assert_eq!(c.data(), &[one + i, one + i]);
    }
}
