//! Contraction of every axis of a tensor with one operand each.
//!
//! `a.multi_dot((&m0, &m1, ..))` contracts axis 0 of `a` with axis 0 of
//! `m0`, then axis 0 of that result (the former axis 1 of `a`) with axis 0
//! of `m1`, and so on. What remains are the trailing axes of the operands,
//! in operand order: `B^T A C` for a matrix `A` and matrices `B`, `C`, or
//! the scalar `sum A(i, j, ..) u(i) v(j) ..` for vectors. Nothing is
//! conjugated.

use crate::access::TensorAccess;
use crate::contract::{tensordot, ContractLeading, LeadingOutput};
use crate::extents::{Extents, HasRank};
use crate::tensor::Tensor;

/// A tuple of references, one operand per axis of a tensor of type `V`.
pub trait MultiDotOperands<V: TensorAccess> {
    /// Extents of the contraction result.
    type Output: Extents;

    fn contract(self, tensor: &V) -> Tensor<V::Element, Self::Output>;
}

fn contract_leading<A, B, EC>(a: &A, b: &B) -> Tensor<A::Element, EC>
where
    A: TensorAccess,
    B: TensorAccess<Element = A::Element>,
    EC: Extents,
{
    tensordot(a, &[0], b, &[0])
}

impl<'m, V, M0> MultiDotOperands<V> for (&'m M0,)
where
    V: TensorAccess,
    V::Extents: HasRank<1> + ContractLeading<M0::Extents>,
    M0: TensorAccess<Element = V::Element>,
{
    type Output = LeadingOutput<V::Extents, M0::Extents>;

    fn contract(self, tensor: &V) -> Tensor<V::Element, Self::Output> {
        contract_leading(tensor, self.0)
    }
}

impl<'m, V, M0, M1> MultiDotOperands<V> for (&'m M0, &'m M1)
where
    V: TensorAccess,
    V::Extents: HasRank<2> + ContractLeading<M0::Extents>,
    LeadingOutput<V::Extents, M0::Extents>: ContractLeading<M1::Extents>,
    M0: TensorAccess<Element = V::Element>,
    M1: TensorAccess<Element = V::Element>,
{
    type Output = LeadingOutput<LeadingOutput<V::Extents, M0::Extents>, M1::Extents>;

    fn contract(self, tensor: &V) -> Tensor<V::Element, Self::Output> {
        let first: Tensor<V::Element, LeadingOutput<V::Extents, M0::Extents>> =
            contract_leading(tensor, self.0);
        contract_leading(&first, self.1)
    }
}

impl<'m, V, M0, M1, M2> MultiDotOperands<V> for (&'m M0, &'m M1, &'m M2)
where
    V: TensorAccess,
    V::Extents: HasRank<3> + ContractLeading<M0::Extents>,
    LeadingOutput<V::Extents, M0::Extents>: ContractLeading<M1::Extents>,
    LeadingOutput<LeadingOutput<V::Extents, M0::Extents>, M1::Extents>:
        ContractLeading<M2::Extents>,
    M0: TensorAccess<Element = V::Element>,
    M1: TensorAccess<Element = V::Element>,
    M2: TensorAccess<Element = V::Element>,
{
    type Output = LeadingOutput<
        LeadingOutput<LeadingOutput<V::Extents, M0::Extents>, M1::Extents>,
        M2::Extents,
    >;

    fn contract(self, tensor: &V) -> Tensor<V::Element, Self::Output> {
        let first: Tensor<V::Element, LeadingOutput<V::Extents, M0::Extents>> =
            contract_leading(tensor, self.0);
        let second: Tensor<
            V::Element,
            LeadingOutput<LeadingOutput<V::Extents, M0::Extents>, M1::Extents>,
        > = contract_leading(&first, self.1);
        contract_leading(&second, self.2)
    }
}
