//! `Display` for tensors: nested brackets up to rank 3.

use std::fmt;

use crate::access::{IndexOf, TensorAccess};
use crate::accessor::{Accessor, AccessorMut};
use crate::extents::Extents;
use crate::layout::Layout;
use crate::scalar::Scalar;
use crate::span::{TensorSpan, TensorSpanMut};
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

const MAX_NESTED_RANK: usize = 3;

fn write_axis<V>(v: &V, f: &mut fmt::Formatter<'_>, index: &mut IndexOf<V>, axis: usize) -> fmt::Result
where
    V: TensorAccess,
    V::Element: fmt::Display,
{
    if axis == <V::Extents as Extents>::RANK {
        return write!(f, "{}", v.read(index));
    }
    f.write_str("[")?;
    for i in 0..v.extents().extent(axis) {
        if i > 0 {
            f.write_str(", ")?;
        }
        index.as_mut()[axis] = i;
        write_axis(v, f, index, axis + 1)?;
    }
    f.write_str("]")
}

/// Rank 0 prints the element; ranks 1 to 3 print nested brackets; higher
/// ranks print only the rank and extents.
pub(crate) fn fmt_tensor<V>(v: &V, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    V: TensorAccess,
    V::Element: fmt::Display,
{
    let rank = <V::Extents as Extents>::RANK;
    if rank > MAX_NESTED_RANK {
        return write!(f, "Tensor<{}>{:?}", rank, v.extents().to_array());
    }
    let mut index: IndexOf<V> = Default::default();
    write_axis(v, f, &mut index, 0)
}

impl<T, E, S> fmt::Display for Tensor<T, E, S>
where
    T: Scalar + fmt::Display,
    E: Extents,
    S: TensorStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tensor(self, f)
    }
}

impl<'a, T, E, L, A> fmt::Display for TensorSpan<'a, T, E, L, A>
where
    T: Scalar + fmt::Display,
    E: Extents,
    L: Layout,
    A: Accessor<Element = T> + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tensor(self, f)
    }
}

impl<'a, T, E, L, A> fmt::Display for TensorSpanMut<'a, T, E, L, A>
where
    T: Scalar + fmt::Display,
    E: Extents,
    L: Layout,
    A: AccessorMut<Element = T> + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tensor(self, f)
    }
}
