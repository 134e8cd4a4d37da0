//! Extents: the shape of a tensor, static or dynamic per axis.
//!
//! An extents type is a tuple of dimensions, one per axis. Each dimension
//! is either [`Const<N>`], a size fixed at compile time that occupies no
//! storage, or [`Dyn`], a size stored at runtime:
//!
//! ```text
//! ()                      rank 0, stores nothing
//! (Const<3>,)             rank 1, static
//! (Dyn, Const<3>)         rank 2, one stored value
//! (Dyn, Dyn, Dyn)         rank 3, fully dynamic
//! ```
//!
//! Ranks 0 through 6 are supported. Because the static pattern is part of
//! the type, combining extents (elementwise operations, contraction) checks
//! static sizes at compile time and keeps as many axes static as possible.
//!
//! # Example
//!
//! ```
//! use mdtensor::extents::{Const, Dyn, Extents};
//!
//! let e: (Const<2>, Dyn) = Extents::from_dynamic(&[5]);
//! assert_eq!(<(Const<2>, Dyn)>::RANK, 2);
//! assert_eq!(<(Const<2>, Dyn)>::RANK_DYNAMIC, 1);
//! assert_eq!(e.extent(0), 2);
//! assert_eq!(e.extent(1), 5);
//! assert_eq!(e.size(), 10);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::bounds::assert_bounds;

/// The size of a single axis.
pub trait Dim: Copy + Debug + Default + Eq + Hash + Send + Sync + 'static {
    /// The compile-time size, or `None` for a dynamic axis.
    const STATIC: Option<usize>;

    /// Builds the dimension from a runtime size.
    ///
    /// For a static dimension the size must equal the static value.
    fn from_size(size: usize) -> Self;

    /// The size of the axis.
    fn size(self) -> usize;
}

/// An axis whose size `N` is known at compile time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Const<const N: usize>;

/// An axis whose size is stored at runtime.
pub type Dyn = usize;

impl<const N: usize> Dim for Const<N> {
    const STATIC: Option<usize> = Some(N);

    #[inline]
    fn from_size(size: usize) -> Self {
        assert_bounds!(size == N, "static extent {} initialized with {}", N, size);
        Const
    }

    #[inline]
    fn size(self) -> usize {
        N
    }
}

impl Dim for Dyn {
    const STATIC: Option<usize> = None;

    #[inline]
    fn from_size(size: usize) -> Self {
        size
    }

    #[inline]
    fn size(self) -> usize {
        self
    }
}

/// Marker for dimensions fixed at compile time.
pub trait StaticDim: Dim {}

impl<const N: usize> StaticDim for Const<N> {}

/// Combination of two dimensions describing the same axis.
///
/// The result is static if either side is static. Two different static
/// sizes have no combination, so mismatches fail to compile.
pub trait CombineDim<D: Dim>: Dim {
    type Output: Dim;
}

impl<const N: usize> CombineDim<Const<N>> for Const<N> {
    type Output = Const<N>;
}

impl<const N: usize> CombineDim<Dyn> for Const<N> {
    type Output = Const<N>;
}

impl<const N: usize> CombineDim<Const<N>> for Dyn {
    type Output = Const<N>;
}

impl CombineDim<Dyn> for Dyn {
    type Output = Dyn;
}

/// A multidimensional shape with a rank fixed at compile time.
pub trait Extents: Copy + Debug + Default + Eq + Hash + Send + Sync + 'static {
    /// Number of axes.
    const RANK: usize;

    /// Number of axes whose size is stored at runtime.
    const RANK_DYNAMIC: usize;

    /// A multi-index into a tensor of this shape, `[usize; RANK]`.
    type Index: Copy
        + Debug
        + Default
        + Eq
        + Hash
        + AsRef<[usize]>
        + AsMut<[usize]>
        + Send
        + Sync
        + 'static;

    /// Static size of `axis`, or `None` if the axis is dynamic.
    fn static_extent(axis: usize) -> Option<usize>;

    /// All axis sizes.
    fn to_array(&self) -> Self::Index;

    /// Builds extents from the sizes of all axes.
    ///
    /// # Panics
    ///
    /// Panics if `extents.len() != RANK`. Sizes of static axes must match
    /// their static value, which is asserted in checked builds.
    fn from_array(extents: &[usize]) -> Self;

    /// Builds extents from the sizes of the dynamic axes only, in axis order.
    ///
    /// # Panics
    ///
    /// Panics if `dynamic.len() != RANK_DYNAMIC`.
    fn from_dynamic(dynamic: &[usize]) -> Self;

    #[inline]
    fn rank(&self) -> usize {
        Self::RANK
    }

    #[inline]
    fn rank_dynamic(&self) -> usize {
        Self::RANK_DYNAMIC
    }

    /// Size of `axis`. Requires `axis < RANK`.
    #[inline]
    fn extent(&self, axis: usize) -> usize {
        self.to_array().as_ref()[axis]
    }

    /// Whether every axis is static.
    #[inline]
    fn is_static() -> bool {
        Self::RANK_DYNAMIC == 0
    }

    /// Number of elements, the product of all extents (1 for rank 0).
    fn size(&self) -> usize {
        self.to_array().as_ref().iter().product()
    }

    /// Product of the extents of all axes before `axis`.
    fn fwd_product(&self, axis: usize) -> usize {
        self.to_array().as_ref()[..axis].iter().product()
    }

    /// Product of the extents of all axes after `axis`.
    fn rev_product(&self, axis: usize) -> usize {
        self.to_array().as_ref()[axis + 1..].iter().product()
    }

    /// Equality by rank and per-axis size, across extents types.
    ///
    /// ```
    /// use mdtensor::extents::{Const, Dyn, Extents};
    ///
    /// let a = (Const::<2>, 3 as Dyn);
    /// let b: (Dyn, Const<3>) = (2, Const);
    /// assert!(a.same_as(&b));
    /// assert!(!a.same_as(&(2 as Dyn,)));
    /// ```
    fn same_as<F: Extents>(&self, other: &F) -> bool {
        Self::RANK == F::RANK && self.to_array().as_ref() == other.to_array().as_ref()
    }

    /// Whether `index` lies in `[0, extent(0)) x ... x [0, extent(RANK-1))`.
    fn contains(&self, index: &[usize]) -> bool {
        index.len() == Self::RANK
            && index
                .iter()
                .zip(self.to_array().as_ref())
                .all(|(&i, &e)| i < e)
    }

    /// Visits every multi-index in row-major order.
    ///
    /// Rank-0 extents have exactly one (empty) index; extents with a zero
    /// axis have none.
    fn for_each_index<F: FnMut(&Self::Index)>(&self, mut f: F) {
        let dims = self.to_array();
        if dims.as_ref().contains(&0) {
            return;
        }
        let mut index = Self::Index::default();
        loop {
            f(&index);
            let mut axis = Self::RANK;
            loop {
                if axis == 0 {
                    return;
                }
                axis -= 1;
                let i = &mut index.as_mut()[axis];
                *i += 1;
                if *i < dims.as_ref()[axis] {
                    break;
                }
                *i = 0;
            }
        }
    }

    /// Converts into extents of a compatible type (equal or dynamic per axis).
    fn convert<F: Extents>(&self) -> F
    where
        Self: Combine<F>,
    {
        F::from_array(self.to_array().as_ref())
    }
}

/// Extents with only static axes; constructible from nothing.
pub trait StaticExtents: Extents {
    fn new() -> Self {
        Self::default()
    }
}

/// Extents of rank `R`.
pub trait HasRank<const R: usize>: Extents {}

macro_rules! impl_extents {
    ($rank:literal; $($d:ident: $i:tt),*) => {
        impl<$($d: Dim),*> Extents for ($($d,)*) {
            const RANK: usize = $rank;
            const RANK_DYNAMIC: usize = 0 $(+ <$d as Dim>::STATIC.is_none() as usize)*;

            type Index = [usize; $rank];

            #[inline]
            fn static_extent(axis: usize) -> Option<usize> {
                let statics: [Option<usize>; $rank] = [$(<$d as Dim>::STATIC),*];
                statics[axis]
            }

            #[inline]
            fn to_array(&self) -> [usize; $rank] {
                [$(self.$i.size()),*]
            }

            fn from_array(extents: &[usize]) -> Self {
                assert_eq!(
                    extents.len(),
                    $rank,
                    "expected {} extents, got {}",
                    $rank,
                    extents.len()
                );
                ($(<$d as Dim>::from_size(extents[$i]),)*)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_dynamic(dynamic: &[usize]) -> Self {
                assert_eq!(
                    dynamic.len(),
                    Self::RANK_DYNAMIC,
                    "expected {} dynamic extents, got {}",
                    Self::RANK_DYNAMIC,
                    dynamic.len()
                );
                let mut values = dynamic.iter().copied();
                ($(<$d as Dim>::from_size(match <$d as Dim>::STATIC {
                    Some(n) => n,
                    None => values.next().unwrap_or_default(),
                }),)*)
            }
        }

        impl<$($d: Dim),*> HasRank<$rank> for ($($d,)*) {}

        impl<$($d: StaticDim),*> StaticExtents for ($($d,)*) {}
    };
}

impl_extents!(0;);
impl_extents!(1; D0: 0);
impl_extents!(2; D0: 0, D1: 1);
impl_extents!(3; D0: 0, D1: 1, D2: 2);
impl_extents!(4; D0: 0, D1: 1, D2: 2, D3: 3);
impl_extents!(5; D0: 0, D1: 1, D2: 2, D3: 3, D4: 4);
impl_extents!(6; D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5);

/// Fully dynamic rank-1 extents.
pub type DynExtents1 = (Dyn,);
/// Fully dynamic rank-2 extents.
pub type DynExtents2 = (Dyn, Dyn);
/// Fully dynamic rank-3 extents.
pub type DynExtents3 = (Dyn, Dyn, Dyn);
/// Fully dynamic rank-4 extents.
pub type DynExtents4 = (Dyn, Dyn, Dyn, Dyn);

/// Axis-wise combination of two extents of equal rank.
///
/// Each axis of the output is static if it is static in either operand.
/// Used for the result shape of elementwise binary operations.
///
/// ```
/// use mdtensor::extents::{Combine, Const, Dyn};
///
/// let a = (Const::<2>, 3 as Dyn);
/// let b = (2 as Dyn, Const::<3>);
/// let c: (Const<2>, Const<3>) = a.combine(&b);
/// assert_eq!(c, (Const, Const));
/// ```
pub trait Combine<F: Extents>: Extents {
    type Output: Extents;

    /// Combined extents; both operands must have equal runtime sizes.
    fn combine(&self, other: &F) -> Self::Output {
        assert_bounds!(
            self.same_as(other),
            "extents {:?} and {:?} differ",
            self,
            other
        );
        <Self::Output as Extents>::from_array(self.to_array().as_ref())
    }
}

impl Combine<()> for () {
    type Output = ();
}

macro_rules! impl_combine {
    ($($a:ident $b:ident),*) => {
        impl<$($a,)* $($b,)*> Combine<($($b,)*)> for ($($a,)*)
        where
            $($a: CombineDim<$b>, $b: Dim,)*
        {
            type Output = ($(<$a as CombineDim<$b>>::Output,)*);
        }
    };
}

impl_combine!(A0 B0);
impl_combine!(A0 B0, A1 B1);
impl_combine!(A0 B0, A1 B1, A2 B2);
impl_combine!(A0 B0, A1 B1, A2 B2, A3 B3);
impl_combine!(A0 B0, A1 B1, A2 B2, A3 B3, A4 B4);
impl_combine!(A0 B0, A1 B1, A2 B2, A3 B3, A4 B4, A5 B5);

/// Concatenation of the axes of two extents.
pub trait Concat<F: Extents>: Extents {
    type Output: Extents;

    fn concat(&self, other: &F) -> Self::Output {
        let mut dims: SmallVec<[usize; 8]> = SmallVec::new();
        dims.extend_from_slice(self.to_array().as_ref());
        dims.extend_from_slice(other.to_array().as_ref());
        <Self::Output as Extents>::from_array(&dims)
    }
}

macro_rules! impl_concat {
    ([$($a:ident),*] [$($b:ident),*]) => {
        impl<$($a: Dim,)* $($b: Dim,)*> Concat<($($b,)*)> for ($($a,)*) {
            type Output = ($($a,)* $($b,)*);
        }
    };
}

impl_concat!([] []);
impl_concat!([] [B0]);
impl_concat!([] [B0, B1]);
impl_concat!([] [B0, B1, B2]);
impl_concat!([] [B0, B1, B2, B3]);
impl_concat!([] [B0, B1, B2, B3, B4]);
impl_concat!([] [B0, B1, B2, B3, B4, B5]);
impl_concat!([A0] []);
impl_concat!([A0] [B0]);
impl_concat!([A0] [B0, B1]);
impl_concat!([A0] [B0, B1, B2]);
impl_concat!([A0] [B0, B1, B2, B3]);
impl_concat!([A0] [B0, B1, B2, B3, B4]);
impl_concat!([A0, A1] []);
impl_concat!([A0, A1] [B0]);
impl_concat!([A0, A1] [B0, B1]);
impl_concat!([A0, A1] [B0, B1, B2]);
impl_concat!([A0, A1] [B0, B1, B2, B3]);
impl_concat!([A0, A1, A2] []);
impl_concat!([A0, A1, A2] [B0]);
impl_concat!([A0, A1, A2] [B0, B1]);
impl_concat!([A0, A1, A2] [B0, B1, B2]);
impl_concat!([A0, A1, A2, A3] []);
impl_concat!([A0, A1, A2, A3] [B0]);
impl_concat!([A0, A1, A2, A3] [B0, B1]);
impl_concat!([A0, A1, A2, A3, A4] []);
impl_concat!([A0, A1, A2, A3, A4] [B0]);
impl_concat!([A0, A1, A2, A3, A4, A5] []);

/// Split into the first `N` axes and the rest.
pub trait SplitFirst<const N: usize>: Extents {
    type Head: Extents;
    type Tail: Extents;

    fn split_first(&self) -> (Self::Head, Self::Tail) {
        let dims = self.to_array();
        let (head, tail) = dims.as_ref().split_at(N);
        (
            <Self::Head as Extents>::from_array(head),
            <Self::Tail as Extents>::from_array(tail),
        )
    }
}

/// Split into the last `N` axes and the axes before them.
pub trait SplitLast<const N: usize>: Extents {
    type Init: Extents;
    type Last: Extents;

    fn split_last(&self) -> (Self::Init, Self::Last) {
        let dims = self.to_array();
        let (init, last) = dims.as_ref().split_at(Self::RANK - N);
        (
            <Self::Init as Extents>::from_array(init),
            <Self::Last as Extents>::from_array(last),
        )
    }
}

macro_rules! impl_split {
    ($n:literal, $m:literal; [$($h:ident),*] [$($t:ident),*]) => {
        impl<$($h: Dim,)* $($t: Dim,)*> SplitFirst<$n> for ($($h,)* $($t,)*) {
            type Head = ($($h,)*);
            type Tail = ($($t,)*);
        }

        impl<$($h: Dim,)* $($t: Dim,)*> SplitLast<$m> for ($($h,)* $($t,)*) {
            type Init = ($($h,)*);
            type Last = ($($t,)*);
        }
    };
}

impl_split!(0, 0; [] []);
impl_split!(0, 1; [] [D0]);
impl_split!(1, 0; [D0] []);
impl_split!(0, 2; [] [D0, D1]);
impl_split!(1, 1; [D0] [D1]);
impl_split!(2, 0; [D0, D1] []);
impl_split!(0, 3; [] [D0, D1, D2]);
impl_split!(1, 2; [D0] [D1, D2]);
impl_split!(2, 1; [D0, D1] [D2]);
impl_split!(3, 0; [D0, D1, D2] []);
impl_split!(0, 4; [] [D0, D1, D2, D3]);
impl_split!(1, 3; [D0] [D1, D2, D3]);
impl_split!(2, 2; [D0, D1] [D2, D3]);
impl_split!(3, 1; [D0, D1, D2] [D3]);
impl_split!(4, 0; [D0, D1, D2, D3] []);
impl_split!(0, 5; [] [D0, D1, D2, D3, D4]);
impl_split!(1, 4; [D0] [D1, D2, D3, D4]);
impl_split!(2, 3; [D0, D1] [D2, D3, D4]);
impl_split!(3, 2; [D0, D1, D2] [D3, D4]);
impl_split!(4, 1; [D0, D1, D2, D3] [D4]);
impl_split!(5, 0; [D0, D1, D2, D3, D4] []);
impl_split!(0, 6; [] [D0, D1, D2, D3, D4, D5]);
impl_split!(1, 5; [D0] [D1, D2, D3, D4, D5]);
impl_split!(2, 4; [D0, D1] [D2, D3, D4, D5]);
impl_split!(3, 3; [D0, D1, D2] [D3, D4, D5]);
impl_split!(4, 2; [D0, D1, D2, D3] [D4, D5]);
impl_split!(5, 1; [D0, D1, D2, D3, D4] [D5]);
impl_split!(6, 0; [D0, D1, D2, D3, D4, D5] []);

/// Rank-2 extents with the two axes swapped.
pub trait Transpose: HasRank<2> {
    type Output: HasRank<2>;

    fn transpose(&self) -> Self::Output;
}

impl<D0: Dim, D1: Dim> Transpose for (D0, D1) {
    type Output = (D1, D0);

    #[inline]
    fn transpose(&self) -> (D1, D0) {
        (self.1, self.0)
    }
}

/// Copies a multi-index into the index type of another extents type of the
/// same rank.
#[inline]
pub(crate) fn reindex<I: Default + AsMut<[usize]>>(index: &[usize]) -> I {
    let mut out = I::default();
    out.as_mut().copy_from_slice(index);
    out
}
