//! mdtensor - multidimensional tensors with typed extents
//!
//! Tensors and non-owning views over flat buffers whose shape is a tuple of
//! static ([`Const`]) and runtime ([`Dyn`]) axis sizes, with pluggable
//! layouts and element accessors, and general tensor contraction.
//!
//! # Architecture
//!
//! ```text
//! Extents            (Const<2>, Dyn, ...)  shape, static where possible
//!   └── Layout       RightMapping, LeftMapping, StrideMapping, ZeroMapping
//!         └── Accessor   DefaultAccessor, ConjAccessor, IteratorAccessor, ZeroAccessor
//!
//! TensorAccess       read / element_mut by multi-index
//! ├── Tensor         owning, row-major, Dense or Fixed storage
//! ├── TensorSpan     read-only view: handle + mapping + accessor
//! ├── TensorSpanMut  mutable view
//! └── ZeroTensor     extents only, every element is zero
//!
//! DenseTensorOps     at, dot, ddot, inner, mv family, norms (operations)
//! contract           tensordot, tensordot_out, tensordot_n, updaters
//! backend            faer views and matmul for rank-2 tensors
//! ```
//!
//! # Example
//!
//! ```
//! use mdtensor::prelude::*;
//!
//! // 2x3 matrix with a static row count
//! let a: Tensor<f64, (Const<2>, Dyn)> =
//!     Tensor::from_vec((Const, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let x: Tensor<f64, _, _> = Tensor::from([1.0, 0.0, -1.0]);
//!
//! let y = &a * &x;
//! assert_eq!(y.shape(), [2]);
//! assert_eq!(y.data(), &[-2.0, -2.0]);
//!
//! assert!(a.at(&[2, 0]).is_err());
//! assert_eq!(a.frobenius_norm2(), 91.0);
//! ```

pub mod access;
pub mod accessor;
pub mod backend;
pub mod bounds;
pub mod contract;
pub mod error;
pub mod extents;
pub mod layout;
pub mod nested;
pub mod operations;
pub mod scalar;
pub mod span;
pub mod storage;
pub mod strides;
pub mod tensor;
pub mod zero;

pub use access::{TensorAccess, TensorAccessMut};
pub use bounds::CHECK_BOUNDS;
pub use contract::{tensordot, tensordot_n, tensordot_n_out, tensordot_out};
pub use error::TensorError;
pub use extents::{Const, Dyn, Extents};
pub use operations::{DenseTensorOps, DenseTensorOpsMut};
pub use scalar::{c64, RealScalar, Scalar};
pub use span::{TensorSpan, TensorSpanMut};
pub use storage::{Dense, Fixed, TensorStorage};
pub use tensor::{DenseTensor, FixedTensor, Tensor};
pub use zero::ZeroTensor;

/// The types and traits needed for everyday use.
pub mod prelude {
    pub use crate::access::{TensorAccess, TensorAccessMut};
    pub use crate::extents::{
        Combine, Const, Dyn, DynExtents1, DynExtents2, DynExtents3, DynExtents4, Extents,
        HasRank, StaticExtents,
    };
    pub use crate::operations::{DenseTensorOps, DenseTensorOpsMut};
    pub use crate::scalar::{c64, Scalar};
    pub use crate::span::{TensorSpan, TensorSpanMut};
    pub use crate::tensor::Tensor;
    pub use crate::zero::ZeroTensor;
}
