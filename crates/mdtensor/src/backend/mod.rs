//! Dense linear algebra through faer.
//!
//! Rank-2 tensors are row-major, faer matrices are column-major with
//! arbitrary strides. A tensor is viewed by faer as the transpose of the
//! column-major matrix over its buffer, so the views share memory and need
//! no copy.

mod faer_interop;

pub use faer_interop::{faer_mat_from_tensor, matmul, tensor_from_faer_mat, AsFaerMat};
