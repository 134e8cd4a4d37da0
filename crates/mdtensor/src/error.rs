//! Error types for mdtensor.
//!
//! Most contract violations in this crate (mismatched runtime extents,
//! out-of-range indices through the unchecked accessors) are assertions.
//! `TensorError` covers the checked entry points: `at`, the `try_*`
//! elementwise operations, and constructors that take runtime data.

use thiserror::Error;

/// Errors that can occur in tensor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// A multi-index lies outside the index space of the tensor.
    ///
    /// This is the range error signalled by `at` and `at_mut`.
    #[error("Indices out of bounds: {indices:?} not in index space {extents:?}")]
    IndexOutOfBounds {
        indices: Vec<usize>,
        extents: Vec<usize>,
    },

    /// Data length does not match the number of elements required.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Two tensors of equal rank have different runtime extents.
    #[error("extents mismatch: {lhs:?} vs {rhs:?}")]
    ExtentsMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Nesting depth of an initializer list differs from the tensor rank.
    #[error("expected nested list of depth {expected}, got depth {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A nested initializer list has the wrong length along one axis.
    #[error("initializer list of length {actual} does not match extent {expected} of axis {axis}")]
    ListLengthMismatch {
        axis: usize,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_message() {
        let err = TensorError::IndexOutOfBounds {
            indices: vec![2, 0],
            extents: vec![2, 3],
        };
        assert!(err.to_string().starts_with("Indices out of bounds"));
    }

    #[test]
    fn test_list_length_message() {
        let err = TensorError::ListLengthMismatch {
            axis: 1,
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "initializer list of length 2 does not match extent 3 of axis 1"
        );
    }
}
