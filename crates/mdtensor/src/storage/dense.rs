//! Heap storage for tensors with at least one dynamic axis.

use crate::scalar::Scalar;
use crate::storage::{ResizableStorage, TensorStorage};

/// Contiguous heap buffer; the only storage whose length can change.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<ElT: Scalar> {
    data: Vec<ElT>,
}

impl<ElT: Scalar> TensorStorage<ElT> for Dense<ElT> {
    fn from_elem(len: usize, value: ElT) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    fn from_vec(data: Vec<ElT>) -> Self {
        Self { data }
    }

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_slice(&self) -> &[ElT] {
        &self.data
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [ElT] {
        &mut self.data
    }
}

impl<ElT: Scalar> ResizableStorage<ElT> for Dense<ElT> {
    /// Elements below `len` keep their positions in the buffer.
    fn resize(&mut self, len: usize, value: ElT) {
        self.data.resize(len, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    #[test]
    fn test_zeros() {
        let d: Dense<c64> = Dense::zeros(5);
        assert_eq!(d.len(), 5);
        assert!(!d.is_empty());
        assert!(d.as_slice().iter().all(|&x| x == c64::new(0.0, 0.0)));
    }

    #[test]
    fn test_resize_keeps_prefix() {
        let mut d = Dense::from_vec(vec![1.0, 2.0]);
        d.resize(4, 0.0);
        assert_eq!(d.as_slice(), &[1.0, 2.0, 0.0, 0.0]);
        d.resize(1, 0.0);
        assert_eq!(d.as_slice(), &[1.0]);
        d.resize(0, 0.0);
        assert!(d.is_empty());
    }
}
