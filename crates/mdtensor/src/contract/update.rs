//! Accumulation rules for contraction.
//!
//! An updater is called as `update(&mut c, a, b)` once for every product
//! term, with `a` taken from the left operand and `b` from the right one.
//! Conjugating variants conjugate the matrix-side operand only, never a
//! caller-supplied scale factor.

use crate::scalar::Scalar;

/// `c += a * b`
#[inline]
pub fn add<T: Scalar>(c: &mut T, a: T, b: T) {
    *c = *c + a * b;
}

/// `c -= a * b`
#[inline]
pub fn sub<T: Scalar>(c: &mut T, a: T, b: T) {
    *c = *c - a * b;
}

/// `c += a * conj(b)`
#[inline]
pub fn add_conj<T: Scalar>(c: &mut T, a: T, b: T) {
    *c = *c + a * b.conj();
}

/// `c -= a * conj(b)`
#[inline]
pub fn sub_conj<T: Scalar>(c: &mut T, a: T, b: T) {
    *c = *c - a * b.conj();
}

/// `c += conj(a) * b`, the Hermitian inner product convention.
#[inline]
pub fn conj_add<T: Scalar>(c: &mut T, a: T, b: T) {
    *c = *c + a.conj() * b;
}

/// `c += alpha * a * b`
pub fn scaled<T: Scalar>(alpha: T) -> impl FnMut(&mut T, T, T) {
    move |c, a, b| *c = *c + alpha * a * b
}

/// `c += alpha * a * conj(b)`; `alpha` itself is not conjugated.
pub fn scaled_conj<T: Scalar>(alpha: T) -> impl FnMut(&mut T, T, T) {
    move |c, a, b| *c = *c + alpha * a * b.conj()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    #[test]
    fn test_real_updaters() {
        let mut c = 1.0;
        add(&mut c, 2.0, 3.0);
        assert_eq!(c, 7.0);
        sub(&mut c, 1.0, 4.0);
        assert_eq!(c, 3.0);
        scaled(2.0)(&mut c, 1.0, 1.5);
        assert_eq!(c, 6.0);
    }

    #[test]
    fn test_conjugating_updaters() {
        let i = c64::new(0.0, 1.0);
        let mut c = c64::new(0.0, 0.0);
        add_conj(&mut c, c64::new(1.0, 0.0), i);
        assert_eq!(c, c64::new(0.0, -1.0));
        sub_conj(&mut c, c64::new(1.0, 0.0), i);
        assert_eq!(c, c64::new(0.0, 0.0));
        conj_add(&mut c, i, c64::new(1.0, 0.0));
        assert_eq!(c, c64::new(0.0, -1.0));
    }

    #[test]
    fn test_scaled_conj_keeps_alpha() {
        let mut c = c64::new(0.0, 0.0);
        scaled_conj(c64::new(0.0, 1.0))(&mut c, c64::new(1.0, 0.0), c64::new(0.0, 1.0));
        // i * 1 * conj(i) = i * -i = 1
        assert_eq!(c, c64::new(1.0, 0.0));
    }
}
