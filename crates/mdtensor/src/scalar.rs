//! Scalar traits for tensor element types.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub use faer::c64;

/// Trait for scalar types supported by mdtensor.
///
/// A scalar is a field element: closed under `+ - * /` and negation, with a
/// conjugation and an associated real type used for norms. Real types
/// conjugate to themselves.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The real type associated with this scalar.
    type Real: RealScalar;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Complex conjugate; the identity for real types.
    fn conj(self) -> Self;

    /// Squared magnitude, `conj(x) * x` as a real number.
    fn abs2(self) -> Self::Real;

    /// Embeds a real number.
    fn from_real(re: Self::Real) -> Self;
}

/// Real scalars: ordered, with a square root.
pub trait RealScalar: Scalar<Real = Self> + PartialOrd {
    fn sqrt(self) -> Self;
}

macro_rules! impl_real_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            type Real = $t;

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn conj(self) -> Self {
                self
            }

            #[inline]
            fn abs2(self) -> Self {
                self * self
            }

            #[inline]
            fn from_real(re: Self) -> Self {
                re
            }
        }

        impl RealScalar for $t {
            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }
        }
    )*};
}

impl_real_scalar!(f32, f64);

impl Scalar for c64 {
    type Real = f64;

    #[inline]
    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    #[inline]
    fn conj(self) -> Self {
        c64::new(self.re, -self.im)
    }

    #[inline]
    fn abs2(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn from_real(re: f64) -> Self {
        c64::new(re, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c64_creation() {
        let z = c64::new(1.0, 2.0);
        assert_eq!(z.re, 1.0);
        assert_eq!(z.im, 2.0);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(f64::one(), 1.0);
        assert_eq!(f32::one(), 1.0f32);
        assert_eq!(c64::zero(), c64::new(0.0, 0.0));
        assert_eq!(c64::one(), c64::new(1.0, 0.0));
    }

    #[test]
    fn test_conj() {
        assert_eq!(Scalar::conj(-3.0f64), -3.0);
        assert_eq!(Scalar::conj(c64::new(1.0, 2.0)), c64::new(1.0, -2.0));
    }

    #[test]
    fn test_abs2() {
        assert_eq!((-3.0f64).abs2(), 9.0);
        assert_eq!(c64::new(3.0, 4.0).abs2(), 25.0);
    }

    #[test]
    fn test_real_sqrt() {
        assert_eq!(RealScalar::sqrt(16.0f64), 4.0);
        assert_eq!(RealScalar::sqrt(9.0f32), 3.0);
    }

    #[test]
    fn test_from_real() {
        assert_eq!(c64::from_real(2.5), c64::new(2.5, 0.0));
        assert_eq!(f64::from_real(2.5), 2.5);
    }
}
