//! Bounds assertions for the unchecked access paths.
//!
//! The element accessors `get`, `get_mut` and indexing only verify their
//! indices through [`assert_bounds!`]. The assertion is compiled in for
//! debug builds and whenever the `check-bounds` feature is enabled, and is
//! a no-op otherwise. `at` always checks and returns a `TensorError`.

/// Whether bounds assertions are compiled into this build.
pub const CHECK_BOUNDS: bool = cfg!(any(debug_assertions, feature = "check-bounds"));

/// Assert a bounds condition in checked builds.
macro_rules! assert_bounds {
    ($cond:expr, $($arg:tt)+) => {
        if $crate::bounds::CHECK_BOUNDS {
            assert!($cond, $($arg)+);
        }
    };
}

pub(crate) use assert_bounds;
