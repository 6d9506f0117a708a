use core::fmt::{Debug, Display};
use core::iter::Sum;

use num_traits::Float;

/// Floating point type used for configuration values and reports.
pub type Real = f64;

/// Numeric scalar a fluid state is expressed in.
///
/// Algorithms are generic over `S: Scalar` and monomorphize to plain `f32`
/// or `f64` arithmetic. Math (`abs`, `sqrt`, `max`, ...) comes from
/// [`num_traits::Float`].
pub trait Scalar: Float + Debug + Display + Send + Sync + Sum + 'static {
    /// Convert a configuration-level `f64` literal into this scalar.
    fn lit(v: f64) -> Self;

    /// Widen to `f64` for reporting and tolerance checks.
    fn as_f64(self) -> f64;
}

impl Scalar for f32 {
    #[inline]
    fn lit(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Scalar for f64 {
    #[inline]
    fn lit(v: f64) -> Self {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Loose tolerance suited to single-precision states.
    pub fn single_precision() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-5,
        }
    }
}

pub fn nearly_equal<S: Scalar>(a: S, b: S, tol: Tolerances) -> bool {
    let (a, b) = (a.as_f64(), b.as_f64());
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn nearly_equal_is_reflexive(a in -1e6_f64..1e6) {
            prop_assert!(nearly_equal(a, a, Tolerances::default()));
        }
    }
}
