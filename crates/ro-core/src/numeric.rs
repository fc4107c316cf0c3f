use crate::{RoError, RoResult};

/// Floating point type used throughout the engine
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> RoResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RoError::NonFinite { what, value: v })
    }
}

/// Clamp a recovery fraction to the domain the polarization correlation
/// accepts: [0, 1).
pub fn clamp_recovery(r: Real) -> Real {
    r.clamp(0.0, 1.0 - Real::EPSILON)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamp_recovery_lands_in_domain(r in -10.0_f64..10.0) {
            let clamped = clamp_recovery(r);
            prop_assert!((0.0..1.0).contains(&clamped));
            // In-domain values pass through untouched.
            if (0.0..1.0 - Real::EPSILON).contains(&r) {
                prop_assert_eq!(clamped, r);
            }
        }

        #[test]
        fn nearly_equal_is_reflexive_and_symmetric(a in -1e12_f64..1e12, b in -1e12_f64..1e12) {
            let tol = Tolerances::default();
            prop_assert!(nearly_equal(a, a, tol));
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }
    }
}
