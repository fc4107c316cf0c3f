//! Physical correction functions for membrane flux and salinity.

use crate::transport::TransportConstants;
use ro_core::Real;

/// Reference temperature for the Arrhenius correction, in kelvin (25 °C).
pub const T_REF_K: Real = 298.15;

/// Celsius-to-kelvin offset.
pub const KELVIN_OFFSET: Real = 273.15;

/// Temperature correction factor for membrane water transport.
///
/// Piecewise Arrhenius form `exp(k * (1/298.15 - 1/(273.15 + T)))` with a
/// steeper activation constant below 25 °C. The slope is discontinuous at
/// 25 °C; that kink is a property of the published correlation, not an
/// implementation artifact. `temperature_correction_factor(25.0)` is exactly
/// 1.0 on either branch.
pub fn temperature_correction_factor(t_c: Real) -> Real {
    let consts = TransportConstants::default();
    tcf_with(t_c, &consts)
}

pub fn tcf_with(t_c: Real, consts: &TransportConstants) -> Real {
    let k = if t_c >= 25.0 {
        consts.tcf_activation_warm
    } else {
        consts.tcf_activation_cold
    };
    (k * (1.0 / T_REF_K - 1.0 / (KELVIN_OFFSET + t_c))).exp()
}

/// Osmotic pressure of a feed stream, in psi.
///
/// Linear-in-TDS approximation `1.12 * (273.15 + T) * (tds / 58500)`.
/// Non-positive TDS contributes no osmotic pressure. Non-finite inputs
/// propagate as NaN; callers treat a NaN result as a fatal input error
/// rather than coercing it to zero.
pub fn osmotic_pressure_psi(tds_mg_l: Real, t_c: Real) -> Real {
    let consts = TransportConstants::default();
    osmotic_pressure_with(tds_mg_l, t_c, &consts)
}

pub fn osmotic_pressure_with(tds_mg_l: Real, t_c: Real, consts: &TransportConstants) -> Real {
    if !tds_mg_l.is_finite() || !t_c.is_finite() {
        return Real::NAN;
    }
    if tds_mg_l <= 0.0 {
        return 0.0;
    }
    consts.osmotic_coefficient * (KELVIN_OFFSET + t_c) * (tds_mg_l / consts.salt_equivalent_mg_l)
}

/// Concentration polarization factor `exp(0.7 * recovery)`.
///
/// The recovery fraction must already be clamped to [0, 1); passing a
/// value >= 1 is a caller bug (`ro_core::clamp_recovery` does the clamp).
pub fn concentration_polarization(recovery: Real) -> Real {
    let consts = TransportConstants::default();
    polarization_with(recovery, &consts)
}

pub fn polarization_with(recovery: Real, consts: &TransportConstants) -> Real {
    debug_assert!((0.0..1.0).contains(&recovery), "recovery out of [0, 1)");
    (consts.polarization_exponent * recovery).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ro_core::{Tolerances, nearly_equal};

    #[test]
    fn tcf_is_unity_at_reference_temperature() {
        // 1/298.15 - 1/(273.15 + 25) == 0, so both branches give exactly 1.
        assert_eq!(temperature_correction_factor(25.0), 1.0);
    }

    #[test]
    fn tcf_monotonic_in_temperature() {
        assert!(temperature_correction_factor(30.0) > temperature_correction_factor(25.0));
        assert!(temperature_correction_factor(20.0) < temperature_correction_factor(25.0));
        assert!(temperature_correction_factor(10.0) < temperature_correction_factor(20.0));
    }

    #[test]
    fn tcf_cold_branch_is_steeper() {
        // Just below the threshold the cold activation constant applies,
        // pulling the factor further from 1 than the warm constant would.
        let consts = TransportConstants::default();
        let cold = temperature_correction_factor(24.0);
        let warm_k_at_24 =
            (consts.tcf_activation_warm * (1.0 / T_REF_K - 1.0 / (KELVIN_OFFSET + 24.0))).exp();
        assert!(cold < warm_k_at_24);
    }

    #[test]
    fn osmotic_pressure_seawater() {
        // 32 g/L at 25 °C is roughly 180 psi with this correlation.
        let op = osmotic_pressure_psi(32_000.0, 25.0);
        let expected = 1.12 * 298.15 * (32_000.0 / 58_500.0);
        assert!(nearly_equal(op, expected, Tolerances::default()));
        assert!(op > 150.0 && op < 220.0);
    }

    #[test]
    fn osmotic_pressure_zero_for_fresh_water() {
        assert_eq!(osmotic_pressure_psi(0.0, 25.0), 0.0);
        assert_eq!(osmotic_pressure_psi(-10.0, 25.0), 0.0);
    }

    #[test]
    fn osmotic_pressure_nan_for_non_finite_input() {
        assert!(osmotic_pressure_psi(f64::NAN, 25.0).is_nan());
        assert!(osmotic_pressure_psi(32_000.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn polarization_at_zero_recovery_is_unity() {
        assert_eq!(concentration_polarization(0.0), 1.0);
    }

    #[test]
    fn polarization_grows_with_recovery() {
        let lo = concentration_polarization(0.1);
        let hi = concentration_polarization(0.3);
        assert!(hi > lo);
        assert!(nearly_equal(hi, (0.7_f64 * 0.3).exp(), Tolerances::default()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tcf_positive_and_monotonic(t in -10.0_f64..60.0) {
            let f = temperature_correction_factor(t);
            prop_assert!(f > 0.0);
            // Warmer feed always permeates faster; both activation branches
            // meet at exactly 1.0 at 25 °C.
            let f_warmer = temperature_correction_factor(t + 1.0);
            prop_assert!(f_warmer > f);
        }

        #[test]
        fn osmotic_pressure_non_negative(tds in 0.0_f64..100_000.0, t in -10.0_f64..60.0) {
            let op = osmotic_pressure_psi(tds, t);
            prop_assert!(op.is_finite());
            prop_assert!(op >= 0.0);
        }
    }
}
