//! Named constants of the simplified transport model.
//!
//! These are modeling stand-ins inherited from the reference design, not
//! rigorous membrane-specific data. They live in one overridable struct so a
//! membrane-specific data set can later replace them without touching the
//! traversal algorithm.

use ro_core::Real;
use serde::{Deserialize, Serialize};

/// Tunable constants of the element and system transport model.
///
/// `Default` yields the reference values; `ro_sim::simulate_with` accepts an
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConstants {
    /// Arrhenius activation constant for T >= 25 °C.
    pub tcf_activation_warm: Real,
    /// Arrhenius activation constant for T < 25 °C (steeper branch).
    pub tcf_activation_cold: Real,
    /// Coefficient of the linear osmotic-pressure approximation.
    pub osmotic_coefficient: Real,
    /// NaCl-equivalent divisor of the osmotic-pressure approximation, mg/L.
    pub salt_equivalent_mg_l: Real,
    /// Exponent of the concentration-polarization correlation.
    pub polarization_exponent: Real,
    /// Water permeability of one element (the A coefficient).
    pub element_permeability: Real,
    /// Lumped permeability used for the system-level permeate estimate.
    pub bank_permeability: Real,
    /// Base pressure drop across one element, psi.
    pub element_pressure_drop_psi: Real,
    /// Per-position attenuation step of the element pressure drop.
    /// The factor `1 - step * position` is floored at zero.
    pub position_attenuation_step: Real,
    /// Reported train pressure drop of the first stage, psi.
    pub stage_pressure_drop_psi: Real,
    /// Multiplier on the train pressure drop for stages after the first.
    pub downstream_stage_drop_factor: Real,
    /// Policy cap on per-element recovery.
    pub element_recovery_cap: Real,
    /// Policy cap on system recovery.
    pub system_recovery_cap: Real,
    /// Fixed limiting-recovery placeholder (see DESIGN.md).
    pub limiting_recovery: Real,
    /// Daily-to-hourly flow conversion divisor.
    pub hours_per_day: Real,
}

impl Default for TransportConstants {
    fn default() -> Self {
        Self {
            tcf_activation_warm: 2640.0,
            tcf_activation_cold: 3020.0,
            osmotic_coefficient: 1.12,
            salt_equivalent_mg_l: 58_500.0,
            polarization_exponent: 0.7,
            element_permeability: 0.1,
            bank_permeability: 1.0,
            element_pressure_drop_psi: 3.0,
            position_attenuation_step: 0.1,
            stage_pressure_drop_psi: 20.0,
            downstream_stage_drop_factor: 1.2,
            element_recovery_cap: 0.30,
            system_recovery_cap: 0.85,
            limiting_recovery: 0.85,
            hours_per_day: 24.0,
        }
    }
}

impl TransportConstants {
    /// Pressure drop of the element at the given 0-based global position.
    ///
    /// Early elements see the full base drop; the attenuation factor shrinks
    /// by one step per position and never goes negative.
    pub fn element_drop_psi(&self, position: usize) -> Real {
        let factor = (1.0 - self.position_attenuation_step * position as Real).max(0.0);
        self.element_pressure_drop_psi * factor
    }

    /// Reported train pressure drop of the given 0-based stage index.
    pub fn stage_drop_psi(&self, stage_index: usize) -> Real {
        if stage_index == 0 {
            self.stage_pressure_drop_psi
        } else {
            self.stage_pressure_drop_psi * self.downstream_stage_drop_factor
        }
    }
}
