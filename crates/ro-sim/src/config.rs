//! System configuration and validation.

use crate::error::{SimError, SimResult};
use ro_core::Real;
use ro_physics::MembraneEntry;
use serde::{Deserialize, Serialize};

/// One stage of the train: a bank of parallel pressure vessels, described by
/// the element count of each vessel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Elements per vessel. An empty list means the stage is a pass-through;
    /// a zero entry means that vessel contributes no throughput.
    pub vessels: Vec<u32>,
}

impl StageConfig {
    pub fn uniform(vessel_count: usize, elements_per_vessel: u32) -> Self {
        Self {
            vessels: vec![elements_per_vessel; vessel_count],
        }
    }

    pub fn element_count(&self) -> usize {
        self.vessels.iter().map(|&n| n as usize).sum()
    }
}

/// Immutable design input for one simulation run.
///
/// Field units follow RO datasheet practice: ft² areas, psi pressures,
/// m³/h flows, mg/L salinity, °C temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Stage topology, concentrate of one stage feeding the next.
    pub stages: Vec<StageConfig>,
    /// Active membrane area of one element, ft².
    pub element_area_ft2: Real,
    /// Feed temperature, °C.
    pub temperature_c: Real,
    /// Feed pressure at the first-stage inlet, psi.
    pub feed_pressure_psi: Real,
    /// Permeate-side back pressure, psi.
    pub permeate_pressure_psi: Real,
    /// Feed flow into the train, m³/h.
    pub feed_flow_m3_h: Real,
    /// Performance derating multiplier, 0–1.
    pub fouling_factor: Real,
    /// Feed salinity, mg/L.
    pub feed_tds_mg_l: Real,
    /// Nominal salt rejection fraction, 0–1.
    pub salt_rejection: Real,
}

impl Default for SystemConfig {
    /// The reference two-stage seawater train: 6+3 vessels, 7 elements each.
    fn default() -> Self {
        Self {
            stages: vec![StageConfig::uniform(6, 7), StageConfig::uniform(3, 7)],
            element_area_ft2: 400.0,
            temperature_c: 28.0,
            feed_pressure_psi: 600.0,
            permeate_pressure_psi: 14.7,
            feed_flow_m3_h: 150.0,
            fouling_factor: 0.8,
            feed_tds_mg_l: 32_000.0,
            salt_rejection: 0.998,
        }
    }
}

impl SystemConfig {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn vessel_count(&self) -> usize {
        self.stages.iter().map(|s| s.vessels.len()).sum()
    }

    /// Total elements across the stage×vessel matrix.
    pub fn total_elements(&self) -> usize {
        self.stages.iter().map(|s| s.element_count()).sum()
    }

    /// Same design with the salt rejection of a catalog membrane.
    pub fn with_membrane(mut self, membrane: &MembraneEntry) -> Self {
        self.salt_rejection = membrane.rejection_fraction();
        self
    }

    /// Fail fast on configurations the engine cannot walk. Surface errors
    /// here, never by silently defaulting a bad field mid-simulation.
    pub fn validate(&self) -> SimResult<()> {
        if self.stages.is_empty() {
            return Err(SimError::InvalidConfig {
                what: "at least one stage is required",
            });
        }
        if !self.feed_flow_m3_h.is_finite() || self.feed_flow_m3_h <= 0.0 {
            return Err(SimError::InvalidConfig {
                what: "feed flow must be positive and finite",
            });
        }
        if !self.temperature_c.is_finite() {
            return Err(SimError::InvalidConfig {
                what: "temperature must be finite",
            });
        }
        if !self.feed_pressure_psi.is_finite() || !self.permeate_pressure_psi.is_finite() {
            return Err(SimError::InvalidConfig {
                what: "pressures must be finite",
            });
        }
        if !self.element_area_ft2.is_finite() || self.element_area_ft2 < 0.0 {
            return Err(SimError::InvalidConfig {
                what: "element area must be non-negative and finite",
            });
        }
        if !self.feed_tds_mg_l.is_finite() || self.feed_tds_mg_l < 0.0 {
            return Err(SimError::InvalidConfig {
                what: "feed TDS must be non-negative and finite",
            });
        }
        if !(0.0..=1.0).contains(&self.fouling_factor) {
            return Err(SimError::InvalidConfig {
                what: "fouling factor must be within [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.salt_rejection) {
            return Err(SimError::InvalidConfig {
                what: "salt rejection must be within [0, 1]",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_train_shape() {
        let config = SystemConfig::default();
        assert_eq!(config.stage_count(), 2);
        assert_eq!(config.vessel_count(), 9);
        assert_eq!(config.total_elements(), 63);
        config.validate().unwrap();
    }

    #[test]
    fn zero_feed_flow_is_rejected() {
        let config = SystemConfig {
            feed_flow_m3_h: 0.0,
            ..SystemConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }

    #[test]
    fn non_finite_temperature_is_rejected() {
        let config = SystemConfig {
            temperature_c: f64::NAN,
            ..SystemConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn fraction_bounds_are_enforced() {
        let config = SystemConfig {
            fouling_factor: 1.2,
            ..SystemConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SystemConfig {
            salt_rejection: -0.1,
            ..SystemConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn no_stages_is_rejected() {
        let config = SystemConfig {
            stages: vec![],
            ..SystemConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_element_vessels_are_legal() {
        let config = SystemConfig {
            stages: vec![StageConfig { vessels: vec![0, 7] }],
            ..SystemConfig::default()
        };
        config.validate().unwrap();
        assert_eq!(config.total_elements(), 7);
    }

    #[test]
    fn membrane_selection_sets_rejection() {
        let membrane = ro_physics::search(Some(ro_physics::MembraneClass::Sw), "sw-4040")[0];
        let config = SystemConfig::default().with_membrane(membrane);
        assert!((config.salt_rejection - 0.996).abs() < 1e-12);
    }
}
