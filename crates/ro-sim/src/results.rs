//! Result record types.
//!
//! Fields are plain `f64` with unit-suffixed names; consumers (tables,
//! charts) read them positionally by stage/vessel/element indices.

use serde::{Deserialize, Serialize};

/// Performance of one membrane element, recorded in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// 1-based stage index.
    pub stage: u32,
    /// 1-based vessel index within the stage.
    pub vessel: u32,
    /// 1-based element index within the vessel.
    pub element: u32,
    /// Feed flow entering this element, m³/h.
    pub feed_flow_m3_h: f64,
    /// Feed salinity entering this element, mg/L.
    pub feed_tds_mg_l: f64,
    /// Element recovery, percent.
    pub recovery_pct: f64,
    /// Concentration polarization factor at the membrane surface.
    pub polarization: f64,
    /// Concentrate-side osmotic pressure, psi.
    pub osmotic_pressure_psi: f64,
    /// True when the 30 % per-element policy cap bounded the recovery.
    pub recovery_capped: bool,
}

/// Train-level summary of one simulation run. Rebuilt from scratch on every
/// run; never incrementally mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    /// Overall recovery, percent (capped at 85).
    pub recovery_pct: f64,
    /// True when the 85 % system policy cap bounded the recovery.
    pub recovery_capped: bool,
    /// Limiting recovery, percent. A fixed placeholder in this model.
    pub limiting_recovery_pct: f64,
    /// Average permeate flux, GFD.
    pub average_flux_gfd: f64,
    /// Total permeate flow, m³/h (uncapped estimate).
    pub total_permeate_flow_m3_h: f64,
    /// Blended permeate salinity, mg/L.
    pub permeate_tds_mg_l: f64,
    /// Per-element recovery implied by a uniform-recovery model, percent.
    pub average_element_recovery_pct: f64,
    /// Concentration polarization at the concentrate end.
    pub concentrate_polarization: f64,
    /// Osmotic pressure of the concentrate, psi.
    pub concentrate_osmotic_pressure_psi: f64,
    /// Osmotic pressure of the feed, psi.
    pub feed_osmotic_pressure_psi: f64,
    /// Reported train pressure drop per stage, psi.
    pub stage_pressure_drops_psi: Vec<f64>,
}

/// Everything `simulate` produces for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    /// One record per element, in traversal order.
    pub elements: Vec<ElementRecord>,
    pub system: SystemSummary,
}
