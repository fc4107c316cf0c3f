//! Static catalog of commercial membrane elements.
//!
//! Rejection and test-pressure figures come from the manufacturer
//! datasheets; the catalog exists so a design can pull its nominal salt
//! rejection from a concrete element model instead of a hand-typed number.

use ro_core::Real;

/// Application class of a membrane element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembraneClass {
    /// Ultra-low-pressure brackish water.
    Ulp,
    /// Brackish water.
    Bw,
    /// Seawater.
    Sw,
}

impl MembraneClass {
    pub fn is_seawater(&self) -> bool {
        matches!(self, MembraneClass::Sw)
    }
}

impl core::fmt::Display for MembraneClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            MembraneClass::Ulp => "ULP",
            MembraneClass::Bw => "BW",
            MembraneClass::Sw => "SW",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembraneEntry {
    pub model: &'static str,
    pub class: MembraneClass,
    /// Nominal permeate flow at test conditions, m³/d.
    pub nominal_flow_m3_d: Real,
    /// Nominal salt rejection, percent.
    pub rejection_pct: Real,
    /// Test pressure, psi.
    pub test_pressure_psi: Real,
}

impl MembraneEntry {
    /// Nominal salt rejection as a fraction, the form `SystemConfig` wants.
    pub fn rejection_fraction(&self) -> Real {
        self.rejection_pct / 100.0
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }
        self.model.to_ascii_lowercase().contains(&query)
    }
}

const MEMBRANE_CATALOG: [MembraneEntry; 5] = [
    MembraneEntry {
        model: "ZEKINDO ULP-4040",
        class: MembraneClass::Ulp,
        nominal_flow_m3_d: 9.5,
        rejection_pct: 99.3,
        test_pressure_psi: 150.0,
    },
    MembraneEntry {
        model: "ZEKINDO ULP-8040-400",
        class: MembraneClass::Ulp,
        nominal_flow_m3_d: 39.7,
        rejection_pct: 99.5,
        test_pressure_psi: 150.0,
    },
    MembraneEntry {
        model: "ZEKINDO BW-4040",
        class: MembraneClass::Bw,
        nominal_flow_m3_d: 9.1,
        rejection_pct: 99.65,
        test_pressure_psi: 255.0,
    },
    MembraneEntry {
        model: "ZEKINDO SW-4040",
        class: MembraneClass::Sw,
        nominal_flow_m3_d: 4.5,
        rejection_pct: 99.6,
        test_pressure_psi: 800.0,
    },
    MembraneEntry {
        model: "ZEKINDO SW-400 HR",
        class: MembraneClass::Sw,
        nominal_flow_m3_d: 26.0,
        rejection_pct: 99.7,
        test_pressure_psi: 800.0,
    },
];

/// The full catalog, in datasheet order.
pub fn membranes() -> &'static [MembraneEntry] {
    &MEMBRANE_CATALOG
}

/// Catalog entries of one class matching a case-insensitive substring query.
pub fn search(class: Option<MembraneClass>, query: &str) -> Vec<&'static MembraneEntry> {
    MEMBRANE_CATALOG
        .iter()
        .filter(|e| class.is_none_or(|c| e.class == c))
        .filter(|e| e.matches_query(query))
        .collect()
}
