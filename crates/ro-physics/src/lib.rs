//! ro-physics: stateless membrane transport physics.
//!
//! Provides:
//! - temperature, osmotic-pressure and polarization correction functions
//! - the named transport constants of the simplified RO model
//! - a catalog of commercial membrane elements
//!
//! All correlations are empirical, in the field units RO datasheets use
//! (psi, m³/h, mg/L, ft²). They are deterministic functions of their
//! arguments and carry no state.

pub mod catalog;
pub mod corrections;
pub mod transport;

// Re-exports
pub use catalog::{MembraneClass, MembraneEntry, membranes, search};
pub use corrections::{
    concentration_polarization, osmotic_pressure_psi, osmotic_pressure_with,
    polarization_with, tcf_with, temperature_correction_factor,
};
pub use transport::TransportConstants;
