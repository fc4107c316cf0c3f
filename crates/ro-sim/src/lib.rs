//! ro-sim: element-by-element RO train simulation.
//!
//! The engine walks a Stage → Vessel → Element tree: vessels within a stage
//! run in parallel from shared inlet conditions, elements within a vessel run
//! in series, and the concentrate of one stage feeds the next. Each element
//! applies the membrane transport correlations from `ro-physics` and the
//! system aggregator derives train-level recovery, flux and concentration
//! metrics.
//!
//! One run is a pure function of its inputs: no I/O, no shared state, no
//! partial results on failure.

pub mod config;
pub mod error;
pub mod results;
pub mod system;

// Internal modules
mod element;
mod walker;

// Re-exports for public API
pub use config::{StageConfig, SystemConfig};
pub use error::{SimError, SimResult};
pub use results::{ElementRecord, RunResults, SystemSummary};
pub use system::{simulate, simulate_with};
