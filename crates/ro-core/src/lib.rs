//! ro-core: stable foundation for the RO design engine.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RoError, RoResult};
pub use numeric::*;
