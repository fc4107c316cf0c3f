//! Error types for simulation runs.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by `simulate`.
///
/// Policy caps (30 % element recovery, 85 % system recovery) are not errors;
/// they are reported through the `recovery_capped` flags on the result
/// records.
#[derive(Error, Debug)]
pub enum SimError {
    /// Rejected before any traversal begins.
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    /// An element was entered with zero feed flow; its recovery would
    /// divide by zero.
    #[error("Invalid feed flow at stage {stage}, vessel {vessel}, element {element}")]
    InvalidFeedFlow { stage: u32, vessel: u32, element: u32 },

    /// A non-finite value surfaced mid-traversal. The run is aborted; no
    /// partial results are returned.
    #[error(
        "Numeric degeneracy at stage {stage}, vessel {vessel}, element {element}: {what} = {value}"
    )]
    Degenerate {
        stage: u32,
        vessel: u32,
        element: u32,
        what: &'static str,
        value: f64,
    },
}
