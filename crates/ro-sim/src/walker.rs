//! Stage and vessel traversal.
//!
//! Vessels within a stage are identical parallel copies sharing the stage
//! inlet conditions; only the last vessel's exit state is retained and
//! re-multiplied across the bank. The global element position is threaded
//! through return values, never held in shared mutable state, and is not
//! reset at vessel or stage boundaries.

use crate::element::{ElementPath, ElementState, StepContext, advance};
use crate::error::SimResult;
use crate::results::ElementRecord;
use tracing::debug;

/// Walk one vessel: elements strictly in series, each consuming its
/// predecessor's successor state.
fn run_vessel(
    inlet: ElementState,
    element_count: u32,
    ctx: &StepContext<'_>,
    stage: u32,
    vessel: u32,
    records: &mut Vec<ElementRecord>,
) -> SimResult<ElementState> {
    let mut state = inlet;
    for element in 1..=element_count {
        let path = ElementPath {
            stage,
            vessel,
            element,
        };
        let (record, successor) = advance(state, ctx, path)?;
        records.push(record);
        state = successor;
    }
    Ok(state)
}

/// Walk one stage: split the inlet flow evenly across the vessel bank, run
/// every vessel from the shared inlet, and re-multiply the last vessel's
/// exit flow to represent the full bank.
///
/// A stage with no vessels passes its inlet through unchanged.
pub(crate) fn run_stage(
    stage_index: usize,
    vessels: &[u32],
    inlet: ElementState,
    ctx: &StepContext<'_>,
    records: &mut Vec<ElementRecord>,
) -> SimResult<ElementState> {
    if vessels.is_empty() {
        debug!(stage = stage_index + 1, "stage has no vessels, passing through");
        return Ok(inlet);
    }

    let vessel_count = vessels.len();
    let flow_per_vessel = inlet.feed_flow_m3_h / vessel_count as f64;

    let mut position = inlet.position;
    let mut exit = inlet;
    for (vessel_index, &element_count) in vessels.iter().enumerate() {
        let vessel_inlet = ElementState {
            feed_flow_m3_h: flow_per_vessel,
            feed_tds_mg_l: inlet.feed_tds_mg_l,
            feed_pressure_psi: inlet.feed_pressure_psi,
            position,
        };
        exit = run_vessel(
            vessel_inlet,
            element_count,
            ctx,
            stage_index as u32 + 1,
            vessel_index as u32 + 1,
            records,
        )?;
        position = exit.position;
    }

    debug!(
        stage = stage_index + 1,
        exit_flow_m3_h = exit.feed_flow_m3_h * vessel_count as f64,
        exit_tds_mg_l = exit.feed_tds_mg_l,
        "stage complete"
    );

    Ok(ElementState {
        feed_flow_m3_h: exit.feed_flow_m3_h * vessel_count as f64,
        feed_tds_mg_l: exit.feed_tds_mg_l,
        feed_pressure_psi: exit.feed_pressure_psi,
        position,
    })
}
