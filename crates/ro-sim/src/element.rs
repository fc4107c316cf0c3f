//! Single-element membrane transport step.

use crate::config::SystemConfig;
use crate::error::{SimError, SimResult};
use crate::results::ElementRecord;
use ro_core::{Real, clamp_recovery, ensure_finite};
use ro_physics::TransportConstants;
use ro_physics::corrections::{osmotic_pressure_with, polarization_with, tcf_with};

/// Feed state entering one element. Moved by value into each step; the step
/// consumes it and hands back the successor for the next element in series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ElementState {
    pub feed_flow_m3_h: Real,
    pub feed_tds_mg_l: Real,
    pub feed_pressure_psi: Real,
    /// 0-based position in the overall traversal, carried across vessel and
    /// stage boundaries. Drives the pressure-drop attenuation.
    pub position: usize,
}

/// Run-constant inputs shared by every element step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepContext<'a> {
    pub consts: &'a TransportConstants,
    pub tcf: Real,
    pub temperature_c: Real,
    pub permeate_pressure_psi: Real,
    pub element_area_ft2: Real,
    pub fouling_factor: Real,
    pub salt_rejection: Real,
}

impl<'a> StepContext<'a> {
    pub fn new(config: &SystemConfig, consts: &'a TransportConstants) -> Self {
        Self {
            consts,
            tcf: tcf_with(config.temperature_c, consts),
            temperature_c: config.temperature_c,
            permeate_pressure_psi: config.permeate_pressure_psi,
            element_area_ft2: config.element_area_ft2,
            fouling_factor: config.fouling_factor,
            salt_rejection: config.salt_rejection,
        }
    }
}

/// 1-based location of an element, for error reporting and records.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ElementPath {
    pub stage: u32,
    pub vessel: u32,
    pub element: u32,
}

impl ElementPath {
    fn degenerate(&self, what: &'static str, value: Real) -> SimError {
        SimError::Degenerate {
            stage: self.stage,
            vessel: self.vessel,
            element: self.element,
            what,
            value,
        }
    }

    fn check_finite(&self, value: Real, what: &'static str) -> SimResult<Real> {
        ensure_finite(value, what).map_err(|_| self.degenerate(what, value))
    }
}

/// Advance one element: produce its performance record and the successor
/// feed state.
///
/// Negative net driving pressure is a valid degenerate operating point and
/// propagates as negative permeate flow; only exact-zero feed flow and
/// non-finite intermediates abort the run.
pub(crate) fn advance(
    state: ElementState,
    ctx: &StepContext<'_>,
    path: ElementPath,
) -> SimResult<(ElementRecord, ElementState)> {
    if state.feed_flow_m3_h == 0.0 {
        return Err(SimError::InvalidFeedFlow {
            stage: path.stage,
            vessel: path.vessel,
            element: path.element,
        });
    }

    let consts = ctx.consts;
    let drop_psi = consts.element_drop_psi(state.position);

    let feed_op = path.check_finite(
        osmotic_pressure_with(state.feed_tds_mg_l, ctx.temperature_c, consts),
        "feed osmotic pressure",
    )?;
    let permeate_tds = state.feed_tds_mg_l * (1.0 - ctx.salt_rejection);
    let permeate_op = osmotic_pressure_with(permeate_tds, ctx.temperature_c, consts);

    // Not clamped: a negative NDP must surface downstream as negative
    // permeate flow and recovery.
    let net_driving_psi = path.check_finite(
        state.feed_pressure_psi
            - drop_psi / 2.0
            - ctx.permeate_pressure_psi
            - (feed_op - permeate_op),
        "net driving pressure",
    )?;

    let permeate_flow_m3_h = path.check_finite(
        consts.element_permeability
            * ctx.element_area_ft2
            * ctx.tcf
            * ctx.fouling_factor
            * net_driving_psi
            / consts.hours_per_day,
        "permeate flow",
    )?;

    let raw_recovery = path.check_finite(
        permeate_flow_m3_h / state.feed_flow_m3_h,
        "element recovery",
    )?;
    let recovery_capped = raw_recovery > consts.element_recovery_cap;
    let recovery = raw_recovery.min(consts.element_recovery_cap);

    let concentrate_tds = path.check_finite(
        state.feed_tds_mg_l / (1.0 - recovery),
        "concentrate TDS",
    )?;
    let polarization = polarization_with(clamp_recovery(recovery), consts);
    let osmotic_pressure_psi = if state.feed_tds_mg_l > 0.0 {
        path.check_finite(
            feed_op * (concentrate_tds / state.feed_tds_mg_l) * polarization,
            "concentrate osmotic pressure",
        )?
    } else {
        0.0
    };

    let record = ElementRecord {
        stage: path.stage,
        vessel: path.vessel,
        element: path.element,
        feed_flow_m3_h: state.feed_flow_m3_h,
        feed_tds_mg_l: state.feed_tds_mg_l,
        recovery_pct: recovery * 100.0,
        polarization,
        osmotic_pressure_psi,
        recovery_capped,
    };

    // Successor feed: the uncapped permeate flow leaves the feed stream and
    // the element's full pressure drop is taken off the line.
    let successor = ElementState {
        feed_flow_m3_h: state.feed_flow_m3_h - permeate_flow_m3_h,
        feed_tds_mg_l: concentrate_tds,
        feed_pressure_psi: state.feed_pressure_psi - drop_psi,
        position: state.position + 1,
    };

    Ok((record, successor))
}
