//! System aggregator: full-train traversal plus train-level metrics.

use crate::config::SystemConfig;
use crate::element::{ElementState, StepContext};
use crate::error::SimResult;
use crate::results::{RunResults, SystemSummary};
use crate::walker::run_stage;
use ro_core::clamp_recovery;
use ro_physics::TransportConstants;
use ro_physics::corrections::{osmotic_pressure_with, polarization_with, tcf_with};
use tracing::{debug, info};

/// Simulate one train with the reference transport constants.
pub fn simulate(config: &SystemConfig) -> SimResult<RunResults> {
    simulate_with(config, &TransportConstants::default())
}

/// Simulate one train with explicit transport constants.
///
/// Validates the configuration first, then walks every stage in order
/// (concentrate of one stage feeding the next) and derives the train-level
/// summary. A failed run yields no results at all.
pub fn simulate_with(
    config: &SystemConfig,
    consts: &TransportConstants,
) -> SimResult<RunResults> {
    config.validate()?;

    let tcf = tcf_with(config.temperature_c, consts);
    let feed_op = osmotic_pressure_with(config.feed_tds_mg_l, config.temperature_c, consts);
    let total_elements = config.total_elements();
    debug!(
        stages = config.stage_count(),
        total_elements, tcf, "starting simulation run"
    );

    let ctx = StepContext::new(config, consts);
    let mut elements = Vec::with_capacity(total_elements);
    let mut state = ElementState {
        feed_flow_m3_h: config.feed_flow_m3_h,
        feed_tds_mg_l: config.feed_tds_mg_l,
        feed_pressure_psi: config.feed_pressure_psi,
        position: 0,
    };
    for (stage_index, stage) in config.stages.iter().enumerate() {
        state = run_stage(stage_index, &stage.vessels, state, &ctx, &mut elements)?;
    }

    let system = summarize(config, consts, tcf, feed_op, total_elements);
    info!(
        recovery_pct = system.recovery_pct,
        total_permeate_flow_m3_h = system.total_permeate_flow_m3_h,
        elements = elements.len(),
        "simulation run complete"
    );

    Ok(RunResults { elements, system })
}

/// Train-level metrics from the lumped single-pass model.
fn summarize(
    config: &SystemConfig,
    consts: &TransportConstants,
    tcf: f64,
    feed_op: f64,
    total_elements: usize,
) -> SystemSummary {
    let first_stage_drop = consts.stage_drop_psi(0);

    // Lumped permeate estimate over the whole bank, permeate-side osmotic
    // pressure taken as zero.
    let system_ndp = config.feed_pressure_psi
        - first_stage_drop / 2.0
        - config.permeate_pressure_psi
        - feed_op;
    let total_permeate_flow = consts.bank_permeability
        * config.element_area_ft2
        * tcf
        * config.fouling_factor
        * system_ndp
        * total_elements as f64
        / consts.hours_per_day;

    let raw_recovery = total_permeate_flow / config.feed_flow_m3_h;
    let recovery_capped = raw_recovery > consts.system_recovery_cap;
    let recovery = raw_recovery.min(consts.system_recovery_cap);

    // Per-element recovery implied by a uniform-recovery model,
    // 1 - (1 - Y)^(1/n). Zero elements means zero recovery, not NaN.
    let average_element_recovery = if total_elements == 0 {
        0.0
    } else {
        1.0 - (1.0 - recovery).powf(1.0 / total_elements as f64)
    };

    let concentrate_polarization =
        polarization_with(clamp_recovery(average_element_recovery), consts);
    let average_flux = if total_elements == 0 {
        0.0
    } else {
        total_permeate_flow / (total_elements as f64 * config.element_area_ft2)
    };

    SystemSummary {
        recovery_pct: recovery * 100.0,
        recovery_capped,
        limiting_recovery_pct: consts.limiting_recovery * 100.0,
        average_flux_gfd: average_flux,
        total_permeate_flow_m3_h: total_permeate_flow,
        permeate_tds_mg_l: config.feed_tds_mg_l * (1.0 - config.salt_rejection),
        average_element_recovery_pct: average_element_recovery * 100.0,
        concentrate_polarization,
        concentrate_osmotic_pressure_psi: feed_op / (1.0 - recovery),
        feed_osmotic_pressure_psi: feed_op,
        stage_pressure_drops_psi: (0..config.stage_count())
            .map(|i| consts.stage_drop_psi(i))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StageConfig;
    use crate::error::SimError;

    #[test]
    fn default_train_hits_the_system_cap() {
        let results = simulate(&SystemConfig::default()).unwrap();
        assert_eq!(results.elements.len(), 63);
        assert_eq!(results.system.recovery_pct, 85.0);
        assert!(results.system.recovery_capped);
        assert_eq!(results.system.limiting_recovery_pct, 85.0);
        assert_eq!(results.system.stage_pressure_drops_psi, vec![20.0, 24.0]);
    }

    #[test]
    fn invalid_config_fails_before_traversal() {
        let config = SystemConfig {
            feed_flow_m3_h: 0.0,
            ..SystemConfig::default()
        };
        let err = simulate(&config).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }

    #[test]
    fn all_zero_topology_has_no_throughput() {
        let config = SystemConfig {
            stages: vec![StageConfig { vessels: vec![] }],
            ..SystemConfig::default()
        };
        let results = simulate(&config).unwrap();
        assert!(results.elements.is_empty());
        assert_eq!(results.system.average_element_recovery_pct, 0.0);
        assert_eq!(results.system.average_flux_gfd, 0.0);
        assert_eq!(results.system.total_permeate_flow_m3_h, 0.0);
    }

    #[test]
    fn runs_are_deterministic() {
        let config = SystemConfig::default();
        let a = simulate(&config).unwrap();
        let b = simulate(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn records_follow_traversal_order() {
        let config = SystemConfig {
            stages: vec![StageConfig::uniform(2, 2), StageConfig::uniform(1, 2)],
            ..SystemConfig::default()
        };
        let results = simulate(&config).unwrap();
        let order: Vec<(u32, u32, u32)> = results
            .elements
            .iter()
            .map(|e| (e.stage, e.vessel, e.element))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, 1, 1),
                (1, 1, 2),
                (1, 2, 1),
                (1, 2, 2),
                (2, 1, 1),
                (2, 1, 2),
            ]
        );
    }
}
