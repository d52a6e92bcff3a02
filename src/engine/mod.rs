//! # Stage: Statistics Engine
//!
//! ## Responsibility
//! Turn raw visitor/conversion counts per variant into conversion rates,
//! relative improvement over the control, a one-tailed "chance to beat
//! control" score from a pooled two-proportion z-test, and a winner flag.
//!
//! ## Guarantees
//! - Pure: same input, same output; no I/O, no logging, no shared state
//! - All-or-nothing: fatal input problems are reported before any result
//! - Order-preserving: `results[i]` describes `experiment.variants[i]`
//! - Non-panicking: empty arms and zero variance map to a zero score
//!
//! ## NOT Responsible For
//! - Choosing a single overall best variant (see [`winner::rank`])
//! - Evaluating targeting rules or persisting anything
//!
//! ## Sub-modules
//! - [`metrics`] — conversion rate, improvement, control lookup
//! - [`significance`] — z-test and normal CDF
//! - [`winner`] — decision rule and ranking helpers

pub mod metrics;
pub mod significance;
pub mod winner;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{CountField, DataWarning, StatsError};
use crate::model::{Experiment, StatisticalResult, Variant};

/// Results of one engine run plus any non-fatal data warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub results: Vec<StatisticalResult>,
    pub warnings: Vec<DataWarning>,
}

/// Compute per-variant statistics with the default configuration.
///
/// One result per variant, in the order of `experiment.variants`.
pub fn compute_statistics(experiment: &Experiment) -> Result<Vec<StatisticalResult>, StatsError> {
    compute_statistics_with(experiment, &EngineConfig::default())
}

/// Compute per-variant statistics with an explicit configuration.
pub fn compute_statistics_with(
    experiment: &Experiment,
    config: &EngineConfig,
) -> Result<Vec<StatisticalResult>, StatsError> {
    analyze(experiment, config).map(|a| a.results)
}

/// Validate the experiment, then compute results and collect data warnings.
pub fn analyze(experiment: &Experiment, config: &EngineConfig) -> Result<Analysis, StatsError> {
    let variants = &experiment.variants;
    let warnings = validate(variants)?;
    let control = metrics::find_control(variants)?;
    let control_rate = metrics::conversion_rate(control);

    let results = variants
        .iter()
        .map(|v| evaluate(v, control, control_rate, config))
        .collect();

    Ok(Analysis { results, warnings })
}

fn evaluate(variant: &Variant, control: &Variant, control_rate: f64, config: &EngineConfig) -> StatisticalResult {
    let rate = metrics::conversion_rate(variant);
    if variant.is_control {
        return StatisticalResult::new(variant.id.clone(), rate, 0.0, 0.0, false);
    }

    let improvement = metrics::improvement_pct(rate, control_rate);
    let significance = significance::chance_to_beat(variant, control, config.min_sample_size);
    let won = winner::is_winner(false, significance, improvement, config.winner_threshold);
    StatisticalResult::new(variant.id.clone(), rate, improvement, significance, won)
}

/// Reject empty or negative input; report conversions exceeding visitors as
/// warnings.
fn validate(variants: &[Variant]) -> Result<Vec<DataWarning>, StatsError> {
    if variants.is_empty() {
        return Err(StatsError::EmptyExperiment);
    }

    let mut warnings = Vec::new();
    for v in variants {
        if v.visitors < 0 {
            return Err(StatsError::NegativeCount {
                variant_id: v.id.clone(),
                field: CountField::Visitors,
                value: v.visitors,
            });
        }
        if v.conversions < 0 {
            return Err(StatsError::NegativeCount {
                variant_id: v.id.clone(),
                field: CountField::Conversions,
                value: v.conversions,
            });
        }
        if v.conversions > v.visitors {
            warnings.push(DataWarning::ConversionsExceedVisitors {
                variant_id: v.id.clone(),
                visitors: v.visitors,
                conversions: v.conversions,
            });
        }
    }
    Ok(warnings)
}
