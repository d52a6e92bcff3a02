//! Portfolio aggregates across a list of experiments, as shown at the top of
//! the dashboard.

use serde::Serialize;

use crate::model::{Experiment, ExperimentStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_experiments: usize,
    pub running_experiments: usize,
    /// Visitors summed over every variant of every experiment.
    pub total_visitors: i64,
    /// Mean of the per-experiment pooled conversion rates, as a percentage.
    /// Experiments without traffic contribute a rate of 0.
    pub avg_conversion_rate: f64,
}

/// Pooled conversion rate of one experiment (all variants), as a fraction.
fn pooled_rate(experiment: &Experiment) -> f64 {
    let visitors: i64 = experiment.variants.iter().map(|v| v.visitors).sum();
    let conversions: i64 = experiment.variants.iter().map(|v| v.conversions).sum();
    if visitors > 0 { conversions as f64 / visitors as f64 } else { 0.0 }
}

/// Aggregate a list of experiments. An empty list yields all zeros.
pub fn summarize(experiments: &[Experiment]) -> Overview {
    let total_visitors = experiments
        .iter()
        .flat_map(|e| e.variants.iter())
        .map(|v| v.visitors)
        .sum();
    let running_experiments = experiments
        .iter()
        .filter(|e| e.status == ExperimentStatus::Running)
        .count();
    let avg_conversion_rate = if experiments.is_empty() {
        0.0
    } else {
        experiments.iter().map(pooled_rate).sum::<f64>() / experiments.len() as f64 * 100.0
    };

    Overview {
        total_experiments: experiments.len(),
        running_experiments,
        total_visitors,
        avg_conversion_rate,
    }
}
