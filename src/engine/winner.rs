//! Winner selection and caller-side ranking.

use std::cmp::Ordering;

use crate::model::StatisticalResult;

/// Chance to beat control (0–100) a variant must exceed to be flagged a winner.
pub const WINNER_SIGNIFICANCE_THRESHOLD: f64 = 95.0;

/// The winner rule: not the control, significance strictly above `threshold`,
/// and a strictly positive improvement.
pub fn is_winner(is_control: bool, significance_pct: f64, improvement_pct: f64, threshold: f64) -> bool {
    !is_control && significance_pct > threshold && improvement_pct > 0.0
}

/// Results ordered best-first: significance descending, then improvement
/// descending. Equal entries keep their input order.
pub fn rank(results: &[StatisticalResult]) -> Vec<&StatisticalResult> {
    let mut ranked: Vec<&StatisticalResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        b.significance_pct()
            .total_cmp(&a.significance_pct())
            .then_with(|| b.improvement_pct().total_cmp(&a.improvement_pct()))
    });
    ranked
}

/// Every flagged winner, in input order. Several variants may win at once.
pub fn winners(results: &[StatisticalResult]) -> impl Iterator<Item = &StatisticalResult> {
    results.iter().filter(|r| r.is_winner())
}

/// The top-ranked winner, if any variant won.
pub fn best_winner(results: &[StatisticalResult]) -> Option<&StatisticalResult> {
    winners(results).min_by(|a, b| {
        match b.significance_pct().total_cmp(&a.significance_pct()) {
            Ordering::Equal => b.improvement_pct().total_cmp(&a.improvement_pct()),
            other => other,
        }
    })
}
