//! Metrics calculator: conversion rate, relative improvement, control lookup.

use crate::error::StatsError;
use crate::model::Variant;

/// Conversion rate of a variant as a percentage.
///
/// Returns `0.0` when the variant has no visitors. Rates above 100% are
/// returned as-is when conversions exceed visitors.
pub fn conversion_rate(variant: &Variant) -> f64 {
    if variant.visitors == 0 {
        return 0.0;
    }
    variant.conversions as f64 / variant.visitors as f64 * 100.0
}

/// Relative change of `rate` over `control_rate`, as a percentage.
///
/// Relative improvement over a zero baseline is undefined and reported as
/// `0.0`, even when the absolute lift is positive.
pub fn improvement_pct(rate: f64, control_rate: f64) -> f64 {
    if control_rate == 0.0 {
        return 0.0;
    }
    (rate - control_rate) / control_rate * 100.0
}

/// The single variant flagged as control.
pub fn find_control(variants: &[Variant]) -> Result<&Variant, StatsError> {
    let mut controls = variants.iter().filter(|v| v.is_control);
    match (controls.next(), controls.next()) {
        (Some(control), None) => Ok(control),
        (None, _) => Err(StatsError::InvalidControlConfiguration { found: 0 }),
        (Some(_), Some(_)) => Err(StatsError::InvalidControlConfiguration {
            found: variants.iter().filter(|v| v.is_control).count(),
        }),
    }
}
