//! Significance estimator: pooled two-proportion z-test mapped to a one-tailed
//! "chance to beat control" score.

use crate::model::Variant;

/// Both arms need at least this many visitors before a significance score is
/// produced. Below it the score is forced to zero.
pub const MIN_SAMPLE_SIZE: u64 = 10;

/// Pooled two-proportion z statistic for `(conv_a / n_a) - (conv_b / n_b)`.
///
/// Returns `None` when either arm is empty or the pooled standard error is
/// not a positive finite number (pooled proportion of 0 or 1, or counts
/// where conversions exceed visitors push it past 1).
pub fn two_proportion_z(conv_a: i64, n_a: i64, conv_b: i64, n_b: i64) -> Option<f64> {
    if n_a <= 0 || n_b <= 0 {
        return None;
    }
    let (xa, na) = (conv_a as f64, n_a as f64);
    let (xb, nb) = (conv_b as f64, n_b as f64);

    let p_pool = (xa + xb) / (na + nb);
    let se = (p_pool * (1.0 - p_pool) * (1.0 / na + 1.0 / nb)).sqrt();
    if !se.is_finite() || se <= 0.0 {
        return None;
    }
    Some((xa / na - xb / nb) / se)
}

/// Probability (0–100) that `variant`'s true conversion rate exceeds
/// `control`'s.
///
/// Zero when either arm has fewer than `min_sample_size` visitors or when the
/// z statistic is undefined.
pub fn chance_to_beat(variant: &Variant, control: &Variant, min_sample_size: u64) -> f64 {
    if below_minimum(variant.visitors, min_sample_size)
        || below_minimum(control.visitors, min_sample_size)
    {
        return 0.0;
    }
    match two_proportion_z(variant.conversions, variant.visitors, control.conversions, control.visitors) {
        Some(z) => (normal_cdf(z) * 100.0).clamp(0.0, 100.0),
        None => 0.0,
    }
}

fn below_minimum(visitors: i64, min_sample_size: u64) -> bool {
    u64::try_from(visitors).map_or(true, |n| n < min_sample_size)
}

/// Standard normal cumulative distribution function Φ(x).
///
/// Abramowitz & Stegun 26.2.17; absolute error below 7.5e-8.
pub fn normal_cdf(x: f64) -> f64 {
    if x.is_nan() { return f64::NAN; }
    if x < 0.0 { return 1.0 - normal_cdf(-x); }
    if x > 8.0 { return 1.0; }
    let t = 1.0 / (1.0 + 0.2316419 * x);
    let poly = t * (0.319381530
        + t * (-0.356563782
        + t * (1.781477937
        + t * (-1.821255978
        + t * 1.330274429))));
    let pdf = (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt();
    1.0 - pdf * poly
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm(visitors: i64, conversions: i64) -> Variant {
        Variant::new("x", "X", visitors, conversions)
    }

    // ===== normal_cdf =====

    #[test]
    fn test_normal_cdf_at_zero_is_half() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn test_normal_cdf_known_quantiles() {
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4, "got {}", normal_cdf(1.96));
        assert!((normal_cdf(1.645) - 0.95).abs() < 1e-4, "got {}", normal_cdf(1.645));
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-4, "got {}", normal_cdf(-1.96));
    }

    #[test]
    fn test_normal_cdf_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.5, 4.0] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_normal_cdf_tails() {
        assert_eq!(normal_cdf(9.0), 1.0);
        assert_eq!(normal_cdf(-9.0), 0.0);
    }

    #[test]
    fn test_normal_cdf_nondecreasing() {
        let mut prev = 0.0;
        for i in -800..=800 {
            let p = normal_cdf(i as f64 / 100.0);
            assert!(p >= prev, "cdf decreased at {}", i);
            prev = p;
        }
    }

    // ===== two_proportion_z =====

    #[test]
    fn test_z_none_when_arm_empty() {
        assert!(two_proportion_z(0, 0, 5, 100).is_none());
        assert!(two_proportion_z(5, 100, 0, 0).is_none());
    }

    #[test]
    fn test_z_none_when_no_variance() {
        // Nobody converted anywhere.
        assert!(two_proportion_z(0, 100, 0, 100).is_none());
        // Everybody converted everywhere.
        assert!(two_proportion_z(100, 100, 100, 100).is_none());
    }

    #[test]
    fn test_z_none_when_pooled_proportion_exceeds_one() {
        assert!(two_proportion_z(15, 10, 10, 10).is_none());
    }

    #[test]
    fn test_z_zero_for_equal_rates() {
        let z = two_proportion_z(50, 1000, 50, 1000).unwrap();
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_z_sign_follows_difference() {
        assert!(two_proportion_z(78, 1240, 45, 1250).unwrap() > 0.0);
        assert!(two_proportion_z(45, 1250, 78, 1240).unwrap() < 0.0);
    }

    #[test]
    fn test_z_matches_hand_computation() {
        // p1 = 0.1, p2 = 0.05, pooled = 0.075, se = sqrt(0.075*0.925*0.02)
        let z = two_proportion_z(20, 200, 10, 200).unwrap();
        let expected = 0.05 / (0.075_f64 * 0.925 * 0.01).sqrt();
        assert!((z - expected).abs() < 1e-9, "z={} expected={}", z, expected);
    }

    // ===== chance_to_beat =====

    #[test]
    fn test_chance_zero_below_min_sample() {
        assert_eq!(chance_to_beat(&arm(5, 2), &arm(5, 1), MIN_SAMPLE_SIZE), 0.0);
        assert_eq!(chance_to_beat(&arm(9, 9), &arm(1000, 1), MIN_SAMPLE_SIZE), 0.0);
        assert_eq!(chance_to_beat(&arm(1000, 500), &arm(9, 0), MIN_SAMPLE_SIZE), 0.0);
    }

    #[test]
    fn test_chance_computed_at_exactly_min_sample() {
        let s = chance_to_beat(&arm(10, 5), &arm(10, 1), MIN_SAMPLE_SIZE);
        assert!(s > 50.0, "s={}", s);
    }

    #[test]
    fn test_chance_zero_when_no_conversions() {
        assert_eq!(chance_to_beat(&arm(100, 0), &arm(100, 0), MIN_SAMPLE_SIZE), 0.0);
    }

    #[test]
    fn test_chance_half_for_identical_arms() {
        let s = chance_to_beat(&arm(1000, 50), &arm(1000, 50), MIN_SAMPLE_SIZE);
        assert!((s - 50.0).abs() < 1e-4, "s={}", s);
    }

    #[test]
    fn test_chance_high_for_large_lift() {
        let s = chance_to_beat(&arm(1240, 78), &arm(1250, 45), MIN_SAMPLE_SIZE);
        assert!(s > 99.8 && s <= 100.0, "s={}", s);
    }

    #[test]
    fn test_chance_low_for_worse_variant() {
        let s = chance_to_beat(&arm(100, 5), &arm(100, 10), MIN_SAMPLE_SIZE);
        assert!((s - 8.97).abs() < 0.05, "s={}", s);
    }

    #[test]
    fn test_chance_respects_custom_min_sample() {
        let v = arm(50, 25);
        let c = arm(50, 5);
        assert!(chance_to_beat(&v, &c, 10) > 95.0);
        assert_eq!(chance_to_beat(&v, &c, 100), 0.0);
    }

    #[test]
    fn test_chance_negative_visitors_treated_as_insufficient() {
        assert_eq!(chance_to_beat(&arm(-100, 5), &arm(100, 5), MIN_SAMPLE_SIZE), 0.0);
    }
}
