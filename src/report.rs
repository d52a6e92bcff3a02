//! Text rendering of engine results.
//!
//! [`render_report`] builds the colored terminal report shown by the CLI.
//! [`summary_line`] is the plain one-line-per-variant format handed to
//! narrative collaborators; its wording is part of that contract.

use colored::*;

use crate::engine::{winner, Analysis};
use crate::model::{Experiment, StatisticalResult, Variant};
use crate::overview::Overview;

/// `"3.60%"`
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// `"+74.7%"` / `"-12.0%"`. Positive values carry an explicit sign; anything
/// that rounds to zero prints as `"0.0%"`.
pub fn format_improvement(improvement: f64) -> String {
    let magnitude = format!("{:.1}", improvement.abs());
    if magnitude == "0.0" {
        "0.0%".to_string()
    } else if improvement > 0.0 {
        format!("+{}%", magnitude)
    } else {
        format!("-{}%", magnitude)
    }
}

/// `"99.9%"`
pub fn format_chance(significance: f64) -> String {
    format!("{:.1}%", significance)
}

/// One plain-text line describing a variant and its computed statistics.
pub fn summary_line(variant: &Variant, result: &StatisticalResult) -> String {
    format!(
        "- Variant \"{}\" ({}): {} visitors, {} conversions. CR: {}. Chance to Beat Control: {}.",
        variant.name,
        variant.role(),
        variant.visitors,
        variant.conversions,
        format_rate(result.conversion_rate()),
        format_chance(result.significance_pct()),
    )
}

/// Summary lines for every variant, in experiment order.
pub fn summary_lines(experiment: &Experiment, results: &[StatisticalResult]) -> Vec<String> {
    experiment
        .variants
        .iter()
        .zip(results)
        .map(|(v, r)| summary_line(v, r))
        .collect()
}

/// Full terminal report for one experiment.
pub fn render_report(experiment: &Experiment, analysis: &Analysis) -> String {
    let ruler = "=".repeat(72).bright_blue().to_string();
    let mut lines = vec![
        format!("{} Analysis", experiment.name).bright_cyan().bold().to_string(),
        format!(
            "{}: {}   {}: {}   {}: {}",
            "Type".bright_yellow(),
            experiment.kind,
            "Status".bright_yellow(),
            experiment.status,
            "URL".bright_yellow(),
            experiment.url
        ),
        ruler.clone(),
        format!(
            "{:<28} {:>9} {:>11} {:>9} {:>12} {:>14}",
            "Variant", "Visitors", "Conversions", "Rate", "Improvement", "Chance to Beat"
        ),
    ];

    lines.extend(
        experiment
            .variants
            .iter()
            .zip(&analysis.results)
            .map(|(variant, result)| render_row(variant, result)),
    );

    lines.push(ruler);
    lines.push(
        match winner::best_winner(&analysis.results).and_then(|r| experiment.variant(r.variant_id())) {
            Some(v) => format!("{} {}", "Winner:".bright_green().bold(), v.name.bright_green()),
            None => "No winner yet".dimmed().to_string(),
        },
    );
    lines.extend(analysis.warnings.iter().map(|w| format!("{} {}", "warning:".bright_red(), w)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Portfolio header printed above multi-experiment reports.
pub fn render_overview(overview: &Overview) -> String {
    format!(
        "{}\n{}: {}   {}: {}/{}   {}: {}\n",
        "Experiments Overview".bright_cyan().bold(),
        "Total Visitors Tracked".bright_yellow(),
        overview.total_visitors,
        "Running".bright_yellow(),
        overview.running_experiments,
        overview.total_experiments,
        "Avg. Conversion Rate".bright_yellow(),
        format_rate(overview.avg_conversion_rate),
    )
}

fn render_row(variant: &Variant, result: &StatisticalResult) -> String {
    let name = truncate(&variant.name, 26);
    let name = if result.is_winner() { format!("{} *", name) } else { name };
    let rate = format_rate(result.conversion_rate());

    if variant.is_control {
        return format!(
            "{:<28} {:>9} {:>11} {:>9} {:>12} {:>14}",
            name,
            variant.visitors,
            variant.conversions,
            rate,
            "control".dimmed(),
            "-"
        );
    }

    let improvement = format_improvement(result.improvement_pct());
    let improvement = if result.improvement_pct() > 0.0 { improvement.green() } else { improvement.red() };
    let chance = format_chance(result.significance_pct());
    let chance = if result.is_winner() { chance.bright_green().bold() } else { chance.normal() };
    format!(
        "{:<28} {:>9} {:>11} {:>9} {:>12} {:>14}",
        name, variant.visitors, variant.conversions, rate, improvement, chance
    )
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::analyze;
    use crate::samples::sample_experiments;

    #[test]
    fn test_format_rate_two_decimals() {
        assert_eq!(format_rate(3.6), "3.60%");
        assert_eq!(format_rate(0.0), "0.00%");
    }

    #[test]
    fn test_format_improvement_sign() {
        assert_eq!(format_improvement(74.731), "+74.7%");
        assert_eq!(format_improvement(-8.26), "-8.3%");
        assert_eq!(format_improvement(0.0), "0.0%");
    }

    #[test]
    fn test_format_improvement_rounds_half_to_even() {
        // -8.25 is exactly representable; {:.1} rounds the tie to even.
        assert_eq!(format_improvement(-8.25), "-8.2%");
    }

    #[test]
    fn test_format_improvement_no_negative_zero() {
        assert_eq!(format_improvement(-0.04), "0.0%");
        assert_eq!(format_improvement(-0.0), "0.0%");
        assert_eq!(format_improvement(0.04), "0.0%");
    }

    #[test]
    fn test_summary_line_contract() {
        let exp = &sample_experiments()[0];
        let a = analyze(exp, &EngineConfig::default()).unwrap();
        let lines = summary_lines(exp, &a.results);
        assert_eq!(
            lines[0],
            "- Variant \"Control (Blue)\" (Control): 1250 visitors, 45 conversions. CR: 3.60%. Chance to Beat Control: 0.0%."
        );
        assert_eq!(
            lines[1],
            "- Variant \"Variant B (Green)\" (Variation): 1240 visitors, 78 conversions. CR: 6.29%. Chance to Beat Control: 99.9%."
        );
    }

    #[test]
    fn test_render_report_names_winner() {
        let exp = &sample_experiments()[0];
        let a = analyze(exp, &EngineConfig::default()).unwrap();
        let out = render_report(exp, &a);
        assert!(out.contains("Checkout Page - CTA Color Analysis"));
        assert!(out.contains("+74.7%"));
        assert!(out.contains("Variant B (Green)"));
        assert!(!out.contains("No winner yet"));
    }

    #[test]
    fn test_render_report_without_winner() {
        let exp = &sample_experiments()[2];
        let a = analyze(exp, &EngineConfig::default()).unwrap();
        let out = render_report(exp, &a);
        assert!(out.contains("No winner yet"));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 26), "short");
        let t = truncate("a very long variant name that keeps going", 10);
        assert_eq!(t.chars().count(), 10);
        assert!(t.ends_with('…'));
    }

    #[test]
    fn test_truncate_zero_width_does_not_underflow() {
        assert_eq!(truncate("abc", 0), "…");
    }

    #[test]
    fn test_render_report_ends_with_newline_and_lists_warnings() {
        let mut exp = sample_experiments()[0].clone();
        exp.variants[1].conversions = 2000;
        let a = analyze(&exp, &EngineConfig::default()).unwrap();
        let out = render_report(&exp, &a);
        assert!(out.ends_with('\n'));
        assert!(out.contains("more conversions (2000) than visitors (1240)"));
    }

    #[test]
    fn test_render_overview_totals() {
        let out = render_overview(&crate::overview::summarize(&sample_experiments()));
        assert!(out.contains("Experiments Overview"));
        assert!(out.contains("17420"));
        assert!(out.contains("1/3"));
    }
}
