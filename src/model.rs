//! Experiment data model.
//!
//! Field names serialize in the dashboard's camelCase JSON shape so that the
//! REST payloads of the admin UI can be fed to the engine unchanged.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ExperimentType / ExperimentStatus
// ---------------------------------------------------------------------------

/// Kind of experiment. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperimentType {
    #[serde(rename = "A/B Test")]
    Ab,
    #[serde(rename = "Split URL")]
    Split,
    #[serde(rename = "Multivariate")]
    Mvt,
}

impl std::fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperimentType::Ab    => write!(f, "A/B Test"),
            ExperimentType::Split => write!(f, "Split URL"),
            ExperimentType::Mvt   => write!(f, "Multivariate"),
        }
    }
}

/// Lifecycle state of an experiment as tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExperimentStatus {
    #[default]
    Draft,
    Running,
    Paused,
    Completed,
}

impl std::fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperimentStatus::Draft     => write!(f, "Draft"),
            ExperimentStatus::Running   => write!(f, "Running"),
            ExperimentStatus::Paused    => write!(f, "Paused"),
            ExperimentStatus::Completed => write!(f, "Completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Targeting rules — stored, never evaluated
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingCategory {
    Device,
    Browser,
    #[serde(rename = "URL")]
    Url,
    WooCommerce,
    #[serde(rename = "UTM")]
    Utm,
    Geo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingOperator {
    Equals,
    Contains,
    NotEquals,
    GreaterThan,
    LessThan,
    StartsWith,
}

/// An audience-targeting rule attached to an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingRule {
    pub id: String,
    pub category: TargetingCategory,
    pub attribute: String,
    pub operator: TargetingOperator,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Variant / Experiment
// ---------------------------------------------------------------------------

/// One arm of an experiment.
///
/// Counts are signed so that a negative value coming from a buggy caller is
/// representable and can be rejected by the engine instead of wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub name: String,
    pub visitors: i64,
    pub conversions: i64,
    /// Traffic allocation percentage (0–100). Not used by the engine.
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub is_control: bool,
}

impl Variant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visitors: i64, conversions: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visitors,
            conversions,
            weight: 0.0,
            is_control: false,
        }
    }

    /// Builder-style helper marking this variant as the control.
    pub fn control(mut self) -> Self {
        self.is_control = true;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// `"Control"` or `"Variation"`, as shown in reports.
    pub fn role(&self) -> &'static str {
        if self.is_control { "Control" } else { "Variation" }
    }
}

/// A named test over an ordered collection of variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExperimentType,
    #[serde(default)]
    pub status: ExperimentStatus,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub targeting: Vec<TargetingRule>,
}

impl Experiment {
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

// ---------------------------------------------------------------------------
// StatisticalResult — engine output
// ---------------------------------------------------------------------------

/// Derived statistics for one variant.
///
/// Only the engine constructs these; `is_winner` is always the outcome of the
/// winner rule and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalResult {
    variant_id: String,
    conversion_rate: f64,
    improvement_pct: f64,
    significance_pct: f64,
    is_winner: bool,
}

impl StatisticalResult {
    pub(crate) fn new(
        variant_id: String,
        conversion_rate: f64,
        improvement_pct: f64,
        significance_pct: f64,
        is_winner: bool,
    ) -> Self {
        Self { variant_id, conversion_rate, improvement_pct, significance_pct, is_winner }
    }

    pub fn variant_id(&self) -> &str { &self.variant_id }

    /// Conversion rate as a percentage.
    pub fn conversion_rate(&self) -> f64 { self.conversion_rate }

    /// Relative change vs. the control's rate, as a percentage.
    pub fn improvement_pct(&self) -> f64 { self.improvement_pct }

    /// Chance to beat control, 0–100.
    pub fn significance_pct(&self) -> f64 { self.significance_pct }

    pub fn is_winner(&self) -> bool { self.is_winner }
}
