//! Error types for the statistics engine, its configuration and the CLI.
//!
//! Engine errors are fatal to a computation and are always raised before any
//! result is produced. Data-quality problems that do not block a computation
//! are reported as [`DataWarning`]s alongside the results instead.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// StatsError
// ---------------------------------------------------------------------------

/// Which count field of a variant was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountField {
    Visitors,
    Conversions,
}

impl std::fmt::Display for CountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountField::Visitors    => write!(f, "visitors"),
            CountField::Conversions => write!(f, "conversions"),
        }
    }
}

/// Fatal input problems detected by the statistics engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The experiment has no variants.
    #[error("experiment has no variants")]
    EmptyExperiment,

    /// A variant carries a negative visitor or conversion count.
    #[error("variant '{variant_id}' has negative {field}: {value}")]
    NegativeCount {
        /// Id of the offending variant.
        variant_id: String,
        /// Which count was negative.
        field: CountField,
        /// The rejected value.
        value: i64,
    },

    /// Zero or more than one variant is flagged as control.
    #[error("expected exactly one control variant, found {found}")]
    InvalidControlConfiguration {
        /// Number of variants flagged `isControl`.
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// DataWarning
// ---------------------------------------------------------------------------

/// Non-fatal data-quality findings. The computation proceeds regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataWarning {
    /// More conversions than visitors were recorded; the conversion rate
    /// will exceed 100%.
    #[serde(rename_all = "camelCase")]
    ConversionsExceedVisitors {
        variant_id: String,
        visitors: i64,
        conversions: i64,
    },
}

impl std::fmt::Display for DataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataWarning::ConversionsExceedVisitors { variant_id, visitors, conversions } => write!(
                f,
                "variant '{}' has more conversions ({}) than visitors ({})",
                variant_id, conversions, visitors
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// DraftError
// ---------------------------------------------------------------------------

/// Errors raised when turning a draft into an [`Experiment`](crate::model::Experiment).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("experiment name must not be empty")]
    EmptyName,

    #[error("experiment url must not be empty")]
    EmptyUrl,

    #[error("experiment needs at least one variant")]
    NoVariants,
}

// ---------------------------------------------------------------------------
// Error — crate-level umbrella used by the CLI
// ---------------------------------------------------------------------------

/// Umbrella error for the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid experiment JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no experiment with id '{0}'")]
    ExperimentNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_count_message_names_variant_and_field() {
        let e = StatsError::NegativeCount {
            variant_id: "v1".into(),
            field: CountField::Conversions,
            value: -3,
        };
        assert_eq!(e.to_string(), "variant 'v1' has negative conversions: -3");
    }

    #[test]
    fn test_invalid_control_message_reports_count() {
        let e = StatsError::InvalidControlConfiguration { found: 2 };
        assert_eq!(e.to_string(), "expected exactly one control variant, found 2");
    }

    #[test]
    fn test_warning_display() {
        let w = DataWarning::ConversionsExceedVisitors {
            variant_id: "b".into(),
            visitors: 10,
            conversions: 12,
        };
        assert_eq!(w.to_string(), "variant 'b' has more conversions (12) than visitors (10)");
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let w = DataWarning::ConversionsExceedVisitors {
            variant_id: "b".into(),
            visitors: 10,
            conversions: 12,
        };
        let json = serde_json::to_string(&w).expect("serialize");
        assert!(json.contains("\"kind\":\"conversionsExceedVisitors\""));
        assert!(json.contains("\"variantId\":\"b\""));
    }

    #[test]
    fn test_umbrella_wraps_stats_error_transparently() {
        let e: Error = StatsError::EmptyExperiment.into();
        assert_eq!(e.to_string(), "experiment has no variants");
    }
}
