//! Conversion statistics for website A/B and multivariate experiments.
//!
//! ```
//! use cro_stats::{compute_statistics, samples::sample_experiments};
//!
//! let checkout = &sample_experiments()[0];
//! let results = compute_statistics(checkout).unwrap();
//! assert!(results[1].is_winner());
//! ```

pub mod cli;
pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod model;
pub mod overview;
pub mod report;
pub mod samples;

pub use config::EngineConfig;
pub use engine::{analyze, compute_statistics, compute_statistics_with, Analysis};
pub use error::{DataWarning, StatsError};
pub use model::{Experiment, StatisticalResult, Variant};
