use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::model::Experiment;

#[derive(Parser)]
#[command(name = "cro-stats")]
#[command(version)]
#[command(about = "Conversion statistics for website A/B and multivariate experiments")]
pub struct Args {
    /// TOML file with engine settings (winner_threshold, min_sample_size)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute statistics for experiments stored in a JSON file
    Report {
        /// JSON file holding one experiment or an array of experiments
        file: PathBuf,

        #[command(flatten)]
        opts: ReportOpts,
    },

    /// Compute statistics for the built-in sample experiments
    Demo {
        #[command(flatten)]
        opts: ReportOpts,
    },

    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ReportOpts {
    /// Only report the experiment with this id
    #[arg(long)]
    pub experiment: Option<String>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Override the winner significance threshold (0-100)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Override the minimum visitors per arm
    #[arg(long)]
    pub min_samples: Option<u64>,
}

/// Build the effective engine config: file (if any), then CLI overrides.
pub fn resolve_config(path: Option<&Path>, opts: &ReportOpts) -> Result<EngineConfig> {
    let mut cfg = match path {
        Some(p) => EngineConfig::from_file(p)?,
        None => EngineConfig::default(),
    };
    if let Some(t) = opts.threshold {
        cfg.winner_threshold = t;
    }
    if let Some(n) = opts.min_samples {
        cfg.min_sample_size = n;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Parse a JSON document holding either one experiment or an array of them.
pub fn parse_experiments(json: &str) -> Result<Vec<Experiment>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Experiment>),
        One(Box<Experiment>),
    }

    // Untagged errors are opaque; retry as a single experiment for a useful message.
    match serde_json::from_str::<OneOrMany>(json) {
        Ok(OneOrMany::Many(v)) => Ok(v),
        Ok(OneOrMany::One(e)) => Ok(vec![*e]),
        Err(_) if json.trim_start().starts_with('[') => {
            Ok(serde_json::from_str::<Vec<Experiment>>(json)?)
        }
        Err(_) => Ok(vec![serde_json::from_str::<Experiment>(json)?]),
    }
}

pub fn load_experiments(path: &Path) -> Result<Vec<Experiment>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_experiments(&text)
}

/// Keep only the experiment with `id`, or all when no id is given.
pub fn select_experiments(experiments: Vec<Experiment>, id: Option<&str>) -> Result<Vec<Experiment>> {
    match id {
        None => Ok(experiments),
        Some(id) => experiments
            .into_iter()
            .find(|e| e.id == id)
            .map(|e| vec![e])
            .ok_or_else(|| Error::ExperimentNotFound(id.to_string())),
    }
}
