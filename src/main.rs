use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cro_stats::cli::{self, Args, Command, ReportOpts};
use cro_stats::config::EngineConfig;
use cro_stats::engine::analyze;
use cro_stats::error::Result;
use cro_stats::model::Experiment;
use cro_stats::overview::summarize;
use cro_stats::report::{render_overview, render_report};
use cro_stats::samples::sample_experiments;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_report(experiments: Vec<Experiment>, opts: &ReportOpts, config: &EngineConfig) -> Result<()> {
    let experiments = cli::select_experiments(experiments, opts.experiment.as_deref())?;
    info!(
        count = experiments.len(),
        winner_threshold = config.winner_threshold,
        min_sample_size = config.min_sample_size,
        "computing statistics"
    );

    let mut reports = Vec::with_capacity(experiments.len());
    for exp in &experiments {
        let analysis = analyze(exp, config)?;
        for w in &analysis.warnings {
            warn!(experiment = %exp.id, "{}", w);
        }
        debug!(experiment = %exp.id, variants = exp.variants.len(), "analysis complete");
        reports.push((exp, analysis));
    }

    if opts.json {
        let json: Vec<serde_json::Value> = reports
            .iter()
            .map(|(exp, analysis)| {
                serde_json::json!({
                    "experimentId": exp.id,
                    "results": analysis.results,
                    "warnings": analysis.warnings,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        if experiments.len() > 1 {
            println!("{}", render_overview(&summarize(&experiments)));
        }
        for (i, (exp, analysis)) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", render_report(exp, analysis));
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match &args.command {
        Command::Report { file, opts } => {
            let config = cli::resolve_config(args.config.as_deref(), opts)?;
            let experiments = cli::load_experiments(file)?;
            info!(path = %file.display(), count = experiments.len(), "loaded experiments");
            run_report(experiments, opts, &config)
        }
        Command::Demo { opts } => {
            let config = cli::resolve_config(args.config.as_deref(), opts)?;
            run_report(sample_experiments(), opts, &config)
        }
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Args::command(), "cro-stats", &mut io::stdout());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
