//! PCA command implementation.
//!
//! Ranks instruments by their loadings on the leading principal components,
//! evaluates the resulting portfolio against the benchmark and stores the
//! results.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_ext_file::{read_benchmark, read_prices, ResultsDir};
use replica_portfolio::prelude::run_pca_method;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{compare_with_stored, input_path};
use crate::config::PipelineConfig;
use crate::output::{
    format_metric, print_header, print_output, print_success, summary_rows, KeyValue,
};

/// Arguments for the pca command.
#[derive(Args, Debug)]
pub struct PcaArgs {
    /// Prices CSV (default: `prices_file`)
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// Benchmark CSV (default: `benchmark_file`)
    #[arg(short, long)]
    pub benchmark: Option<PathBuf>,

    /// Principal components to keep (default: `n_components`)
    #[arg(long)]
    pub n_components: Option<usize>,

    /// Instruments to select (default: `n_stocks`)
    #[arg(long)]
    pub n_stocks: Option<usize>,

    /// Results directory (default: `results_dir`)
    #[arg(short, long)]
    pub results_dir: Option<PathBuf>,

    /// Method whose stored summary the result is compared with
    #[arg(long, default_value = "AMPL")]
    pub against: String,
}

/// Selected instrument and weight.
#[derive(Debug, Serialize, Tabled)]
struct WeightRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// Execute the pca command.
pub fn execute(args: PcaArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let prices_path = input_path(args.prices, &config.prices_file, "Run `replica fetch` first.")?;
    let benchmark_path = input_path(
        args.benchmark,
        &config.benchmark_file,
        "Run `replica benchmark` first.",
    )?;
    let results = ResultsDir::new(args.results_dir.unwrap_or_else(|| config.results_dir.clone()));
    let settings = config.pca(args.n_components, args.n_stocks);

    let prices = read_prices(&prices_path)?;
    let benchmark = read_benchmark(&benchmark_path)?;
    let run = run_pca_method(&prices, &benchmark, &settings, &config.evaluation())?;
    results.save_run(&run.summary, &run.rolling, &run.portfolio, &run.weights)?;

    let explained: f64 = run.explained_variance_ratio.iter().sum();
    print_header("PCA Portfolio", format);
    print_output(
        &[
            KeyValue::new("Components", settings.n_components),
            KeyValue::new("Explained Variance", format_metric(explained)),
            KeyValue::new("Instruments", run.weights.len()),
        ],
        format,
    )?;

    let weights: Vec<WeightRow> = run
        .weights
        .iter()
        .map(|(symbol, weight)| WeightRow {
            symbol: symbol.to_string(),
            weight: format_metric(weight),
        })
        .collect();
    print_header("Weights", format);
    print_output(&weights, format)?;

    print_header("Performance", format);
    print_output(&summary_rows(&run.summary), format)?;

    compare_with_stored(&results, &run.summary, &args.against, format)?;
    print_success(&format!("Results saved to {}", results.root().display()));
    Ok(())
}
