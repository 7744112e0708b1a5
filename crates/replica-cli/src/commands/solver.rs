//! Solver command implementation.
//!
//! Reads the weights produced by the external optimizer, validates them and
//! evaluates the portfolio against the benchmark.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_ext_file::{read_benchmark, read_returns, ResultsDir, SolverOutputFile};
use replica_portfolio::prelude::{build_problem, run_solver_method, PCA_METHOD};

use crate::cli::OutputFormat;
use crate::commands::solver_data::candidates;
use crate::commands::{compare_with_stored, input_path};
use crate::config::PipelineConfig;
use crate::output::{print_header, print_output, print_success, summary_rows, KeyValue};

/// Arguments for the solver command.
#[derive(Args, Debug)]
pub struct SolverArgs {
    /// Solver output `{symbol or 1-based index, weight}` (default: `weights_file`)
    #[arg(short, long)]
    pub weights: Option<PathBuf>,

    /// Returns CSV (default: `returns_file`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Benchmark CSV (default: `benchmark_file`)
    #[arg(short, long)]
    pub benchmark: Option<PathBuf>,

    /// Candidate symbols the problem was built from (default: every symbol)
    #[arg(short, long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Number of instruments the optimizer had to select (default: `q`)
    #[arg(long)]
    pub q: Option<usize>,

    /// Allowed deviation of the weight sum from one (default: `weight_tolerance`)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Method label for the stored results
    #[arg(short, long, default_value = "AMPL")]
    pub method: String,

    /// Results directory (default: `results_dir`)
    #[arg(short, long)]
    pub results_dir: Option<PathBuf>,

    /// Method whose stored summary the result is compared with
    #[arg(long, default_value = PCA_METHOD)]
    pub against: String,
}

/// Execute the solver command.
pub fn execute(args: SolverArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let weights_path = input_path(
        args.weights,
        &config.weights_file,
        "Run the optimizer on the `replica solver-data` output first.",
    )?;
    let returns_path = input_path(args.input, &config.returns_file, "Run `replica returns` first.")?;
    let benchmark_path = input_path(
        args.benchmark,
        &config.benchmark_file,
        "Run `replica benchmark` first.",
    )?;
    let results = ResultsDir::new(args.results_dir.unwrap_or_else(|| config.results_dir.clone()));
    let q = args.q.unwrap_or(config.q);
    let tolerance = args.tolerance.unwrap_or(config.weight_tolerance);

    let table = read_returns(&returns_path)?;
    let benchmark = read_benchmark(&benchmark_path)?;
    let problem = build_problem(&table, &candidates(&args.symbols, &table), q)?;
    let solver = SolverOutputFile::with_method(&weights_path, &args.method);

    let run = run_solver_method(
        &table,
        &solver,
        &problem,
        &benchmark,
        tolerance,
        &config.evaluation(),
    )?;
    results.save_run(&run.summary, &run.rolling, &run.portfolio, &run.weights)?;

    print_header(&format!("{} Portfolio", run.method), format);
    let weights: Vec<KeyValue> = run
        .weights
        .iter()
        .map(|(symbol, weight)| KeyValue::new(symbol.as_str(), format!("{weight:.4}")))
        .collect();
    print_output(&weights, format)?;

    print_header("Performance", format);
    print_output(&summary_rows(&run.summary), format)?;

    compare_with_stored(&results, &run.summary, &args.against, format)?;
    print_success(&format!("Results saved to {}", results.root().display()));
    Ok(())
}
