//! Benchmark command implementation.
//!
//! Builds the equal-weight benchmark (cross-sectional mean return per date).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_core::Symbol;
use replica_ext_file::{read_returns, write_benchmark};
use replica_portfolio::prelude::equal_weight_benchmark;

use crate::cli::OutputFormat;
use crate::commands::input_path;
use crate::config::PipelineConfig;
use crate::output::{format_metric, print_header, print_output, print_success, KeyValue};

/// Arguments for the benchmark command.
#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// Returns CSV (default: `returns_file`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Benchmark CSV to write (default: `benchmark_file`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Restrict the benchmark to these symbols (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub symbols: Vec<String>,
}

/// Execute the benchmark command.
pub fn execute(args: BenchmarkArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let input = input_path(args.input, &config.returns_file, "Run `replica returns` first.")?;
    let output = args.output.unwrap_or_else(|| config.benchmark_file.clone());

    let mut table = read_returns(&input)?;
    if !args.symbols.is_empty() {
        let symbols: Vec<Symbol> = args.symbols.iter().map(Symbol::new).collect();
        table = table.filter_symbols(&symbols);
    }
    let benchmark = equal_weight_benchmark(&table.to_panel())?;
    write_benchmark(&output, &benchmark)?;

    let mean = benchmark.values().iter().sum::<f64>() / benchmark.len() as f64;
    let results = vec![
        KeyValue::new("Constituents", table.symbols().len()),
        KeyValue::new("Periods", benchmark.len()),
        KeyValue::new("Mean Return", format_metric(mean)),
        KeyValue::new("Output", output.display()),
    ];
    print_header("Benchmark", format);
    print_output(&results, format)?;
    print_success(&format!("Wrote {}", output.display()));
    Ok(())
}
