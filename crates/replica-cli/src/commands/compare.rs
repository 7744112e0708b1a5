//! Compare command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_core::traits::SummaryStore;
use replica_ext_file::{write_comparison, ResultsDir};
use replica_portfolio::prelude::compare;

use crate::cli::OutputFormat;
use crate::config::PipelineConfig;
use crate::error::CliError;
use crate::output::{print_comparison, print_success};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First method (A)
    #[arg(default_value = "PCA")]
    pub method_a: String,

    /// Second method (B)
    #[arg(default_value = "AMPL")]
    pub method_b: String,

    /// Results directory (default: `results_dir`)
    #[arg(short, long)]
    pub results_dir: Option<PathBuf>,

    /// Print only, do not write the comparison file
    #[arg(long)]
    pub no_save: bool,
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let results = ResultsDir::new(args.results_dir.unwrap_or_else(|| config.results_dir.clone()));
    let store = results.store();

    let a = store
        .load(&args.method_a)?
        .ok_or_else(|| CliError::MissingSummary(args.method_a.clone()))?;
    let b = store
        .load(&args.method_b)?
        .ok_or_else(|| CliError::MissingSummary(args.method_b.clone()))?;

    let table = compare(&a, &b)?;
    print_comparison(&table, format)?;

    if !args.no_save {
        let path = results.comparison_path();
        write_comparison(&path, &table)?;
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
