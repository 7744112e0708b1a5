//! Solver-data command implementation.
//!
//! Writes the AMPL data file consumed by the sparse tracking model.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_core::Symbol;
use replica_ext_file::{read_returns, write_ampl_data};
use replica_portfolio::prelude::build_problem;

use crate::cli::OutputFormat;
use crate::commands::input_path;
use crate::config::PipelineConfig;
use crate::output::{print_header, print_output, print_success, KeyValue};

/// Arguments for the solver-data command.
#[derive(Args, Debug)]
pub struct SolverDataArgs {
    /// Returns CSV (default: `returns_file`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Candidate symbols, comma separated (default: every symbol in the file)
    #[arg(short, long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Number of instruments the optimizer must select (default: `q`)
    #[arg(long)]
    pub q: Option<usize>,

    /// AMPL data file to write (default: `solver_data_file`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Candidate symbols: the explicit list, or every symbol of the table.
pub(crate) fn candidates(symbols: &[String], table: &replica_core::types::ReturnTable) -> Vec<Symbol> {
    if symbols.is_empty() {
        table.symbols()
    } else {
        symbols.iter().map(Symbol::new).collect()
    }
}

/// Execute the solver-data command.
pub fn execute(args: SolverDataArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let input = input_path(args.input, &config.returns_file, "Run `replica returns` first.")?;
    let output = args.output.unwrap_or_else(|| config.solver_data_file.clone());
    let q = args.q.unwrap_or(config.q);

    let table = read_returns(&input)?;
    let problem = build_problem(&table, &candidates(&args.symbols, &table), q)?;
    write_ampl_data(&output, &problem)?;

    let results = vec![
        KeyValue::new("N (symbols)", problem.n_symbols()),
        KeyValue::new("T (periods)", problem.n_periods()),
        KeyValue::new("q", problem.q()),
        KeyValue::new("Output", output.display()),
    ];
    print_header("Solver Data", format);
    print_output(&results, format)?;
    print_success(&format!("Wrote {}", output.display()));
    Ok(())
}
