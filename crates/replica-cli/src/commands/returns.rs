//! Returns command implementation.
//!
//! Converts a price file into per-symbol returns.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_core::types::ReturnKind;
use replica_ext_file::{read_prices, write_returns};
use replica_portfolio::prelude::compute_returns;

use crate::cli::{KindArg, OutputFormat};
use crate::commands::input_path;
use crate::config::PipelineConfig;
use crate::output::{print_header, print_output, print_success, KeyValue};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    /// Prices CSV `{date, symbol, close}` (default: `prices_file`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Returns CSV to write (default: `returns_file`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Return definition (default: `return_kind`)
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let input = input_path(args.input, &config.prices_file, "Run `replica fetch` first.")?;
    let output = args.output.unwrap_or_else(|| config.returns_file.clone());
    let kind = args.kind.map_or(config.return_kind, ReturnKind::from);

    let prices = read_prices(&input)?;
    let returns = compute_returns(&prices, kind)?;
    write_returns(&output, &returns)?;

    let results = vec![
        KeyValue::new("Return Kind", kind),
        KeyValue::new("Symbols", returns.symbols().len()),
        KeyValue::new("Observations", returns.len()),
        KeyValue::new("Output", output.display()),
    ];
    print_header("Returns", format);
    print_output(&results, format)?;
    print_success(&format!("Wrote {}", output.display()));
    Ok(())
}
