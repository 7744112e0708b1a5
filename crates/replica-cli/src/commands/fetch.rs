//! Fetch command implementation.
//!
//! Collects closing prices for a universe from a price source. Symbols the
//! source cannot serve are reported and skipped.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_core::prelude::*;
use replica_ext_file::{write_prices, CsvPriceSource};
use replica_portfolio::prelude::{default_universe, fetch_universe};

use crate::cli::OutputFormat;
use crate::commands::{input_path, parse_date};
use crate::config::PipelineConfig;
use crate::output::{print_header, print_output, print_success, print_warning, KeyValue};

/// Arguments for the fetch command.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Price dump to read from (`{date, symbol, close}` CSV)
    #[arg(long)]
    pub source: PathBuf,

    /// Symbols to fetch, comma separated (default: the S&P 100 universe)
    #[arg(short, long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// First date, YYYY-MM-DD
    #[arg(long, default_value = "2020-01-01")]
    pub start: String,

    /// Last date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub end: Option<String>,

    /// Prices CSV to write (default: `prices_file`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the fetch command.
pub fn execute(args: FetchArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = args.end.as_deref().map(parse_date).transpose()?.unwrap_or_else(Date::today);
    let output = args.output.unwrap_or_else(|| config.prices_file.clone());

    let source_path = input_path(Some(args.source), &config.prices_file, "Check --source.")?;
    let source = CsvPriceSource::open(&source_path)?;
    let universe = if args.symbols.is_empty() {
        default_universe()
    } else {
        args.symbols.iter().map(Symbol::new).collect()
    };

    let report = fetch_universe(&source, &universe, start, end)?;
    for (symbol, reason) in &report.failed {
        print_warning(&format!("{symbol}: {reason}"));
    }
    if !report.empty.is_empty() {
        let names: Vec<&str> = report.empty.iter().map(Symbol::as_str).collect();
        print_warning(&format!("No data in range for {}", names.join(", ")));
    }
    if report.is_empty() {
        anyhow::bail!("no prices retrieved for {} symbols", universe.len());
    }

    write_prices(&output, &report.prices)?;

    let results = vec![
        KeyValue::new("Requested", universe.len()),
        KeyValue::new("Fetched", report.fetched.len()),
        KeyValue::new("Empty", report.empty.len()),
        KeyValue::new("Failed", report.failed.len()),
        KeyValue::new("Rows", report.prices.len()),
        KeyValue::new("Output", output.display()),
    ];
    print_header("Fetch", format);
    print_output(&results, format)?;
    print_success(&format!("Wrote {}", output.display()));
    Ok(())
}
