//! Stats command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use replica_ext_file::read_returns;
use replica_portfolio::prelude::{describe, summarize};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::input_path;
use crate::config::PipelineConfig;
use crate::output::{format_metric, print_header, print_output, KeyValue};

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Returns CSV (default: `returns_file`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Only print the dataset summary
    #[arg(long)]
    pub summary_only: bool,
}

/// Statistics of one symbol.
#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

/// Execute the stats command.
pub fn execute(args: StatsArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let input = input_path(args.input, &config.returns_file, "Run `replica returns` first.")?;
    let panel = read_returns(&input)?.to_panel();
    let dataset = summarize(&panel);

    let date = |d: Option<replica_core::Date>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
    let overview = vec![
        KeyValue::new("Total Symbols", dataset.total_symbols),
        KeyValue::new("First Date", date(dataset.first_date)),
        KeyValue::new("Last Date", date(dataset.last_date)),
        KeyValue::new("Total Days", dataset.total_days),
        KeyValue::new("Missing Values", dataset.missing_values),
    ];
    print_header("Dataset Summary", format);
    print_output(&overview, format)?;

    if args.summary_only {
        return Ok(());
    }

    let rows: Vec<StatsRow> = describe(&panel)
        .into_iter()
        .map(|s| StatsRow {
            symbol: s.symbol.to_string(),
            count: s.count,
            mean: format_metric(s.mean),
            std_dev: format_metric(s.std_dev),
            min: format_metric(s.min),
            max: format_metric(s.max),
        })
        .collect();
    print_header("Per-Symbol Statistics", format);
    print_output(&rows, format)
}
