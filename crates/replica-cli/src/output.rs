//! Output formatting utilities.

use colored::Colorize;
use replica_core::prelude::*;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a metric value; undefined values print as `n/a`.
pub fn format_metric(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        "n/a".to_string()
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section. Only shown for table output.
pub fn print_header(title: &str, format: OutputFormat) {
    if format == OutputFormat::Table {
        println!("\n{}", title.bold().underline());
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// One horizon of a performance summary.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Horizon")]
    pub horizon: String,
    #[tabled(rename = "Correlation")]
    pub correlation: String,
    #[tabled(rename = "Tracking Error")]
    pub tracking_error: String,
    #[tabled(rename = "Information Ratio")]
    pub information_ratio: String,
    #[tabled(rename = "Sharpe Ratio")]
    pub sharpe_ratio: String,
}

/// Rows of a summary in horizon order.
pub fn summary_rows(summary: &PerformanceSummary) -> Vec<SummaryRow> {
    summary
        .horizons()
        .map(|(horizon, m)| SummaryRow {
            horizon: horizon.label().to_string(),
            correlation: format_metric(m.correlation),
            tracking_error: format_metric(m.tracking_error),
            information_ratio: format_metric(m.information_ratio),
            sharpe_ratio: format_metric(m.sharpe_ratio),
        })
        .collect()
}

/// One entry of a method comparison.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ComparisonLine {
    #[tabled(rename = "Horizon")]
    pub horizon: String,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Method A")]
    pub method_a: String,
    #[tabled(rename = "Method B")]
    pub method_b: String,
    #[tabled(rename = "Difference")]
    pub difference: String,
}

/// Rows of a comparison, horizon-major.
pub fn comparison_lines(table: &ComparisonTable) -> Vec<ComparisonLine> {
    table
        .rows()
        .into_iter()
        .map(|row| ComparisonLine {
            horizon: row.horizon.label().to_string(),
            metric: row.metric.name().to_string(),
            method_a: format_metric(row.method_a),
            method_b: format_metric(row.method_b),
            difference: format_metric(row.difference),
        })
        .collect()
}

/// Prints a comparison with its method names in the header.
pub fn print_comparison(table: &ComparisonTable, format: OutputFormat) -> anyhow::Result<()> {
    print_header(
        &format!("{} (A) vs {} (B)", table.method_a, table.method_b),
        format,
    );
    print_output(&comparison_lines(table), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(c: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            correlation: c,
            tracking_error: 0.05,
            information_ratio: 0.0,
            sharpe_ratio: f64::NAN,
        }
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(0.123_456), "0.1235");
        assert_eq!(format_metric(f64::NAN), "n/a");
    }

    #[test]
    fn test_summary_rows_follow_horizon_order() {
        let summary = PerformanceSummary::new("PCA")
            .with(Horizon::OneYear, metrics(0.9))
            .with(Horizon::ThreeMonths, metrics(0.8));
        let rows = summary_rows(&summary);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].horizon, Horizon::ThreeMonths.label());
        assert_eq!(rows[0].sharpe_ratio, "n/a");
    }
}
