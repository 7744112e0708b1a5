//! CLI command implementations.

pub mod benchmark;
pub mod compare;
pub mod config;
pub mod fetch;
pub mod pca;
pub mod returns;
pub mod solver;
pub mod solver_data;
pub mod stats;

pub use benchmark::BenchmarkArgs;
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use fetch::FetchArgs;
pub use pca::PcaArgs;
pub use returns::ReturnsArgs;
pub use solver::SolverArgs;
pub use solver_data::SolverDataArgs;
pub use stats::StatsArgs;

use std::path::{Path, PathBuf};

use replica_core::prelude::*;
use replica_ext_file::ResultsDir;
use replica_portfolio::prelude::compare;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_comparison;

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Resolves an optional override against the configured path and checks
/// that the file exists.
pub fn input_path(flag: Option<PathBuf>, configured: &Path, hint: &str) -> CliResult<PathBuf> {
    let path = flag.unwrap_or_else(|| configured.to_path_buf());
    if !path.exists() {
        return Err(CliError::MissingInput {
            path,
            hint: hint.to_string(),
        });
    }
    Ok(path)
}

/// Compares `summary` with the stored summary of `other`, when one exists,
/// and persists the result. A stored summary that lacks a compared horizon
/// is an error.
pub fn compare_with_stored(
    results: &ResultsDir,
    summary: &PerformanceSummary,
    other: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if other.eq_ignore_ascii_case(summary.method()) {
        return Ok(());
    }
    let Some(stored) = results.store().load(other)? else {
        info!(method = other, "no stored summary to compare against");
        return Ok(());
    };

    let table = compare(summary, &stored)?;
    replica_ext_file::write_comparison(results.comparison_path(), &table)?;
    print_comparison(&table, format)
}
