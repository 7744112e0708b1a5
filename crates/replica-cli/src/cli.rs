//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use replica_core::types::ReturnKind;

use crate::commands::{
    BenchmarkArgs, CompareArgs, ConfigArgs, FetchArgs, PcaArgs, ReturnsArgs, SolverArgs,
    SolverDataArgs, StatsArgs,
};

/// Replica - Sparse index-tracking portfolio analytics
#[derive(Parser)]
#[command(name = "replica")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pipeline configuration file (TOML); defaults apply when it is absent
    #[arg(
        short,
        long,
        global = true,
        env = "REPLICA_CONFIG",
        default_value = "replica.toml"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Collect closing prices for a universe from a price source
    Fetch(FetchArgs),

    /// Compute per-symbol returns from a price file
    Returns(ReturnsArgs),

    /// Describe a return file (per-symbol statistics and dataset shape)
    Stats(StatsArgs),

    /// Build the equal-weight benchmark series from a return file
    Benchmark(BenchmarkArgs),

    /// Write the AMPL data file for the sparse tracking optimizer
    SolverData(SolverDataArgs),

    /// Build and evaluate the PCA importance-ranked portfolio
    Pca(PcaArgs),

    /// Evaluate the weights produced by the external optimizer
    Solver(SolverArgs),

    /// Compare the stored summaries of two methods
    Compare(CompareArgs),

    /// Show or write the effective configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Return definition accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Log returns
    Log,
    /// Simple returns
    Simple,
}

impl From<KindArg> for ReturnKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Log => ReturnKind::Log,
            KindArg::Simple => ReturnKind::Simple,
        }
    }
}
