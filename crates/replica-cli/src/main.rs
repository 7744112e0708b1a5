//! Replica CLI - Sparse index-tracking analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Daily log returns from a price file
//! replica returns --input data/raw/prices_full.csv --kind log
//!
//! # Equal-weight benchmark and optimizer input
//! replica benchmark
//! replica solver-data --q 10
//!
//! # Build and evaluate the PCA portfolio, then the optimizer's
//! replica pca --n-stocks 10
//! replica solver --weights data/ampl/solver_weights.csv
//!
//! # Compare stored summaries
//! replica compare PCA AMPL
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::PipelineConfig;

fn init_tracing(cli: &Cli) {
    let directives = if cli.verbose {
        "debug".to_string()
    } else if cli.quiet {
        "warn".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,replica=debug".into())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(directives))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = PipelineConfig::load(&cli.config)?;
    debug!(path = %cli.config.display(), "effective configuration loaded");

    let format = cli.format;
    match cli.command {
        Commands::Fetch(args) => commands::fetch::execute(args, &config, format)?,
        Commands::Returns(args) => commands::returns::execute(args, &config, format)?,
        Commands::Stats(args) => commands::stats::execute(args, &config, format)?,
        Commands::Benchmark(args) => commands::benchmark::execute(args, &config, format)?,
        Commands::SolverData(args) => commands::solver_data::execute(args, &config, format)?,
        Commands::Pca(args) => commands::pca::execute(args, &config, format)?,
        Commands::Solver(args) => commands::solver::execute(args, &config, format)?,
        Commands::Compare(args) => commands::compare::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        error!(error = %e, "command failed");
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
