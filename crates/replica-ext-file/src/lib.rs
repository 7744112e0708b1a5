//! # Replica Ext File
//!
//! Flat-file collaborators for the Replica pipeline.
//!
//! This crate provides the CSV and AMPL boundary:
//! - Price, return, benchmark and weight files
//! - AMPL data files for the external tracking optimizer
//! - File-backed implementations of the `replica-core` ports:
//!   [`CsvPriceSource`], [`SolverOutputFile`] and [`FileSummaryStore`]
//! - Per-method result files under a results directory

#![warn(missing_docs)]
#![warn(clippy::all)]

mod ampl;
mod csv_io;
mod prices;
mod returns;
mod summary;
mod weights;

pub use ampl::*;
pub use prices::*;
pub use returns::*;
pub use summary::*;
pub use weights::*;

use std::path::{Path, PathBuf};

use replica_core::prelude::*;
use tracing::info;

/// Locations of the per-method result files inside a results directory.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    root: PathBuf,
}

impl ResultsDir {
    /// Results rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Summary store over the same directory.
    #[must_use]
    pub fn store(&self) -> FileSummaryStore {
        FileSummaryStore::new(&self.root)
    }

    fn method_file(&self, method: &str, suffix: &str) -> PathBuf {
        self.root
            .join(format!("{}_{suffix}.csv", method.to_lowercase()))
    }

    /// `<method>_rolling.csv`
    #[must_use]
    pub fn rolling_path(&self, method: &str) -> PathBuf {
        self.method_file(method, "rolling")
    }

    /// `<method>_returns.csv`
    #[must_use]
    pub fn returns_path(&self, method: &str) -> PathBuf {
        self.method_file(method, "returns")
    }

    /// `<method>_weights.csv`
    #[must_use]
    pub fn weights_path(&self, method: &str) -> PathBuf {
        self.method_file(method, "weights")
    }

    /// `method_comparison.csv`
    #[must_use]
    pub fn comparison_path(&self) -> PathBuf {
        self.root.join(COMPARISON_FILE)
    }

    /// Persists every output of one method run: summary, rolling metrics,
    /// portfolio series and weights.
    pub fn save_run(
        &self,
        summary: &PerformanceSummary,
        rolling: &RollingMetrics,
        portfolio: &ReturnSeries,
        weights: &WeightVector,
    ) -> ReplicaResult<()> {
        let method = summary.method();
        self.store().save(summary)?;
        write_rolling(self.rolling_path(method), rolling)?;
        write_portfolio_series(self.returns_path(method), portfolio)?;
        write_weights(self.weights_path(method), weights)?;
        info!(method, dir = %self.root.display(), "method results saved");
        Ok(())
    }
}
