//! Collaborator ports.
//!
//! The analytics in Replica are pure functions. Everything that touches the
//! outside world is reached through one of these traits so that the core can
//! be exercised without a market-data feed, an optimizer, or a results
//! directory:
//!
//! - [`PriceSource`]: Per-symbol historical closing prices
//! - [`WeightSolver`]: Sparse tracking optimizer
//! - [`SummaryStore`]: Persistence of per-method performance summaries

use crate::error::ReplicaResult;
use crate::types::{Date, PerformanceSummary, PricePoint, SolverProblem, Symbol, WeightVector};

/// Source of historical closing prices.
///
/// Implementations own retry and rate limiting. A failure is reported for a
/// single symbol; batch drivers skip it and continue with the rest of the
/// universe.
pub trait PriceSource {
    /// Human-readable name of the source, used in log messages.
    fn name(&self) -> &str;

    /// Returns the closing prices of `symbol` with `start <= date <= end`.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Instrument to fetch
    /// * `start` - First date (inclusive)
    /// * `end` - Last date (inclusive)
    fn fetch_history(&self, symbol: &Symbol, start: Date, end: Date)
        -> ReplicaResult<Vec<PricePoint>>;
}

/// A sparse index-tracking optimizer.
///
/// Given a [`SolverProblem`], returns raw weights. The caller validates the
/// result (support size, non-negativity, sum) before using it.
pub trait WeightSolver {
    /// Name of the method, used as the summary label (e.g. `AMPL`).
    fn method(&self) -> &str;

    /// Solves the problem.
    fn solve(&self, problem: &SolverProblem) -> ReplicaResult<WeightVector>;
}

/// Storage for per-method performance summaries, enabling cross-run and
/// cross-method comparison.
pub trait SummaryStore {
    /// Persists a summary under its method name, replacing any previous one.
    fn save(&self, summary: &PerformanceSummary) -> ReplicaResult<()>;

    /// Loads the summary of a method, or `None` if none was stored.
    fn load(&self, method: &str) -> ReplicaResult<Option<PerformanceSummary>>;
}
