//! Input handed to an external sparse-tracking optimizer.

use serde::{Deserialize, Serialize};

use super::{Date, Symbol};
use crate::error::{ReplicaError, ReplicaResult};

/// A cardinality-constrained tracking problem.
///
/// The optimizer chooses exactly `q` of the `symbols` with non-negative
/// weights summing to one so that the weighted `returns` follow `benchmark`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverProblem {
    symbols: Vec<Symbol>,
    dates: Vec<Date>,
    returns: Vec<Vec<f64>>,
    benchmark: Vec<f64>,
    q: usize,
}

impl SolverProblem {
    /// Creates a problem from a T x N return matrix and a length-T benchmark.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Data` if the dimensions disagree or any cell is
    /// not finite, and `ReplicaError::Validation` if `q` is zero or larger
    /// than the number of symbols.
    pub fn new(
        symbols: Vec<Symbol>,
        dates: Vec<Date>,
        returns: Vec<Vec<f64>>,
        benchmark: Vec<f64>,
        q: usize,
    ) -> ReplicaResult<Self> {
        if symbols.is_empty() || dates.is_empty() {
            return Err(ReplicaError::data("solver problem needs symbols and dates"));
        }
        if returns.len() != dates.len() || benchmark.len() != dates.len() {
            return Err(ReplicaError::data(format!(
                "solver problem has {} dates, {} return rows, {} benchmark values",
                dates.len(),
                returns.len(),
                benchmark.len()
            )));
        }
        if returns.iter().any(|row| row.len() != symbols.len()) {
            return Err(ReplicaError::data(
                "solver return rows must have one value per symbol",
            ));
        }
        if returns.iter().flatten().chain(&benchmark).any(|v| !v.is_finite()) {
            return Err(ReplicaError::data("solver problem contains non-finite values"));
        }
        if q == 0 || q > symbols.len() {
            return Err(ReplicaError::validation(format!(
                "q must be between 1 and {}, got {q}",
                symbols.len()
            )));
        }

        Ok(Self {
            symbols,
            dates,
            returns,
            benchmark,
            q,
        })
    }

    /// Candidate symbols (columns), 1-based index `i` is `symbols[i - 1]`.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Dates (rows).
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// T x N return matrix.
    #[must_use]
    pub fn returns(&self) -> &[Vec<f64>] {
        &self.returns
    }

    /// Benchmark return per date.
    #[must_use]
    pub fn benchmark(&self) -> &[f64] {
        &self.benchmark
    }

    /// Number of instruments to select.
    #[must_use]
    pub fn q(&self) -> usize {
        self.q
    }

    /// Number of candidate symbols.
    #[must_use]
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Number of periods.
    #[must_use]
    pub fn n_periods(&self) -> usize {
        self.dates.len()
    }
}
