//! Descriptive statistics of a return panel.

use replica_core::prelude::*;
use replica_math::statistics::Summary;
use serde::{Deserialize, Serialize};

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Mean, sample standard deviation and range of one symbol's returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolStatistics {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Number of non-missing returns.
    pub count: usize,
    /// Mean return.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Smallest return.
    pub min: f64,
    /// Largest return.
    pub max: f64,
}

/// Shape of a return panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of symbols (columns).
    pub total_symbols: usize,
    /// Earliest date, if any.
    pub first_date: Option<Date>,
    /// Latest date, if any.
    pub last_date: Option<Date>,
    /// Number of dates (rows).
    pub total_days: usize,
    /// Number of missing cells.
    pub missing_values: usize,
}

/// Per-symbol statistics over the non-missing returns, rounded to four
/// decimals.
#[must_use]
pub fn describe(panel: &ReturnPanel) -> Vec<SymbolStatistics> {
    panel
        .symbols()
        .iter()
        .enumerate()
        .map(|(idx, symbol)| {
            let values: Vec<f64> = panel
                .column(idx)
                .into_iter()
                .filter(|v| !v.is_nan())
                .collect();
            let summary = Summary::of(&values);
            SymbolStatistics {
                symbol: symbol.clone(),
                count: summary.count,
                mean: round4(summary.mean),
                std_dev: round4(summary.std_dev),
                min: round4(summary.min),
                max: round4(summary.max),
            }
        })
        .collect()
}

/// Counts symbols, dates and missing cells.
#[must_use]
pub fn summarize(panel: &ReturnPanel) -> DatasetSummary {
    DatasetSummary {
        total_symbols: panel.n_symbols(),
        first_date: panel.dates().first().copied(),
        last_date: panel.dates().last().copied(),
        total_days: panel.n_dates(),
        missing_values: panel.missing_count(),
    }
}
