//! Portfolio and benchmark return series.

use replica_core::prelude::*;
use tracing::debug;

/// Portfolio return per date: `sum_s r[t, s] * w[s]`.
///
/// Missing cells contribute nothing to the date's return.
///
/// # Errors
///
/// `ReplicaError::Data` if a weighted symbol is not a panel column or the
/// panel has no dates.
pub fn weighted_returns(
    panel: &ReturnPanel,
    weights: &WeightVector,
) -> ReplicaResult<ReturnSeries> {
    if panel.n_dates() == 0 {
        return Err(ReplicaError::data("return panel has no dates"));
    }

    let columns: Vec<(usize, f64)> = weights
        .iter()
        .map(|(symbol, w)| {
            panel
                .symbol_index(symbol.as_str())
                .map(|idx| (idx, w))
                .ok_or_else(|| {
                    ReplicaError::data(format!("weighted symbol {symbol} has no returns"))
                })
        })
        .collect::<ReplicaResult<_>>()?;

    let values: Vec<f64> = panel
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&(idx, w)| if row[idx].is_nan() { 0.0 } else { row[idx] * w })
                .sum::<f64>()
        })
        .collect();

    debug!(dates = panel.n_dates(), holdings = columns.len(), "portfolio series built");
    ReturnSeries::new(panel.dates().to_vec(), values)
}

/// Equal-weighted benchmark: the mean across every symbol per date, with
/// missing cells counted as zero returns.
pub fn equal_weight_benchmark(panel: &ReturnPanel) -> ReplicaResult<ReturnSeries> {
    if panel.is_empty() {
        return Err(ReplicaError::data("return panel is empty"));
    }
    let n = panel.n_symbols() as f64;
    let values = panel
        .filled(0.0)
        .rows()
        .iter()
        .map(|row| row.iter().sum::<f64>() / n)
        .collect();
    ReturnSeries::new(panel.dates().to_vec(), values)
}
