//! Per-symbol return computation.

use replica_core::prelude::*;
use tracing::{debug, info};

/// Computes per-symbol returns from closing prices.
///
/// Each symbol's observations are ordered by date and differenced against the
/// symbol's own preceding observation. The first observation of a symbol
/// produces no row, and symbols with fewer than two prices contribute nothing.
pub fn compute_returns(prices: &PriceTable, kind: ReturnKind) -> ReplicaResult<ReturnTable> {
    let mut rows = Vec::with_capacity(prices.len());
    let mut skipped = 0usize;

    for (symbol, history) in prices.by_symbol() {
        if history.len() < 2 {
            debug!(%symbol, observations = history.len(), "not enough prices for a return");
            skipped += 1;
            continue;
        }
        for pair in history.windows(2) {
            let (_, previous) = pair[0];
            let (date, close) = pair[1];
            let value = kind.compute(previous, close);
            if !value.is_finite() {
                return Err(ReplicaError::data(format!(
                    "non-finite {kind} return for {symbol} on {date}"
                )));
            }
            rows.push(ReturnObservation {
                date,
                symbol: symbol.clone(),
                close,
                value,
            });
        }
    }

    let table = ReturnTable::new(kind, rows);
    info!(
        rows = table.len(),
        symbols = table.symbols().len(),
        skipped,
        %kind,
        "returns computed"
    );
    Ok(table)
}
