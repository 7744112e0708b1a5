//! Batch price retrieval over a symbol universe.

use replica_core::prelude::*;
use tracing::{debug, info, warn};

/// S&P 100 constituents used as the default universe.
pub const SP100_UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "GOOG", "AMZN", "META", "NVDA", "TSLA", "PEP", "JNJ", "AVGO", "V", "MA", "UNH",
    "LLY", "HD", "MRK", "XOM", "ADBE", "ABBV", "KO", "COST", "BAC", "CSCO", "WMT", "CVX", "TMO",
    "MCD", "DHR", "ACN", "INTC", "QCOM", "TXN", "NEE", "LIN", "PM", "AMGN", "UNP", "MDT", "UPS",
    "IBM", "GS", "RTX", "ISRG", "NOW", "BLK", "AMAT", "LMT", "GE", "MS", "LOW", "CAT", "DE", "CB",
    "PLD", "C", "NFLX", "ADI", "SPGI", "SCHW", "ZTS", "BA", "T", "MO", "VRTX", "CI", "REGN",
    "GILD", "ADP", "EL", "SYK", "MMC", "PGR", "BDX", "CL", "SO", "PSX", "ETN", "FDX", "ICE", "AXP",
    "COF", "GM", "DUK", "AON", "ECL", "ORLY", "NSC", "USB", "EW", "FIS", "APD", "SHW", "AIG", "BK",
    "ALL", "PXD", "BIIB", "TGT", "F", "HCA",
];

/// The default universe as symbols.
#[must_use]
pub fn default_universe() -> Vec<Symbol> {
    SP100_UNIVERSE.iter().map(|s| Symbol::from(*s)).collect()
}

/// Outcome of a batch fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Every price retrieved, one per `(date, symbol)`.
    pub prices: PriceTable,
    /// Symbols that returned at least one price.
    pub fetched: Vec<Symbol>,
    /// Symbols the source answered with no prices.
    pub empty: Vec<Symbol>,
    /// Symbols whose fetch failed, with the reason.
    pub failed: Vec<(Symbol, String)>,
}

impl FetchReport {
    /// Returns true if nothing was retrieved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Fetches every symbol of `universe` between `start` and `end` inclusive.
///
/// A failure for one symbol is logged and recorded; the batch continues.
///
/// # Errors
///
/// Only if the prices returned by the source are themselves invalid.
pub fn fetch_universe(
    source: &dyn PriceSource,
    universe: &[Symbol],
    start: Date,
    end: Date,
) -> ReplicaResult<FetchReport> {
    let mut report = FetchReport::default();
    let mut points = Vec::new();

    for symbol in universe {
        match source.fetch_history(symbol, start, end) {
            Ok(history) if history.is_empty() => {
                debug!(%symbol, source = source.name(), "no prices returned");
                report.empty.push(symbol.clone());
            }
            Ok(history) => {
                debug!(%symbol, points = history.len(), "prices fetched");
                points.extend(history);
                report.fetched.push(symbol.clone());
            }
            Err(err) => {
                warn!(%symbol, source = source.name(), error = %err, "fetch failed, skipping");
                report.failed.push((symbol.clone(), err.to_string()));
            }
        }
    }

    report.prices = PriceTable::from_points(points)?;
    info!(
        source = source.name(),
        fetched = report.fetched.len(),
        empty = report.empty.len(),
        failed = report.failed.len(),
        rows = report.prices.len(),
        "universe fetched"
    );
    Ok(report)
}
