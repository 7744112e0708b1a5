//! Closing price observations.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::{Date, Symbol};
use crate::error::{ReplicaError, ReplicaResult};

/// A single closing price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: Date,
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price observation.
    #[must_use]
    pub fn new(date: Date, symbol: impl Into<Symbol>, close: f64) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            close,
        }
    }
}

/// A collection of closing prices, conceptually a sparse date x symbol map.
///
/// At most one price exists per `(date, symbol)`. When the input carries
/// duplicates the first occurrence wins and later ones are discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    points: Vec<PricePoint>,
}

impl PriceTable {
    /// Builds a table from observations in encounter order.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::InvalidPrice` if a close is not finite or not
    /// strictly positive.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> ReplicaResult<Self> {
        let mut seen: HashSet<(Date, Symbol)> = HashSet::new();
        let mut kept = Vec::new();

        for point in points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(ReplicaError::InvalidPrice {
                    symbol: point.symbol.to_string(),
                    date: point.date.to_string(),
                    value: point.close,
                });
            }
            if seen.insert((point.date, point.symbol.clone())) {
                kept.push(point);
            }
        }

        Ok(Self { points: kept })
    }

    /// Returns the observations in the order they were kept.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the table holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct symbols in ascending order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.points
            .iter()
            .map(|p| p.symbol.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.points
            .iter()
            .map(|p| p.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Groups observations per symbol, each history sorted by date.
    #[must_use]
    pub fn by_symbol(&self) -> BTreeMap<Symbol, Vec<(Date, f64)>> {
        let mut grouped: BTreeMap<Symbol, Vec<(Date, f64)>> = BTreeMap::new();
        for p in &self.points {
            grouped
                .entry(p.symbol.clone())
                .or_default()
                .push((p.date, p.close));
        }
        for history in grouped.values_mut() {
            history.sort_by_key(|(date, _)| *date);
        }
        grouped
    }

    /// Returns a table restricted to the given symbols.
    #[must_use]
    pub fn filter_symbols(&self, symbols: &[Symbol]) -> Self {
        let wanted: HashSet<&Symbol> = symbols.iter().collect();
        Self {
            points: self
                .points
                .iter()
                .filter(|p| wanted.contains(&p.symbol))
                .cloned()
                .collect(),
        }
    }

    /// Appends another table; existing `(date, symbol)` pairs take precedence.
    #[must_use]
    pub fn merge(mut self, other: PriceTable) -> Self {
        let mut seen: HashSet<(Date, Symbol)> = self
            .points
            .iter()
            .map(|p| (p.date, p.symbol.clone()))
            .collect();
        for point in other.points {
            if seen.insert((point.date, point.symbol.clone())) {
                self.points.push(point);
            }
        }
        self
    }
}
