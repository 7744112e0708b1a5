//! Portfolio weight vectors.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Symbol;
use crate::error::{ReplicaError, ReplicaResult};

/// Weight assigned to one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolWeight {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Portfolio weight (fraction of one).
    pub weight: f64,
}

/// An ordered symbol -> weight mapping.
///
/// Weights are finite and non-negative and each symbol appears once. Whether
/// the vector sums to one and has the configured support size is established
/// by the portfolio constructors, which are the only producers of final
/// portfolios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector {
    entries: Vec<SymbolWeight>,
}

impl WeightVector {
    /// Creates a weight vector preserving the input order.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Validation` for negative or non-finite weights
    /// and for repeated symbols.
    pub fn new<S: Into<Symbol>>(entries: impl IntoIterator<Item = (S, f64)>) -> ReplicaResult<Self> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (symbol, weight) in entries {
            let symbol = symbol.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(ReplicaError::validation(format!(
                    "weight for {symbol} must be finite and non-negative, got {weight}"
                )));
            }
            if !seen.insert(symbol.clone()) {
                return Err(ReplicaError::validation(format!(
                    "symbol {symbol} appears more than once"
                )));
            }
            out.push(SymbolWeight { symbol, weight });
        }
        Ok(Self { entries: out })
    }

    /// Entries in order.
    #[must_use]
    pub fn entries(&self) -> &[SymbolWeight] {
        &self.entries
    }

    /// Iterates over `(symbol, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, f64)> {
        self.entries.iter().map(|e| (&e.symbol, e.weight))
    }

    /// Number of entries, zero weights included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of strictly positive weights.
    #[must_use]
    pub fn support_size(&self) -> usize {
        self.entries.iter().filter(|e| e.weight > 0.0).count()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Weight of a symbol, if present.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.symbol.as_str() == symbol)
            .map(|e| e.weight)
    }

    /// Symbols in order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.entries.iter().map(|e| e.symbol.clone()).collect()
    }

    /// Returns true if the weights sum to one within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }

    /// Rescales the weights to sum to one.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Validation` if the weights sum to zero.
    pub fn normalized(&self) -> ReplicaResult<Self> {
        let total = self.sum();
        if total <= 0.0 {
            return Err(ReplicaError::validation(
                "cannot normalize weights that sum to zero",
            ));
        }
        Ok(Self {
            entries: self
                .entries
                .iter()
                .map(|e| SymbolWeight {
                    symbol: e.symbol.clone(),
                    weight: e.weight / total,
                })
                .collect(),
        })
    }
}
