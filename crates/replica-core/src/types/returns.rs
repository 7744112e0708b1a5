//! Return tables and their dense date x symbol pivot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::{Date, Symbol};
use crate::error::{ReplicaError, ReplicaResult};

/// How a return is derived from two consecutive prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// `ln(p_t / p_{t-1})`
    #[default]
    Log,
    /// `p_t / p_{t-1} - 1`
    Simple,
}

impl ReturnKind {
    /// Computes the return between a previous and a current price.
    #[must_use]
    pub fn compute(self, previous: f64, current: f64) -> f64 {
        match self {
            Self::Log => (current / previous).ln(),
            Self::Simple => current / previous - 1.0,
        }
    }

    /// Column name used when the table is written to a flat file.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Log => "log_return",
            Self::Simple => "return",
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            Self::Simple => f.write_str("simple"),
        }
    }
}

impl FromStr for ReturnKind {
    type Err = ReplicaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "log_return" => Ok(Self::Log),
            "simple" | "return" | "pct" => Ok(Self::Simple),
            other => Err(ReplicaError::parse(format!("Unknown return kind: {other}"))),
        }
    }
}

/// One return observation for a symbol on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    /// Trading date the return ends on.
    pub date: Date,
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Closing price on `date`.
    pub close: f64,
    /// Return from the symbol's previous observation to `date`.
    pub value: f64,
}

/// A date x symbol table of returns of a single [`ReturnKind`].
///
/// Rows are kept ordered by `(symbol, date)` with at most one row per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnTable {
    kind: ReturnKind,
    rows: Vec<ReturnObservation>,
}

impl ReturnTable {
    /// Creates a table, sorting rows by `(symbol, date)` and dropping
    /// repeated pairs (first occurrence wins).
    #[must_use]
    pub fn new(kind: ReturnKind, rows: Vec<ReturnObservation>) -> Self {
        let mut seen: HashSet<(Symbol, Date)> = HashSet::new();
        let mut rows: Vec<ReturnObservation> = rows
            .into_iter()
            .filter(|r| seen.insert((r.symbol.clone(), r.date)))
            .collect();
        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol).then(a.date.cmp(&b.date)));
        Self { kind, rows }
    }

    /// The return definition used for every row.
    #[must_use]
    pub fn kind(&self) -> ReturnKind {
        self.kind
    }

    /// Rows ordered by `(symbol, date)`.
    #[must_use]
    pub fn rows(&self) -> &[ReturnObservation] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct symbols in ascending order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.rows
            .iter()
            .map(|r| r.symbol.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.rows
            .iter()
            .map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns a table restricted to the given symbols.
    #[must_use]
    pub fn filter_symbols(&self, symbols: &[Symbol]) -> Self {
        let wanted: HashSet<&Symbol> = symbols.iter().collect();
        Self {
            kind: self.kind,
            rows: self
                .rows
                .iter()
                .filter(|r| wanted.contains(&r.symbol))
                .cloned()
                .collect(),
        }
    }

    /// Pivots the table into a dense date x symbol panel.
    #[must_use]
    pub fn to_panel(&self) -> ReturnPanel {
        ReturnPanel::from_table(self)
    }
}

/// Dense date x symbol matrix of returns; missing cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnPanel {
    dates: Vec<Date>,
    symbols: Vec<Symbol>,
    rows: Vec<Vec<f64>>,
}

impl ReturnPanel {
    /// Creates a panel from explicit dates, symbols and row-major values.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Data` if the dimensions disagree or the dates
    /// are not strictly increasing.
    pub fn new(dates: Vec<Date>, symbols: Vec<Symbol>, rows: Vec<Vec<f64>>) -> ReplicaResult<Self> {
        if rows.len() != dates.len() {
            return Err(ReplicaError::data(format!(
                "panel has {} dates but {} rows",
                dates.len(),
                rows.len()
            )));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != symbols.len()) {
            return Err(ReplicaError::data(format!(
                "panel row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                symbols.len()
            )));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReplicaError::data("panel dates must be strictly increasing"));
        }
        Ok(Self {
            dates,
            symbols,
            rows,
        })
    }

    /// Pivots a return table by date (rows) and symbol (columns).
    #[must_use]
    pub fn from_table(table: &ReturnTable) -> Self {
        let symbols = table.symbols();
        let dates = table.dates();
        let col_of: HashMap<&Symbol, usize> =
            symbols.iter().enumerate().map(|(i, s)| (s, i)).collect();
        let row_of: BTreeMap<Date, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut rows = vec![vec![f64::NAN; symbols.len()]; dates.len()];
        for obs in table.rows() {
            rows[row_of[&obs.date]][col_of[&obs.symbol]] = obs.value;
        }

        Self {
            dates,
            symbols,
            rows,
        }
    }

    /// Row dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column symbols.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Row-major values.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of dates.
    #[must_use]
    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    /// Number of symbols.
    #[must_use]
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the panel has no dates or no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.symbols.is_empty()
    }

    /// Column index of a symbol.
    #[must_use]
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s.as_str() == symbol)
    }

    /// Copies one symbol's column.
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[index]).collect()
    }

    /// Number of missing (NaN) cells.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|v| v.is_nan()).count())
            .sum()
    }

    /// Drops every date that has at least one missing cell.
    #[must_use]
    pub fn complete_rows(&self) -> Self {
        let (dates, rows): (Vec<_>, Vec<_>) = self
            .dates
            .iter()
            .zip(&self.rows)
            .filter(|(_, row)| row.iter().all(|v| !v.is_nan()))
            .map(|(d, row)| (*d, row.clone()))
            .unzip();
        Self {
            dates,
            symbols: self.symbols.clone(),
            rows,
        }
    }

    /// Replaces every missing cell with `value`.
    #[must_use]
    pub fn filled(&self, value: f64) -> Self {
        Self {
            dates: self.dates.clone(),
            symbols: self.symbols.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(|v| if v.is_nan() { value } else { *v }).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 2, day).unwrap()
    }

    fn obs(day: u32, symbol: &str, value: f64) -> ReturnObservation {
        ReturnObservation {
            date: d(day),
            symbol: Symbol::from(symbol),
            close: 1.0,
            value,
        }
    }

    #[test]
    fn test_kind_compute() {
        assert_relative_eq!(ReturnKind::Log.compute(100.0, 110.0), 1.1_f64.ln());
        assert_relative_eq!(ReturnKind::Simple.compute(100.0, 110.0), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("LOG".parse::<ReturnKind>().unwrap(), ReturnKind::Log);
        assert_eq!("return".parse::<ReturnKind>().unwrap(), ReturnKind::Simple);
        assert!("weird".parse::<ReturnKind>().is_err());
        assert_eq!(ReturnKind::Simple.column_name(), "return");
    }

    #[test]
    fn test_table_orders_by_symbol_then_date() {
        let table = ReturnTable::new(
            ReturnKind::Log,
            vec![obs(3, "B", 0.1), obs(2, "B", 0.2), obs(3, "A", 0.3), obs(3, "A", 9.0)],
        );
        let keys: Vec<_> = table
            .rows()
            .iter()
            .map(|r| (r.symbol.to_string(), r.date))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), d(3)),
                ("B".to_string(), d(2)),
                ("B".to_string(), d(3))
            ]
        );
        assert_eq!(table.rows()[0].value, 0.3);
    }

    #[test]
    fn test_panel_pivot_and_missing() {
        let table = ReturnTable::new(
            ReturnKind::Simple,
            vec![obs(2, "A", 0.01), obs(3, "A", 0.02), obs(3, "B", -0.01)],
        );
        let panel = table.to_panel();

        assert_eq!(panel.n_dates(), 2);
        assert_eq!(panel.n_symbols(), 2);
        assert_eq!(panel.missing_count(), 1);
        assert!(panel.rows()[0][1].is_nan());

        let complete = panel.complete_rows();
        assert_eq!(complete.dates(), &[d(3)]);

        let filled = panel.filled(0.0);
        assert_eq!(filled.rows()[0], vec![0.01, 0.0]);
        assert_eq!(filled.column(0), vec![0.01, 0.02]);
        assert_eq!(panel.symbol_index("B"), Some(1));
    }

    #[test]
    fn test_panel_new_validates() {
        assert!(ReturnPanel::new(vec![d(1)], vec![Symbol::from("A")], vec![]).is_err());
        assert!(ReturnPanel::new(vec![d(1)], vec![Symbol::from("A")], vec![vec![1.0, 2.0]]).is_err());
        assert!(ReturnPanel::new(
            vec![d(2), d(1)],
            vec![Symbol::from("A")],
            vec![vec![1.0], vec![2.0]]
        )
        .is_err());
    }
}
