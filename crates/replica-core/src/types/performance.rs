//! Tracking performance summaries and method comparisons.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{Date, Horizon};
use crate::error::ReplicaError;

/// A tracking performance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Pearson correlation with the benchmark.
    Correlation,
    /// Annualized standard deviation of excess returns.
    TrackingError,
    /// Annualized mean excess return over tracking error.
    InformationRatio,
    /// Annualized excess-over-risk-free return over its volatility.
    SharpeRatio,
}

impl Metric {
    /// Every metric in report order.
    pub const ALL: [Metric; 4] = [
        Metric::Correlation,
        Metric::TrackingError,
        Metric::InformationRatio,
        Metric::SharpeRatio,
    ];

    /// Column key used in flat files.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Correlation => "correlation",
            Self::TrackingError => "tracking_error",
            Self::InformationRatio => "information_ratio",
            Self::SharpeRatio => "sharpe_ratio",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Correlation => "Correlation",
            Self::TrackingError => "Tracking Error",
            Self::InformationRatio => "Information Ratio",
            Self::SharpeRatio => "Sharpe Ratio",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ReplicaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == normalized)
            .ok_or_else(|| ReplicaError::parse(format!("Unknown metric: {s}")))
    }
}

/// The four tracking metrics for one horizon. NaN marks an undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Pearson correlation with the benchmark.
    pub correlation: f64,
    /// Annualized tracking error.
    pub tracking_error: f64,
    /// Annualized information ratio.
    pub information_ratio: f64,
    /// Annualized Sharpe ratio over the trailing rolling window.
    pub sharpe_ratio: f64,
}

impl PerformanceMetrics {
    /// Returns one metric.
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Correlation => self.correlation,
            Metric::TrackingError => self.tracking_error,
            Metric::InformationRatio => self.information_ratio,
            Metric::SharpeRatio => self.sharpe_ratio,
        }
    }
}

/// Per-horizon metrics for one construction method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    method: String,
    horizons: BTreeMap<Horizon, PerformanceMetrics>,
}

impl PerformanceSummary {
    /// Creates an empty summary for a method.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            horizons: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the metrics of a horizon.
    #[must_use]
    pub fn with(mut self, horizon: Horizon, metrics: PerformanceMetrics) -> Self {
        self.horizons.insert(horizon, metrics);
        self
    }

    /// Adds (or replaces) the metrics of a horizon in place.
    pub fn insert(&mut self, horizon: Horizon, metrics: PerformanceMetrics) {
        self.horizons.insert(horizon, metrics);
    }

    /// Method name (e.g. `PCA`, `AMPL`).
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Metrics of a horizon.
    #[must_use]
    pub fn get(&self, horizon: Horizon) -> Option<&PerformanceMetrics> {
        self.horizons.get(&horizon)
    }

    /// Horizons present, shortest first.
    pub fn horizons(&self) -> impl Iterator<Item = (Horizon, &PerformanceMetrics)> {
        self.horizons.iter().map(|(h, m)| (*h, m))
    }

    /// Number of horizons present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.horizons.len()
    }

    /// Returns true if no horizon is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizons.is_empty()
    }
}

/// Trailing-window metric series over a whole aligned history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingMetrics {
    /// Window length in observations.
    pub window: usize,
    /// Aligned dates.
    pub dates: Vec<Date>,
    /// Rolling correlation (NaN before the window fills).
    pub correlation: Vec<f64>,
    /// Rolling annualized tracking error.
    pub tracking_error: Vec<f64>,
    /// Rolling annualized information ratio.
    pub information_ratio: Vec<f64>,
}

impl RollingMetrics {
    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// One metric for both compared methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodPair {
    /// Value for the first method.
    pub method_a: f64,
    /// Value for the second method.
    pub method_b: f64,
}

impl MethodPair {
    /// `method_a - method_b`.
    #[must_use]
    pub fn difference(&self) -> f64 {
        self.method_a - self.method_b
    }
}

/// A flattened comparison entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Horizon.
    pub horizon: Horizon,
    /// Metric.
    pub metric: Metric,
    /// First method's value.
    pub method_a: f64,
    /// Second method's value.
    pub method_b: f64,
    /// `method_a - method_b`.
    pub difference: f64,
}

/// Side-by-side metrics of two methods, per horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Name of the first method.
    pub method_a: String,
    /// Name of the second method.
    pub method_b: String,
    /// Horizon -> metric -> pair.
    pub horizons: BTreeMap<Horizon, BTreeMap<Metric, MethodPair>>,
}

impl ComparisonTable {
    /// Pair for a horizon and metric.
    #[must_use]
    pub fn get(&self, horizon: Horizon, metric: Metric) -> Option<&MethodPair> {
        self.horizons.get(&horizon).and_then(|m| m.get(&metric))
    }

    /// `method_a - method_b` for a horizon and metric.
    #[must_use]
    pub fn difference(&self, horizon: Horizon, metric: Metric) -> Option<f64> {
        self.get(horizon, metric).map(MethodPair::difference)
    }

    /// Flattens the table, horizon-major in metric report order.
    #[must_use]
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.horizons
            .iter()
            .flat_map(|(horizon, metrics)| {
                metrics.iter().map(move |(metric, pair)| ComparisonRow {
                    horizon: *horizon,
                    metric: *metric,
                    method_a: pair.method_a,
                    method_b: pair.method_b,
                    difference: pair.difference(),
                })
            })
            .collect()
    }
}
