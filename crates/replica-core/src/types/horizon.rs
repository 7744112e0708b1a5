//! Evaluation horizons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReplicaError;

/// Trading days per year used for annualization and the 1Y horizon.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// A fixed trailing trading-day window for point-in-time summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// ~3 months (63 trading days)
    #[serde(rename = "3M")]
    ThreeMonths,
    /// ~6 months (126 trading days)
    #[serde(rename = "6M")]
    SixMonths,
    /// ~9 months (189 trading days)
    #[serde(rename = "9M")]
    NineMonths,
    /// ~1 year (252 trading days)
    #[serde(rename = "1Y")]
    OneYear,
}

impl Horizon {
    /// Every horizon, shortest first.
    pub const ALL: [Horizon; 4] = [
        Horizon::ThreeMonths,
        Horizon::SixMonths,
        Horizon::NineMonths,
        Horizon::OneYear,
    ];

    /// Horizons included in method comparisons. 1Y is not compared.
    pub const COMPARED: [Horizon; 3] = [
        Horizon::ThreeMonths,
        Horizon::SixMonths,
        Horizon::NineMonths,
    ];

    /// Number of trading days in the window.
    #[must_use]
    pub fn trading_days(&self) -> usize {
        match self {
            Self::ThreeMonths => 63,
            Self::SixMonths => 126,
            Self::NineMonths => 189,
            Self::OneYear => TRADING_DAYS_PER_YEAR,
        }
    }

    /// Short label (`3M`, `6M`, `9M`, `1Y`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::NineMonths => "9M",
            Self::OneYear => "1Y",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Horizon {
    type Err = ReplicaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "3M" => Ok(Self::ThreeMonths),
            "6M" => Ok(Self::SixMonths),
            "9M" => Ok(Self::NineMonths),
            "1Y" | "12M" => Ok(Self::OneYear),
            other => Err(ReplicaError::parse(format!("Unknown horizon: {other}"))),
        }
    }
}
