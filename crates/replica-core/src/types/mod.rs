//! Domain types for index-tracking analytics.
//!
//! - [`Date`]: Trading date
//! - [`Symbol`]: Instrument ticker
//! - [`PriceTable`]: Closing prices keyed by date and symbol
//! - [`ReturnTable`] / [`ReturnPanel`]: Per-symbol returns, long and pivoted
//! - [`ReturnSeries`]: A single portfolio or benchmark return series
//! - [`WeightVector`]: Portfolio weights
//! - [`SolverProblem`]: Input for an external sparse-tracking optimizer
//! - [`Horizon`]: Trailing evaluation windows
//! - [`PerformanceSummary`] / [`ComparisonTable`]: Evaluation output

mod date;
mod horizon;
mod performance;
mod prices;
mod returns;
mod series;
mod solver;
mod symbol;
mod weights;

pub use date::Date;
pub use horizon::{Horizon, TRADING_DAYS_PER_YEAR};
pub use performance::{
    ComparisonRow, ComparisonTable, MethodPair, Metric, PerformanceMetrics, PerformanceSummary,
    RollingMetrics,
};
pub use prices::{PricePoint, PriceTable};
pub use returns::{ReturnKind, ReturnObservation, ReturnPanel, ReturnTable};
pub use series::{AlignedPair, ReturnSeries};
pub use solver::SolverProblem;
pub use symbol::Symbol;
pub use weights::{SymbolWeight, WeightVector};
