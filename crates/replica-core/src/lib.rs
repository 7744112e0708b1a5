//! # Replica Core
//!
//! Core types, errors, and collaborator ports for the Replica sparse
//! index-tracking toolkit.
//!
//! - **Types**: `Date`, `Symbol`, price and return tables, `ReturnSeries`,
//!   `WeightVector`, evaluation `Horizon`s and performance summaries
//! - **Errors**: A single `ReplicaError` classified by [`ErrorKind`]
//! - **Traits**: Ports for price sources, optimizers, and summary storage
//!
//! ## Example
//!
//! ```rust
//! use replica_core::prelude::*;
//!
//! let d1 = Date::from_ymd(2025, 1, 2).unwrap();
//! let table = PriceTable::from_points(vec![
//!     PricePoint::new(d1, "AAPL", 243.85),
//!     PricePoint::new(d1, "AAPL", 1.0), // duplicate, discarded
//! ])
//! .unwrap();
//! assert_eq!(table.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorKind, ReplicaError, ReplicaResult};
    pub use crate::traits::{PriceSource, SummaryStore, WeightSolver};
    pub use crate::types::{
        AlignedPair, ComparisonRow, ComparisonTable, Date, Horizon, MethodPair, Metric,
        PerformanceMetrics, PerformanceSummary, PricePoint, PriceTable, ReturnKind,
        ReturnObservation, ReturnPanel, ReturnSeries, ReturnTable, RollingMetrics, SolverProblem,
        Symbol, SymbolWeight, WeightVector, TRADING_DAYS_PER_YEAR,
    };
}

// Re-export commonly used types at crate root
pub use error::{ErrorKind, ReplicaError, ReplicaResult};
pub use types::{Date, Horizon, ReturnSeries, Symbol, WeightVector};
