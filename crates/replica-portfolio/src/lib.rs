//! # Replica Portfolio
//!
//! Sparse index-tracking portfolio construction and evaluation.
//!
//! This crate turns closing prices into a small tracking portfolio and scores
//! how well it follows a benchmark.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Injected collaborators**: Market data, optimizers and summary storage
//!   are reached through the `replica-core` ports
//! - **Typed failures**: Every stage returns `ReplicaResult`
//!
//! ## Quick Start
//!
//! ```rust
//! use replica_core::prelude::*;
//! use replica_portfolio::prelude::*;
//!
//! let d = |day| Date::from_ymd(2025, 1, day).unwrap();
//! let prices = PriceTable::from_points(vec![
//!     PricePoint::new(d(2), "A", 100.0),
//!     PricePoint::new(d(3), "A", 110.0),
//!     PricePoint::new(d(6), "A", 121.0),
//! ])
//! .unwrap();
//!
//! let returns = compute_returns(&prices, ReturnKind::Log).unwrap();
//! assert_eq!(returns.len(), 2);
//!
//! let series = weighted_returns(
//!     &returns.to_panel(),
//!     &WeightVector::new(vec![("A", 1.0)]).unwrap(),
//! )
//! .unwrap();
//! let summary = evaluate("SELF", &series, &series, &EvaluationConfig::default()).unwrap();
//! assert_eq!(summary.get(Horizon::ThreeMonths).unwrap().tracking_error, 0.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`returns`] - Per-symbol log or simple returns
//! - [`construction`] - Solver passthrough and importance-ranked selection
//! - [`performance`] - Horizon metrics and rolling metrics
//! - [`comparison`] - Side-by-side comparison of two methods
//! - [`benchmark`] - Weighted portfolio series and equal-weight benchmark
//! - [`solver`] - Optimizer problem assembly
//! - [`statistics`] - Per-symbol statistics and dataset summary
//! - [`fetch`] - Batch price retrieval with per-symbol failure isolation
//! - [`methods`] - PCA and solver pipelines

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod benchmark;
pub mod comparison;
pub mod construction;
pub mod fetch;
pub mod methods;
pub mod performance;
pub mod returns;
pub mod solver;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::benchmark::{equal_weight_benchmark, weighted_returns};
    pub use crate::comparison::compare;
    pub use crate::construction::{
        from_solver_weights, select_by_importance, ComponentLoadings, SUPPORT_EPSILON,
    };
    pub use crate::fetch::{default_universe, fetch_universe, FetchReport, SP100_UNIVERSE};
    pub use crate::methods::{
        run_pca_method, run_solver_method, MethodRun, PcaSettings, PCA_METHOD,
    };
    pub use crate::performance::{
        evaluate, rolling_metrics, rolling_sharpe, sharpe_ratio, EvaluationConfig,
    };
    pub use crate::returns::compute_returns;
    pub use crate::solver::build_problem;
    pub use crate::statistics::{describe, summarize, DatasetSummary, SymbolStatistics};
}
