//! End-to-end construction and evaluation for each portfolio method.

use nalgebra::DMatrix;
use replica_core::prelude::*;
use replica_math::decomposition::{standardize, Pca};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::benchmark::weighted_returns;
use crate::construction::{from_solver_weights, select_by_importance, ComponentLoadings};
use crate::performance::{evaluate, rolling_metrics, EvaluationConfig};
use crate::returns::compute_returns;

/// Label of the factor-decomposition method.
pub const PCA_METHOD: &str = "PCA";

/// Parameters of the factor-decomposition method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcaSettings {
    /// Number of principal components to keep.
    pub n_components: usize,
    /// Number of instruments to hold.
    pub n_stocks: usize,
}

impl Default for PcaSettings {
    fn default() -> Self {
        Self {
            n_components: 10,
            n_stocks: 10,
        }
    }
}

/// Everything produced by one method run.
#[derive(Debug, Clone)]
pub struct MethodRun {
    /// Method label.
    pub method: String,
    /// Final portfolio weights.
    pub weights: WeightVector,
    /// Daily portfolio returns.
    pub portfolio: ReturnSeries,
    /// Per-horizon performance.
    pub summary: PerformanceSummary,
    /// Trailing-window metrics over the whole history.
    pub rolling: RollingMetrics,
    /// Share of variance explained per component (PCA only).
    pub explained_variance_ratio: Vec<f64>,
}

fn finish(
    method: &str,
    weights: WeightVector,
    panel: &ReturnPanel,
    benchmark: &ReturnSeries,
    config: &EvaluationConfig,
) -> ReplicaResult<MethodRun> {
    let portfolio = weighted_returns(panel, &weights)?;
    let summary = evaluate(method, &portfolio, benchmark, config)?;
    let rolling = rolling_metrics(&portfolio, benchmark, config)?;
    Ok(MethodRun {
        method: method.to_string(),
        weights,
        portfolio,
        summary,
        rolling,
        explained_variance_ratio: Vec::new(),
    })
}

/// Builds and evaluates the PCA importance-ranked portfolio.
///
/// Simple returns are pivoted, dates with any missing return are dropped,
/// columns are standardized, and symbols are ranked by their loadings on the
/// leading components weighted by explained variance.
pub fn run_pca_method(
    prices: &PriceTable,
    benchmark: &ReturnSeries,
    settings: &PcaSettings,
    config: &EvaluationConfig,
) -> ReplicaResult<MethodRun> {
    let panel = compute_returns(prices, ReturnKind::Simple)?
        .to_panel()
        .complete_rows();
    if panel.n_dates() < 2 || panel.n_symbols() == 0 {
        return Err(ReplicaError::data(format!(
            "PCA needs at least two complete dates, got {} dates for {} symbols",
            panel.n_dates(),
            panel.n_symbols()
        )));
    }

    let rows = panel.rows();
    let matrix = DMatrix::from_fn(panel.n_dates(), panel.n_symbols(), |i, j| rows[i][j]);
    let pca = Pca::fit(&standardize(&matrix)?, settings.n_components)?;
    let loadings = ComponentLoadings::from_pca(panel.symbols().to_vec(), &pca)?;
    let weights = select_by_importance(&loadings, settings.n_stocks)?;

    info!(
        n_components = settings.n_components,
        n_stocks = settings.n_stocks,
        explained = pca.explained_variance_ratio().iter().sum::<f64>(),
        "PCA portfolio constructed"
    );

    let mut run = finish(PCA_METHOD, weights, &panel, benchmark, config)?;
    run.explained_variance_ratio = pca.explained_variance_ratio().to_vec();
    Ok(run)
}

/// Solves `problem` with `solver`, validates the weights and evaluates the
/// resulting portfolio on `returns`.
pub fn run_solver_method(
    returns: &ReturnTable,
    solver: &dyn WeightSolver,
    problem: &SolverProblem,
    benchmark: &ReturnSeries,
    tolerance: f64,
    config: &EvaluationConfig,
) -> ReplicaResult<MethodRun> {
    let raw = solver.solve(problem)?;
    let weights = from_solver_weights(&raw, problem.q(), tolerance)?;
    info!(method = solver.method(), q = problem.q(), "solver portfolio accepted");

    let panel = returns.filter_symbols(&weights.symbols()).to_panel();
    finish(solver.method(), weights, &panel, benchmark, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::equal_weight_benchmark;
    use crate::solver::build_problem;
    use approx::assert_relative_eq;

    fn prices(days: usize) -> PriceTable {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let symbols = ["AAA", "BBB", "CCC", "DDD", "EEE"];
        let mut points = Vec::new();
        for (k, symbol) in symbols.iter().enumerate() {
            let mut px = 100.0;
            for t in 0..days {
                let shock = ((t as f64) * (0.3 + 0.11 * k as f64)).sin() * 0.01
                    + ((t as f64) * 0.05).cos() * 0.004;
                px *= 1.0 + shock;
                points.push(PricePoint::new(start.add_days(t as i64), *symbol, px));
            }
        }
        PriceTable::from_points(points).unwrap()
    }

    struct EqualSolver;

    impl WeightSolver for EqualSolver {
        fn method(&self) -> &str {
            "AMPL"
        }

        fn solve(&self, problem: &SolverProblem) -> ReplicaResult<WeightVector> {
            let q = problem.q();
            WeightVector::new(
                problem
                    .symbols()
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (s.clone(), if i < q { 1.0 / q as f64 } else { 0.0 })),
            )
        }
    }

    #[test]
    fn test_pca_method_end_to_end() {
        let prices = prices(120);
        let table = compute_returns(&prices, ReturnKind::Simple).unwrap();
        let benchmark = equal_weight_benchmark(&table.to_panel()).unwrap();
        let settings = PcaSettings {
            n_components: 3,
            n_stocks: 2,
        };

        let run =
            run_pca_method(&prices, &benchmark, &settings, &EvaluationConfig::default()).unwrap();
        assert_eq!(run.method, "PCA");
        assert_eq!(run.weights.support_size(), 2);
        assert_relative_eq!(run.weights.sum(), 1.0, epsilon = 1e-9);
        assert_eq!(run.explained_variance_ratio.len(), 3);
        assert_eq!(run.summary.len(), 4);
        assert_eq!(run.portfolio.len(), 119);
        assert_eq!(run.rolling.len(), 119);
    }

    #[test]
    fn test_pca_method_rejects_too_many_components() {
        let prices = prices(30);
        let table = compute_returns(&prices, ReturnKind::Simple).unwrap();
        let benchmark = equal_weight_benchmark(&table.to_panel()).unwrap();
        let settings = PcaSettings {
            n_components: 10,
            n_stocks: 2,
        };
        assert!(
            run_pca_method(&prices, &benchmark, &settings, &EvaluationConfig::default()).is_err()
        );
    }

    #[test]
    fn test_solver_method_end_to_end() {
        let table = compute_returns(&prices(100), ReturnKind::Log).unwrap();
        let symbols = table.symbols();
        let problem = build_problem(&table, &symbols, 3).unwrap();
        let benchmark = ReturnSeries::new(
            problem.dates().to_vec(),
            problem.benchmark().to_vec(),
        )
        .unwrap();

        let run = run_solver_method(
            &table,
            &EqualSolver,
            &problem,
            &benchmark,
            1e-3,
            &EvaluationConfig::default(),
        )
        .unwrap();
        assert_eq!(run.method, "AMPL");
        assert_eq!(run.weights.len(), 3);
        assert!(run.explained_variance_ratio.is_empty());
        let m = run.summary.get(Horizon::ThreeMonths).unwrap();
        assert!(m.correlation > 0.0);
    }
}
