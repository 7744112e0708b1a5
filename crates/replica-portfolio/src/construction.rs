//! Sparse portfolio construction.
//!
//! Two strategies produce a final [`WeightVector`]:
//!
//! - [`from_solver_weights`]: validates the raw output of an external
//!   cardinality-constrained optimizer
//! - [`select_by_importance`]: ranks symbols by their factor loadings weighted
//!   by component importance and keeps the top `n_stocks`
//!
//! Both return weights that sum to one and have exactly the requested support.

use nalgebra::DMatrix;
use replica_core::prelude::*;
use replica_math::decomposition::Pca;
use tracing::debug;

/// Weights at or below this value are treated as outside the support.
pub const SUPPORT_EPSILON: f64 = 1e-9;

/// Validates optimizer output and renormalizes it to sum to exactly one.
///
/// # Arguments
///
/// * `raw` - Weights as reported by the optimizer
/// * `q` - Required number of held instruments
/// * `tolerance` - Allowed deviation of the raw sum from 1.0
///
/// # Errors
///
/// `ReplicaError::SupportSize` if the number of weights above
/// [`SUPPORT_EPSILON`] differs from `q`, `ReplicaError::Validation` if the
/// sum is outside `1 +/- tolerance`.
pub fn from_solver_weights(
    raw: &WeightVector,
    q: usize,
    tolerance: f64,
) -> ReplicaResult<WeightVector> {
    let held: Vec<(Symbol, f64)> = raw
        .iter()
        .filter(|(_, w)| *w > SUPPORT_EPSILON)
        .map(|(s, w)| (s.clone(), w))
        .collect();

    if held.len() != q {
        return Err(ReplicaError::SupportSize {
            expected: q,
            actual: held.len(),
        });
    }

    let sum: f64 = held.iter().map(|(_, w)| w).sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(ReplicaError::validation(format!(
            "solver weights sum to {sum:.6}, outside 1 +/- {tolerance}"
        )));
    }

    debug!(q, sum, dropped = raw.len() - held.len(), "solver weights accepted");
    WeightVector::new(held)?.normalized()
}

/// Factor loadings of each symbol together with per-component importance.
#[derive(Debug, Clone)]
pub struct ComponentLoadings {
    symbols: Vec<Symbol>,
    /// n_symbols x n_components.
    loadings: DMatrix<f64>,
    importance: Vec<f64>,
}

impl ComponentLoadings {
    /// Bundles explicit loadings.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::Data` if `loadings` is not
    /// `symbols.len() x importance.len()`.
    pub fn new(
        symbols: Vec<Symbol>,
        loadings: DMatrix<f64>,
        importance: Vec<f64>,
    ) -> ReplicaResult<Self> {
        if loadings.nrows() != symbols.len() || loadings.ncols() != importance.len() {
            return Err(ReplicaError::data(format!(
                "loadings are {}x{}, expected {}x{}",
                loadings.nrows(),
                loadings.ncols(),
                symbols.len(),
                importance.len()
            )));
        }
        Ok(Self {
            symbols,
            loadings,
            importance,
        })
    }

    /// Uses a fitted PCA's loadings and explained-variance ratios.
    pub fn from_pca(symbols: Vec<Symbol>, pca: &Pca) -> ReplicaResult<Self> {
        Self::new(
            symbols,
            pca.components().clone(),
            pca.explained_variance_ratio().to_vec(),
        )
    }

    /// Symbols in loading-row order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Per-component importance.
    #[must_use]
    pub fn importance(&self) -> &[f64] {
        &self.importance
    }

    /// `score[s] = sum_k |loading[s, k]| * importance[k]`.
    #[must_use]
    pub fn importance_scores(&self) -> Vec<f64> {
        (0..self.symbols.len())
            .map(|i| {
                self.importance
                    .iter()
                    .enumerate()
                    .map(|(k, imp)| self.loadings[(i, k)].abs() * imp)
                    .sum()
            })
            .collect()
    }
}

/// Keeps the `n_stocks` symbols with the highest importance scores, weighted
/// in proportion to their scores.
///
/// Ties keep the original symbol order.
///
/// # Errors
///
/// `ReplicaError::Validation` if `n_stocks` is zero or exceeds the number of
/// symbols, or if any selected symbol has a score at or below
/// [`SUPPORT_EPSILON`] (for example a symbol whose standardized returns are
/// all zero), since it would fall out of the support.
pub fn select_by_importance(
    loadings: &ComponentLoadings,
    n_stocks: usize,
) -> ReplicaResult<WeightVector> {
    let n = loadings.symbols().len();
    if n_stocks == 0 || n_stocks > n {
        return Err(ReplicaError::validation(format!(
            "n_stocks must be between 1 and {n}, got {n_stocks}"
        )));
    }

    let scores = loadings.importance_scores();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(n_stocks);

    if let Some(&i) = order
        .iter()
        .find(|&&i| scores[i].is_nan() || scores[i] <= SUPPORT_EPSILON)
    {
        return Err(ReplicaError::validation(format!(
            "cannot select {n_stocks} stocks: '{}' has no factor exposure",
            loadings.symbols()[i]
        )));
    }

    let total: f64 = order.iter().map(|&i| scores[i]).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ReplicaError::validation(
            "selected importance scores sum to zero",
        ));
    }

    debug!(n_stocks, total, "importance selection");
    WeightVector::new(
        order
            .into_iter()
            .map(|i| (loadings.symbols()[i].clone(), scores[i] / total)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn symbols(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|s| Symbol::from(*s)).collect()
    }

    #[test]
    fn test_solver_passthrough_drops_dust_and_renormalizes() {
        let raw = WeightVector::new(vec![
            ("A", 0.5002),
            ("B", 0.4999),
            ("C", 1e-12),
            ("D", 0.0),
        ])
        .unwrap();
        let w = from_solver_weights(&raw, 2, 1e-3).unwrap();
        assert_eq!(w.len(), 2);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
        assert!(w.get("C").is_none());
    }

    #[test]
    fn test_solver_passthrough_support_mismatch() {
        let raw = WeightVector::new(vec![("A", 0.5), ("B", 0.5)]).unwrap();
        let err = from_solver_weights(&raw, 3, 1e-3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            ReplicaError::SupportSize {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_solver_passthrough_sum_out_of_tolerance() {
        let raw = WeightVector::new(vec![("A", 0.6), ("B", 0.6)]).unwrap();
        let err = from_solver_weights(&raw, 2, 1e-3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_importance_scores() {
        let loadings = ComponentLoadings::new(
            symbols(&["A", "B"]),
            DMatrix::from_row_slice(2, 2, &[0.6, -0.8, -0.8, 0.6]),
            vec![0.7, 0.3],
        )
        .unwrap();
        let scores = loadings.importance_scores();
        assert_relative_eq!(scores[0], 0.6 * 0.7 + 0.8 * 0.3, epsilon = 1e-12);
        assert_relative_eq!(scores[1], 0.8 * 0.7 + 0.6 * 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_select_top_n_normalized() {
        let loadings = ComponentLoadings::new(
            symbols(&["A", "B", "C", "D"]),
            DMatrix::from_column_slice(4, 1, &[0.1, 0.4, 0.2, 0.3]),
            vec![1.0],
        )
        .unwrap();
        let w = select_by_importance(&loadings, 2).unwrap();
        assert_eq!(w.symbols(), symbols(&["B", "D"]));
        assert_relative_eq!(w.get("B").unwrap(), 4.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ties_keep_symbol_order() {
        let loadings = ComponentLoadings::new(
            symbols(&["X", "Y", "Z"]),
            DMatrix::from_column_slice(3, 1, &[0.5, 0.5, 0.5]),
            vec![1.0],
        )
        .unwrap();
        let w = select_by_importance(&loadings, 2).unwrap();
        assert_eq!(w.symbols(), symbols(&["X", "Y"]));
    }

    #[test]
    fn test_select_rejects_bad_counts() {
        let loadings = ComponentLoadings::new(
            symbols(&["A", "B"]),
            DMatrix::from_column_slice(2, 1, &[0.0, 0.0]),
            vec![1.0],
        )
        .unwrap();
        assert!(select_by_importance(&loadings, 0).is_err());
        assert!(select_by_importance(&loadings, 3).is_err());
        // all scores are zero
        assert!(select_by_importance(&loadings, 1).is_err());
    }

    #[test]
    fn test_select_rejects_symbol_without_exposure() {
        let loadings = ComponentLoadings::new(
            symbols(&["AAA", "BBB", "CCC"]),
            DMatrix::from_row_slice(3, 2, &[0.7, 0.1, -0.7, 0.1, 0.0, 0.0]),
            vec![0.8, 0.2],
        )
        .unwrap();
        let err = select_by_importance(&loadings, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("CCC"));

        let w = select_by_importance(&loadings, 2).unwrap();
        assert_eq!(w.support_size(), 2);
        assert!(w.get("CCC").is_none());
    }

    #[test]
    fn test_loadings_shape_checked() {
        let err = ComponentLoadings::new(symbols(&["A"]), DMatrix::zeros(2, 1), vec![1.0]);
        assert!(err.is_err());
    }
}
