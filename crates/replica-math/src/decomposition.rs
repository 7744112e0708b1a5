//! Column standardization and principal component analysis.
//!
//! Samples are rows, features are columns. [`Pca::fit`] diagonalizes the
//! sample covariance matrix (`n - 1` denominator) with a symmetric
//! eigendecomposition and keeps the leading components.

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::debug;

use crate::error::{MathError, MathResult};

fn column_means(data: &DMatrix<f64>) -> Vec<f64> {
    let n = data.nrows() as f64;
    (0..data.ncols())
        .map(|j| data.column(j).iter().sum::<f64>() / n)
        .collect()
}

/// Scales every column to zero mean and unit population variance.
///
/// Constant columns are centered but not scaled.
pub fn standardize(data: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    if data.nrows() == 0 || data.ncols() == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("standardize"));
    }

    let n = data.nrows() as f64;
    let means = column_means(data);
    let scales: Vec<f64> = (0..data.ncols())
        .map(|j| {
            let var = data
                .column(j)
                .iter()
                .map(|v| (v - means[j]).powi(2))
                .sum::<f64>()
                / n;
            let sd = var.sqrt();
            if sd > 0.0 {
                sd
            } else {
                1.0
            }
        })
        .collect();

    Ok(DMatrix::from_fn(data.nrows(), data.ncols(), |i, j| {
        (data[(i, j)] - means[j]) / scales[j]
    }))
}

/// A fitted principal component analysis.
#[derive(Debug, Clone)]
pub struct Pca {
    means: Vec<f64>,
    /// n_features x n_components, one unit-length loading vector per column.
    components: DMatrix<f64>,
    explained_variance: Vec<f64>,
    explained_variance_ratio: Vec<f64>,
}

impl Pca {
    /// Fits `n_components` principal components to `data`.
    ///
    /// Each loading vector is oriented so that its largest-magnitude entry is
    /// positive.
    ///
    /// # Errors
    ///
    /// Fails with fewer than two samples, non-finite input, or when
    /// `n_components` is zero or exceeds `min(n_samples, n_features)`.
    pub fn fit(data: &DMatrix<f64>, n_components: usize) -> MathResult<Self> {
        let (n_samples, n_features) = data.shape();
        if n_samples < 2 {
            return Err(MathError::insufficient_data(2, n_samples));
        }
        let max_components = n_samples.min(n_features);
        if n_components == 0 || n_components > max_components {
            return Err(MathError::invalid_input(format!(
                "n_components must be between 1 and {max_components}, got {n_components}"
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(MathError::non_finite("PCA fit"));
        }

        let means = column_means(data);
        let centered = DMatrix::from_fn(n_samples, n_features, |i, j| data[(i, j)] - means[j]);
        let covariance = (centered.transpose() * &centered) / (n_samples as f64 - 1.0);
        let total_variance = covariance.trace();

        let eigen = SymmetricEigen::new(covariance);
        let mut order: Vec<usize> = (0..n_features).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

        let mut components = DMatrix::<f64>::zeros(n_features, n_components);
        let mut explained_variance = Vec::with_capacity(n_components);
        for (k, &idx) in order.iter().take(n_components).enumerate() {
            let vector = eigen.eigenvectors.column(idx);
            let pivot = vector
                .iter()
                .copied()
                .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
            let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
            for i in 0..n_features {
                components[(i, k)] = sign * vector[i];
            }
            explained_variance.push(eigen.eigenvalues[idx].max(0.0));
        }

        let explained_variance_ratio = if total_variance > 0.0 {
            explained_variance.iter().map(|v| v / total_variance).collect()
        } else {
            vec![0.0; n_components]
        };

        debug!(
            n_samples,
            n_features,
            n_components,
            explained = explained_variance_ratio.iter().sum::<f64>(),
            "PCA fitted"
        );

        Ok(Self {
            means,
            components,
            explained_variance,
            explained_variance_ratio,
        })
    }

    /// Number of retained components.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.components.ncols()
    }

    /// Number of input features.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.components.nrows()
    }

    /// Loadings, n_features x n_components.
    #[must_use]
    pub fn components(&self) -> &DMatrix<f64> {
        &self.components
    }

    /// Loading of `feature` on `component`.
    #[must_use]
    pub fn loading(&self, feature: usize, component: usize) -> f64 {
        self.components[(feature, component)]
    }

    /// Variance captured by each retained component.
    #[must_use]
    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    /// Share of the total variance captured by each retained component.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }

    /// Running total of [`Self::explained_variance_ratio`].
    #[must_use]
    pub fn cumulative_explained_variance(&self) -> Vec<f64> {
        self.explained_variance_ratio
            .iter()
            .scan(0.0, |acc, v| {
                *acc += v;
                Some(*acc)
            })
            .collect()
    }

    /// Projects samples onto the retained components.
    pub fn transform(&self, data: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
        if data.ncols() != self.n_features() {
            return Err(MathError::DimensionMismatch {
                rows1: data.nrows(),
                cols1: data.ncols(),
                rows2: self.n_features(),
                cols2: self.n_components(),
            });
        }
        let centered = DMatrix::from_fn(data.nrows(), data.ncols(), |i, j| {
            data[(i, j)] - self.means[j]
        });
        Ok(centered * &self.components)
    }
}
