//! Descriptive statistics over return samples.
//!
//! Means and dispersions follow the sample conventions used throughout
//! portfolio analytics: the standard deviation divides by `n - 1` and is
//! `NaN` for fewer than two observations.

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

/// Arithmetic mean, `NaN` for an empty sample.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.mean()
}

/// Sample standard deviation (`n - 1` denominator).
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    values.std_dev()
}

/// Sample variance (`n - 1` denominator).
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    values.variance()
}

/// Sample covariance of two equally long series.
pub fn covariance(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Ok(f64::NAN);
    }
    Ok(x.covariance(y))
}

/// Pearson correlation of two equally long series.
///
/// Returns `NaN` when either series is constant or shorter than two points.
pub fn pearson(x: &[f64], y: &[f64]) -> MathResult<f64> {
    let cov = covariance(x, y)?;
    let denom = std_dev(x) * std_dev(y);
    if !denom.is_finite() || denom == 0.0 {
        return Ok(f64::NAN);
    }
    Ok((cov / denom).clamp(-1.0, 1.0))
}

/// Summary of a single sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

impl Summary {
    /// Summarizes `values`. Every statistic is `NaN` for an empty sample.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: mean(values),
            std_dev: std_dev(values),
            min: Statistics::min(values),
            max: Statistics::max(values),
        }
    }
}
