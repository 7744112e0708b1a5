//! Trailing-window statistics.
//!
//! A window of size `w` ending at index `i` covers `values[i + 1 - w..=i]`.
//! The first `w - 1` outputs are `NaN`, so every output vector has the same
//! length as its input and index `i` lines up with the input date at `i`.

use crate::error::{MathError, MathResult};
use crate::statistics;

fn check_window(window: usize) -> MathResult<()> {
    if window == 0 {
        return Err(MathError::invalid_input("rolling window must be positive"));
    }
    Ok(())
}

/// Applies `f` to every full trailing window of `values`.
pub fn rolling_apply<F>(values: &[f64], window: usize, f: F) -> MathResult<Vec<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    check_window(window)?;
    Ok((0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                f(&values[i + 1 - window..=i])
            }
        })
        .collect())
}

/// Applies `f` to every full trailing window of two aligned series.
pub fn rolling_apply_pair<F>(x: &[f64], y: &[f64], window: usize, f: F) -> MathResult<Vec<f64>>
where
    F: Fn(&[f64], &[f64]) -> MathResult<f64>,
{
    check_window(window)?;
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    (0..x.len())
        .map(|i| {
            if i + 1 < window {
                Ok(f64::NAN)
            } else {
                let range = i + 1 - window..=i;
                f(&x[range.clone()], &y[range])
            }
        })
        .collect()
}

/// Trailing mean.
pub fn rolling_mean(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    rolling_apply(values, window, statistics::mean)
}

/// Trailing sample standard deviation.
pub fn rolling_std(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    rolling_apply(values, window, statistics::std_dev)
}

/// Trailing Pearson correlation.
pub fn rolling_correlation(x: &[f64], y: &[f64], window: usize) -> MathResult<Vec<f64>> {
    rolling_apply_pair(x, y, window, statistics::pearson)
}

/// Last non-`NaN` value.
#[must_use]
pub fn last_valid(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_warmup_is_nan() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_relative_eq!(out[2], 2.0);
        assert_relative_eq!(out[3], 3.0);
    }

    #[test]
    fn test_window_longer_than_series() {
        let out = rolling_std(&[1.0, 2.0], 5).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
        assert_eq!(last_valid(&out), None);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(rolling_mean(&[1.0], 0).is_err());
    }

    #[test]
    fn test_rolling_correlation() {
        let x = [0.01, 0.02, -0.01, 0.03, 0.0];
        let y = [0.02, 0.04, -0.02, 0.06, 0.0];
        let out = rolling_correlation(&x, &y, 3).unwrap();
        assert!(out[1].is_nan());
        for v in &out[2..] {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
        assert!(rolling_correlation(&x, &y[..4], 3).is_err());
    }

    #[test]
    fn test_last_valid() {
        assert_eq!(last_valid(&[f64::NAN, 1.0, 2.0, f64::NAN]), Some(2.0));
    }
}
