//! Tracking performance evaluation.
//!
//! A portfolio return series is scored against a benchmark over the trailing
//! [`Horizon`] windows:
//!
//! - **Correlation**: Pearson correlation of the two series
//! - **Tracking error**: annualized sample standard deviation of the excess
//!   return `portfolio - benchmark`
//! - **Information ratio**: annualized mean excess over tracking error, 0 when
//!   the tracking error is not strictly positive
//! - **Sharpe ratio**: the latest trailing-window Sharpe ratio of the
//!   portfolio over the risk-free rate

use replica_core::prelude::*;
use replica_math::rolling::{rolling_correlation, rolling_mean, rolling_std};
use replica_math::statistics::{mean, pearson, std_dev};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Parameters shared by every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Annual risk-free rate used by the Sharpe ratio.
    pub risk_free_rate: f64,
    /// Trailing window for rolling statistics and the Sharpe ratio.
    pub rolling_window: usize,
    /// Periods per year used for annualization.
    pub periods_per_year: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            rolling_window: 63,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl EvaluationConfig {
    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the rolling window.
    #[must_use]
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    fn periods(&self) -> f64 {
        self.periods_per_year as f64
    }

    fn validate(&self) -> ReplicaResult<()> {
        if self.rolling_window == 0 || self.periods_per_year == 0 {
            return Err(ReplicaError::validation(
                "rolling window and periods per year must be positive",
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ReplicaError::validation("risk-free rate must be finite"));
        }
        Ok(())
    }
}

fn information_ratio(mean_excess: f64, tracking_error: f64, periods: f64) -> f64 {
    if tracking_error > 0.0 {
        mean_excess * periods / tracking_error
    } else {
        0.0
    }
}

fn sharpe_of_window(window: &[f64], config: &EvaluationConfig) -> f64 {
    let periods = config.periods();
    let daily_rf = config.risk_free_rate / periods;
    let excess: Vec<f64> = window.iter().map(|r| r - daily_rf).collect();
    let volatility = std_dev(&excess) * periods.sqrt();
    if volatility > 0.0 {
        mean(&excess) * periods / volatility
    } else {
        f64::NAN
    }
}

/// Sharpe ratio over the trailing `rolling_window` points of `returns`.
///
/// `NaN` when fewer than `rolling_window` points exist or the window has no
/// dispersion.
#[must_use]
pub fn sharpe_ratio(returns: &[f64], config: &EvaluationConfig) -> f64 {
    let window = config.rolling_window;
    if window == 0 || returns.len() < window {
        return f64::NAN;
    }
    sharpe_of_window(&returns[returns.len() - window..], config)
}

/// Rolling Sharpe ratio, one value per input point.
pub fn rolling_sharpe(series: &ReturnSeries, config: &EvaluationConfig) -> ReplicaResult<Vec<f64>> {
    config.validate()?;
    let window = config.rolling_window;
    let values = series.values();
    Ok((0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                sharpe_of_window(&values[i + 1 - window..=i], config)
            }
        })
        .collect())
}

fn horizon_metrics(
    portfolio: &[f64],
    benchmark: &[f64],
    config: &EvaluationConfig,
) -> ReplicaResult<PerformanceMetrics> {
    let periods = config.periods();
    let excess: Vec<f64> = portfolio
        .iter()
        .zip(benchmark)
        .map(|(p, b)| p - b)
        .collect();
    let tracking_error = std_dev(&excess) * periods.sqrt();

    Ok(PerformanceMetrics {
        correlation: pearson(portfolio, benchmark)?,
        tracking_error,
        information_ratio: information_ratio(mean(&excess), tracking_error, periods),
        sharpe_ratio: sharpe_ratio(portfolio, config),
    })
}

fn aligned(portfolio: &ReturnSeries, benchmark: &ReturnSeries) -> ReplicaResult<AlignedPair> {
    let pair = portfolio.align(benchmark);
    if pair.is_empty() {
        return Err(ReplicaError::EmptyAlignment);
    }
    Ok(pair)
}

/// Scores `portfolio` against `benchmark` over every [`Horizon`].
///
/// Both series are restricted to their common dates. A horizon longer than
/// the aligned history uses all of it.
///
/// # Errors
///
/// `ReplicaError::EmptyAlignment` if the series share no dates.
pub fn evaluate(
    method: &str,
    portfolio: &ReturnSeries,
    benchmark: &ReturnSeries,
    config: &EvaluationConfig,
) -> ReplicaResult<PerformanceSummary> {
    config.validate()?;
    let pair = aligned(portfolio, benchmark)?;

    let mut summary = PerformanceSummary::new(method);
    for horizon in Horizon::ALL {
        let start = pair.len().saturating_sub(horizon.trading_days());
        let metrics = horizon_metrics(&pair.left[start..], &pair.right[start..], config)?;
        debug!(
            method,
            %horizon,
            points = pair.len() - start,
            correlation = metrics.correlation,
            tracking_error = metrics.tracking_error,
            "horizon evaluated"
        );
        summary.insert(horizon, metrics);
    }

    info!(method, aligned = pair.len(), "performance evaluated");
    Ok(summary)
}

/// Trailing-window correlation, tracking error and information ratio over
/// the whole aligned history.
///
/// The first `rolling_window - 1` values of each series are `NaN`.
pub fn rolling_metrics(
    portfolio: &ReturnSeries,
    benchmark: &ReturnSeries,
    config: &EvaluationConfig,
) -> ReplicaResult<RollingMetrics> {
    config.validate()?;
    let pair = aligned(portfolio, benchmark)?;
    let window = config.rolling_window;
    let periods = config.periods();

    let excess: Vec<f64> = pair.left.iter().zip(&pair.right).map(|(p, b)| p - b).collect();
    let correlation = rolling_correlation(&pair.left, &pair.right, window)?;
    let tracking_error: Vec<f64> = rolling_std(&excess, window)?
        .into_iter()
        .map(|sd| sd * periods.sqrt())
        .collect();
    let information_ratio = rolling_mean(&excess, window)?
        .into_iter()
        .zip(&tracking_error)
        .map(|(m, te)| {
            if m.is_nan() {
                f64::NAN
            } else {
                information_ratio(m, *te, periods)
            }
        })
        .collect();

    Ok(RollingMetrics {
        window,
        dates: pair.dates,
        correlation,
        tracking_error,
        information_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> ReturnSeries {
        let start = Date::from_ymd(2023, 1, 2).unwrap();
        let dates = (0..values.len())
            .map(|i| start.add_days(i as i64))
            .collect();
        ReturnSeries::new(dates, values.to_vec()).unwrap()
    }

    fn wave(n: usize, phase: f64, scale: f64) -> Vec<f64> {
        (0..n)
            .map(|i| scale * ((i as f64) * 0.37 + phase).sin())
            .collect()
    }

    #[test]
    fn test_identical_series() {
        let s = series(&wave(300, 0.0, 0.01));
        let summary = evaluate("SELF", &s, &s, &EvaluationConfig::default()).unwrap();
        assert_eq!(summary.len(), 4);
        for (_, m) in summary.horizons() {
            assert_relative_eq!(m.correlation, 1.0, epsilon = 1e-9);
            assert_relative_eq!(m.tracking_error, 0.0);
            assert_relative_eq!(m.information_ratio, 0.0);
        }
    }

    #[test]
    fn test_three_day_identical_series() {
        let s = series(&[0.01, -0.02, 0.005]);
        let summary = evaluate("X", &s, &s, &EvaluationConfig::default()).unwrap();
        let m = summary.get(Horizon::ThreeMonths).unwrap();
        assert_relative_eq!(m.correlation, 1.0, epsilon = 1e-12);
        assert!(m.sharpe_ratio.is_nan());
    }

    #[test]
    fn test_short_series_uses_all_data() {
        let p = series(&wave(40, 0.0, 0.01));
        let b = series(&wave(40, 0.3, 0.01));
        let summary = evaluate("PCA", &p, &b, &EvaluationConfig::default()).unwrap();
        let short = summary.get(Horizon::ThreeMonths).unwrap();
        let long = summary.get(Horizon::OneYear).unwrap();
        assert_eq!(short.correlation, long.correlation);
        assert_eq!(short.tracking_error, long.tracking_error);
        assert_eq!(short.information_ratio, long.information_ratio);
        // fewer points than the Sharpe window
        assert!(short.sharpe_ratio.is_nan() && long.sharpe_ratio.is_nan());
    }

    #[test]
    fn test_tracking_error_and_information_ratio() {
        let b = wave(100, 0.0, 0.01);
        let excess = wave(100, 1.0, 0.002);
        let p: Vec<f64> = b.iter().zip(&excess).map(|(x, e)| x + e + 0.0005).collect();
        let summary =
            evaluate("A", &series(&p), &series(&b), &EvaluationConfig::default()).unwrap();
        let m = summary.get(Horizon::ThreeMonths).unwrap();

        let tail: Vec<f64> = p[37..].iter().zip(&b[37..]).map(|(x, y)| x - y).collect();
        let te = std_dev(&tail) * 252f64.sqrt();
        assert_relative_eq!(m.tracking_error, te, epsilon = 1e-12);
        assert_relative_eq!(m.information_ratio, mean(&tail) * 252.0 / te, epsilon = 1e-9);
    }

    #[test]
    fn test_sharpe_uses_trailing_window() {
        let values = wave(80, 0.2, 0.01);
        let config = EvaluationConfig::default();
        let expected = sharpe_ratio(&values[17..], &config);
        assert_relative_eq!(sharpe_ratio(&values, &config), expected, epsilon = 1e-12);
        assert!(sharpe_ratio(&values[..62], &config).is_nan());
    }

    #[test]
    fn test_disjoint_series_fail() {
        let a = series(&[0.01, 0.02]);
        let later = Date::from_ymd(2030, 1, 1).unwrap();
        let b = ReturnSeries::new(vec![later], vec![0.01]).unwrap();
        let err = evaluate("A", &a, &b, &EvaluationConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_rolling_metrics_warmup() {
        let p = series(&wave(70, 0.0, 0.01));
        let b = series(&wave(70, 0.5, 0.01));
        let rolling = rolling_metrics(&p, &b, &EvaluationConfig::default()).unwrap();
        assert_eq!(rolling.len(), 70);
        assert!(rolling.correlation[..62].iter().all(|v| v.is_nan()));
        assert!(rolling.information_ratio[..62].iter().all(|v| v.is_nan()));
        assert!(rolling.correlation[62..].iter().all(|v| !v.is_nan()));
        assert!(rolling.tracking_error[69] > 0.0);
    }

    #[test]
    fn test_rolling_information_ratio_zero_tracking_error() {
        let s = series(&wave(70, 0.0, 0.01));
        let rolling = rolling_metrics(&s, &s, &EvaluationConfig::default()).unwrap();
        assert_relative_eq!(rolling.information_ratio[69], 0.0);
    }

    #[test]
    fn test_rolling_sharpe_last_matches_point_sharpe() {
        let values = wave(90, 0.1, 0.01);
        let config = EvaluationConfig::default().with_rolling_window(20);
        let rolled = rolling_sharpe(&series(&values), &config).unwrap();
        assert_eq!(rolled.len(), 90);
        assert!(rolled[18].is_nan());
        assert_relative_eq!(rolled[89], sharpe_ratio(&values, &config), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_config() {
        let s = series(&[0.01, 0.02]);
        let config = EvaluationConfig::default().with_rolling_window(0);
        assert!(evaluate("A", &s, &s, &config).is_err());
    }
}
