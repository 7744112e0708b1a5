//! Cross-method comparison of performance summaries.

use std::collections::BTreeMap;

use replica_core::prelude::*;
use tracing::info;

/// Pairs the metrics of two summaries for the 3M, 6M and 9M horizons.
///
/// The 1Y horizon is not compared, even when both summaries carry it.
///
/// # Errors
///
/// `ReplicaError::MissingHorizon` if either summary lacks one of the
/// compared horizons.
pub fn compare(a: &PerformanceSummary, b: &PerformanceSummary) -> ReplicaResult<ComparisonTable> {
    let mut horizons = BTreeMap::new();

    for horizon in Horizon::COMPARED {
        let ma = a
            .get(horizon)
            .ok_or_else(|| ReplicaError::missing_horizon(a.method(), horizon.label()))?;
        let mb = b
            .get(horizon)
            .ok_or_else(|| ReplicaError::missing_horizon(b.method(), horizon.label()))?;

        let metrics: BTreeMap<Metric, MethodPair> = Metric::ALL
            .iter()
            .map(|&metric| {
                (
                    metric,
                    MethodPair {
                        method_a: ma.get(metric),
                        method_b: mb.get(metric),
                    },
                )
            })
            .collect();
        horizons.insert(horizon, metrics);
    }

    info!(method_a = a.method(), method_b = b.method(), "methods compared");
    Ok(ComparisonTable {
        method_a: a.method().to_string(),
        method_b: b.method().to_string(),
        horizons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn metrics(base: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            correlation: base,
            tracking_error: base / 10.0,
            information_ratio: -base,
            sharpe_ratio: base * 2.0,
        }
    }

    fn full(method: &str, base: f64) -> PerformanceSummary {
        Horizon::ALL
            .iter()
            .fold(PerformanceSummary::new(method), |s, h| s.with(*h, metrics(base)))
    }

    #[test]
    fn test_compare_excludes_one_year() {
        let table = compare(&full("PCA", 0.9), &full("AMPL", 0.95)).unwrap();
        let horizons: Vec<Horizon> = table.horizons.keys().copied().collect();
        assert_eq!(horizons, Horizon::COMPARED.to_vec());
        assert!(table.get(Horizon::OneYear, Metric::Correlation).is_none());
        assert_eq!(table.rows().len(), 12);
    }

    #[test]
    fn test_compare_values_and_difference() {
        let table = compare(&full("PCA", 0.9), &full("AMPL", 0.95)).unwrap();
        let pair = table.get(Horizon::SixMonths, Metric::Correlation).unwrap();
        assert_relative_eq!(pair.method_a, 0.9);
        assert_relative_eq!(pair.method_b, 0.95);
        assert_relative_eq!(
            table
                .difference(Horizon::SixMonths, Metric::SharpeRatio)
                .unwrap(),
            -0.1,
            epsilon = 1e-12
        );
        assert_eq!(table.method_a, "PCA");
        assert_eq!(table.method_b, "AMPL");
    }

    #[test]
    fn test_missing_horizon_is_comparison_error() {
        let partial = PerformanceSummary::new("AMPL")
            .with(Horizon::ThreeMonths, metrics(0.9))
            .with(Horizon::OneYear, metrics(0.9));
        let err = compare(&full("PCA", 0.9), &partial).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Comparison);
        assert!(err.to_string().contains("6M"));
    }
}
