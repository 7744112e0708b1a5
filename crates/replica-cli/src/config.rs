//! Pipeline configuration.

use std::path::{Path, PathBuf};

use replica_core::types::ReturnKind;
use replica_portfolio::prelude::{EvaluationConfig, PcaSettings};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CliError, CliResult};

/// File locations and method parameters shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Closing prices `{date, symbol, close}`
    #[serde(default = "default_prices_file")]
    pub prices_file: PathBuf,

    /// Per-symbol returns
    #[serde(default = "default_returns_file")]
    pub returns_file: PathBuf,

    /// Benchmark series `{date, benchmark_return}`
    #[serde(default = "default_benchmark_file")]
    pub benchmark_file: PathBuf,

    /// Weights reported by the external optimizer
    #[serde(default = "default_weights_file")]
    pub weights_file: PathBuf,

    /// AMPL data file handed to the optimizer
    #[serde(default = "default_solver_data_file")]
    pub solver_data_file: PathBuf,

    /// Directory for summaries, rolling metrics and portfolio series
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Return definition written by `replica returns`
    #[serde(default)]
    pub return_kind: ReturnKind,

    /// Principal components kept by the PCA method
    #[serde(default = "default_ten")]
    pub n_components: usize,

    /// Instruments selected by the PCA method
    #[serde(default = "default_ten")]
    pub n_stocks: usize,

    /// Instruments the optimizer must select
    #[serde(default = "default_ten")]
    pub q: usize,

    /// Annual risk-free rate for the Sharpe ratio
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Rolling window in trading days
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,

    /// Allowed deviation of optimizer weights from a unit sum
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
}

fn default_prices_file() -> PathBuf {
    PathBuf::from("data/raw/prices_full.csv")
}

fn default_returns_file() -> PathBuf {
    PathBuf::from("data/processed/returns.csv")
}

fn default_benchmark_file() -> PathBuf {
    PathBuf::from("data/processed/benchmark.csv")
}

fn default_weights_file() -> PathBuf {
    PathBuf::from("data/ampl/solver_weights.csv")
}

fn default_solver_data_file() -> PathBuf {
    PathBuf::from("data/ampl/sp100_tracking.dat")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("data/results")
}

fn default_ten() -> usize {
    10
}

fn default_risk_free_rate() -> f64 {
    0.02
}

fn default_rolling_window() -> usize {
    63
}

fn default_weight_tolerance() -> f64 {
    1e-3
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prices_file: default_prices_file(),
            returns_file: default_returns_file(),
            benchmark_file: default_benchmark_file(),
            weights_file: default_weights_file(),
            solver_data_file: default_solver_data_file(),
            results_dir: default_results_dir(),
            return_kind: ReturnKind::default(),
            n_components: default_ten(),
            n_stocks: default_ten(),
            q: default_ten(),
            risk_free_rate: default_risk_free_rate(),
            rolling_window: default_rolling_window(),
            weight_tolerance: default_weight_tolerance(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn load(path: &Path) -> CliResult<Self> {
        if path.exists() {
            info!(path = %path.display(), "loading configuration");
            Self::from_file(path)
        } else {
            info!("using default configuration");
            Ok(Self::default())
        }
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> CliResult<()> {
        if self.n_components == 0 || self.n_stocks == 0 || self.q == 0 {
            return Err(CliError::Config(
                "n_components, n_stocks and q must be positive".to_string(),
            ));
        }
        if self.rolling_window < 2 {
            return Err(CliError::Config(format!(
                "rolling_window must be at least 2, got {}",
                self.rolling_window
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(CliError::Config("risk_free_rate must be finite".to_string()));
        }
        if !(self.weight_tolerance.is_finite() && self.weight_tolerance >= 0.0) {
            return Err(CliError::Config(format!(
                "weight_tolerance must be non-negative, got {}",
                self.weight_tolerance
            )));
        }
        Ok(())
    }

    /// Evaluation parameters.
    pub fn evaluation(&self) -> EvaluationConfig {
        EvaluationConfig::default()
            .with_risk_free_rate(self.risk_free_rate)
            .with_rolling_window(self.rolling_window)
    }

    /// PCA parameters, with optional command-line overrides.
    pub fn pca(&self, n_components: Option<usize>, n_stocks: Option<usize>) -> PcaSettings {
        PcaSettings {
            n_components: n_components.unwrap_or(self.n_components),
            n_stocks: n_stocks.unwrap_or(self.n_stocks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.n_components, 10);
        assert_eq!(config.q, 10);
        assert_eq!(config.rolling_window, 63);
        assert_eq!(config.return_kind, ReturnKind::Log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("replica.toml");
        std::fs::write(&path, "n_stocks = 15\nreturn_kind = \"simple\"\n").unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.n_stocks, 15);
        assert_eq!(config.return_kind, ReturnKind::Simple);
        assert_eq!(config.results_dir, PathBuf::from("data/results"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("replica.toml");
        std::fs::write(&path, "q = 0\n").unwrap();
        assert!(PipelineConfig::load(&path).is_err());

        std::fs::write(&path, "unknown_key = 1\n").unwrap();
        assert!(PipelineConfig::load(&path).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig {
            n_components: 5,
            ..PipelineConfig::default()
        };
        let text = config.to_toml().unwrap();
        let parsed: PipelineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
