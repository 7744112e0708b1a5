//! Performance summary, comparison and rolling-metric files.

use std::path::{Path, PathBuf};

use replica_core::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::csv_io::{
    create_writer, format_float, normalize_headers, open_reader, parse_err, write_err,
};

/// One horizon row of a summary file. The horizon label sits under an empty
/// header; blank metric cells are undefined values.
#[derive(Debug, Deserialize)]
struct SummaryRecord {
    #[serde(rename = "", alias = "horizon")]
    horizon: String,
    correlation: Option<f64>,
    tracking_error: Option<f64>,
    information_ratio: Option<f64>,
    sharpe_ratio: Option<f64>,
}

impl SummaryRecord {
    fn metrics(&self) -> PerformanceMetrics {
        let value = |v: Option<f64>| v.unwrap_or(f64::NAN);
        PerformanceMetrics {
            correlation: value(self.correlation),
            tracking_error: value(self.tracking_error),
            information_ratio: value(self.information_ratio),
            sharpe_ratio: value(self.sharpe_ratio),
        }
    }
}

/// File name of the comparison table inside a results directory.
pub const COMPARISON_FILE: &str = "method_comparison.csv";

/// Writes a summary with one row per horizon: the horizon label, then the
/// four metric columns.
pub fn write_summary(path: impl AsRef<Path>, summary: &PerformanceSummary) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    let mut header = vec![""];
    header.extend(Metric::ALL.iter().map(Metric::key));
    writer.write_record(&header).map_err(|e| write_err(path, e))?;

    for (horizon, metrics) in summary.horizons() {
        let mut record = vec![horizon.label().to_string()];
        record.extend(Metric::ALL.iter().map(|m| format_float(metrics.get(*m))));
        writer.write_record(&record).map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a summary written by [`write_summary`] and labels it `method`.
pub fn read_summary(path: impl AsRef<Path>, method: &str) -> ReplicaResult<PerformanceSummary> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    let required: Vec<&str> = Metric::ALL.iter().map(Metric::key).collect();
    normalize_headers(&mut reader, path, &required)?;

    let mut summary = PerformanceSummary::new(method);
    for (i, result) in reader.deserialize().enumerate() {
        let line = i + 2;
        let record: SummaryRecord = result.map_err(|e| parse_err(path, line, e))?;
        let horizon: Horizon = record
            .horizon
            .parse()
            .map_err(|e| parse_err(path, line, e))?;
        summary.insert(horizon, record.metrics());
    }
    Ok(summary)
}

/// A [`SummaryStore`] keeping one `<method>_performance.csv` per method in a
/// results directory. Method names are lower-cased in file names.
#[derive(Debug, Clone)]
pub struct FileSummaryStore {
    dir: PathBuf,
}

impl FileSummaryStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Results directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the summary file for `method`.
    #[must_use]
    pub fn path_for(&self, method: &str) -> PathBuf {
        self.dir
            .join(format!("{}_performance.csv", method.to_lowercase()))
    }
}

impl SummaryStore for FileSummaryStore {
    fn save(&self, summary: &PerformanceSummary) -> ReplicaResult<()> {
        let path = self.path_for(summary.method());
        write_summary(&path, summary)?;
        info!(method = summary.method(), path = %path.display(), "performance summary saved");
        Ok(())
    }

    fn load(&self, method: &str) -> ReplicaResult<Option<PerformanceSummary>> {
        let path = self.path_for(method);
        if !path.exists() {
            warn!(method, path = %path.display(), "performance summary not found");
            return Ok(None);
        }
        read_summary(&path, method).map(Some)
    }
}

/// Writes a comparison as `horizon,metric,<method_a>,<method_b>,difference`.
pub fn write_comparison(path: impl AsRef<Path>, table: &ComparisonTable) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer
        .write_record([
            "horizon",
            "metric",
            table.method_a.as_str(),
            table.method_b.as_str(),
            "difference",
        ])
        .map_err(|e| write_err(path, e))?;
    for row in table.rows() {
        writer
            .write_record([
                row.horizon.label().to_string(),
                row.metric.key().to_string(),
                format_float(row.method_a),
                format_float(row.method_b),
                format_float(row.difference),
            ])
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes rolling metrics as `date,correlation,tracking_error,information_ratio`.
pub fn write_rolling(path: impl AsRef<Path>, rolling: &RollingMetrics) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer
        .write_record(["date", "correlation", "tracking_error", "information_ratio"])
        .map_err(|e| write_err(path, e))?;
    for i in 0..rolling.len() {
        writer
            .write_record([
                rolling.dates[i].to_string(),
                format_float(rolling.correlation[i]),
                format_float(rolling.tracking_error[i]),
                format_float(rolling.information_ratio[i]),
            ])
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}
