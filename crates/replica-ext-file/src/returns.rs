//! Return tables and return series files.

use std::path::Path;

use replica_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::csv_io::{
    create_writer, format_float, normalize_headers, open_reader, parse_date, parse_err, write_err,
};

/// One row of a returns file. The value column is `log_return` or `return`.
#[derive(Debug, Deserialize)]
struct ReturnRecord {
    date: String,
    symbol: String,
    close: Option<f64>,
    #[serde(rename = "log_return", alias = "return")]
    value: Option<f64>,
}

/// Reads a `date,symbol,close,<value>` file where the value column is
/// `log_return` (log returns) or `return` (simple returns).
///
/// The `close` column is optional.
pub fn read_returns(path: impl AsRef<Path>) -> ReplicaResult<ReturnTable> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    let headers = normalize_headers(&mut reader, path, &["date", "symbol"])?;
    let kind = [ReturnKind::Log, ReturnKind::Simple]
        .into_iter()
        .find(|k| headers.iter().any(|h| h == k.column_name()))
        .ok_or_else(|| {
            ReplicaError::missing_column(ReturnKind::Log.column_name(), path.display().to_string())
        })?;

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let line = i + 2;
        let record: ReturnRecord = result.map_err(|e| parse_err(path, line, e))?;
        let Some(value) = record.value.filter(|v| !v.is_nan()) else {
            continue;
        };
        rows.push(ReturnObservation {
            date: parse_date(&record.date).map_err(|e| parse_err(path, line, e))?,
            symbol: Symbol::from(record.symbol),
            close: record.close.unwrap_or(f64::NAN),
            value,
        });
    }

    let table = ReturnTable::new(kind, rows);
    info!(path = %path.display(), rows = table.len(), %kind, "returns loaded");
    Ok(table)
}

/// Writes a `date,symbol,close,<value>` file.
pub fn write_returns(path: impl AsRef<Path>, table: &ReturnTable) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer
        .write_record(["date", "symbol", "close", table.kind().column_name()])
        .map_err(|e| write_err(path, e))?;
    for row in table.rows() {
        writer
            .write_record([
                row.date.to_string(),
                row.symbol.to_string(),
                format_float(row.close),
                row.value.to_string(),
            ])
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = table.len(), "returns written");
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct BenchmarkRecord {
    date: String,
    benchmark_return: f64,
}

/// Reads a `date,benchmark_return` file.
pub fn read_benchmark(path: impl AsRef<Path>) -> ReplicaResult<ReturnSeries> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    normalize_headers(&mut reader, path, &["date", "benchmark_return"])?;
    let mut points = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: BenchmarkRecord = result.map_err(|e| parse_err(path, i + 2, e))?;
        points.push((parse_date(&record.date)?, record.benchmark_return));
    }
    ReturnSeries::from_points(points)
}

/// Writes a `date,benchmark_return` file.
pub fn write_benchmark(path: impl AsRef<Path>, series: &ReturnSeries) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    for (date, value) in series.iter() {
        writer
            .serialize(BenchmarkRecord {
                date: date.to_string(),
                benchmark_return: value,
            })
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a portfolio series as `date,return,cumulative`, where
/// `cumulative` is the growth of one unit.
pub fn write_portfolio_series(path: impl AsRef<Path>, series: &ReturnSeries) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer
        .write_record(["date", "return", "cumulative"])
        .map_err(|e| write_err(path, e))?;
    for ((date, value), growth) in series.iter().zip(series.cumulative()) {
        writer
            .write_record([date.to_string(), value.to_string(), growth.to_string()])
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}
