//! Shared CSV plumbing: opening readers and writers, header normalization,
//! and float cells.

use std::fs::File;
use std::path::Path;

use replica_core::{Date, ReplicaError, ReplicaResult};

pub(crate) fn open_reader(path: &Path) -> ReplicaResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReplicaError::io(format!("{}: {e}", path.display())))
}

pub(crate) fn create_writer(path: &Path) -> ReplicaResult<csv::Writer<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    csv::Writer::from_path(path).map_err(|e| ReplicaError::io(format!("{}: {e}", path.display())))
}

pub(crate) fn write_err(path: &Path, e: impl std::fmt::Display) -> ReplicaError {
    ReplicaError::io(format!("{}: {e}", path.display()))
}

pub(crate) fn parse_err(path: &Path, line: usize, e: impl std::fmt::Display) -> ReplicaError {
    ReplicaError::parse(format!("{} line {line}: {e}", path.display()))
}

/// Lower-cases the header row (dropping a UTF-8 BOM) so that record
/// structs match columns case-insensitively, and checks that every `required`
/// column is present. Returns the normalized header names.
pub(crate) fn normalize_headers(
    reader: &mut csv::Reader<File>,
    path: &Path,
    required: &[&str],
) -> ReplicaResult<Vec<String>> {
    let names: Vec<String> = reader
        .headers()
        .map_err(|e| parse_err(path, 1, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_ascii_lowercase())
        .collect();
    if let Some(missing) = required.iter().find(|r| !names.iter().any(|n| n == *r)) {
        return Err(ReplicaError::missing_column(*missing, path.display().to_string()));
    }
    reader.set_headers(csv::StringRecord::from(names.clone()));
    Ok(names)
}

/// Parses a date cell, ignoring any time suffix after `YYYY-MM-DD`.
pub(crate) fn parse_date(raw: &str) -> ReplicaResult<Date> {
    Date::parse(raw.get(..10).unwrap_or(raw))
}

/// Formats a float cell; `NaN` is written as an empty cell.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
