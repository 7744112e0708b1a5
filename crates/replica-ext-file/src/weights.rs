//! Weight files and optimizer output.

use std::path::{Path, PathBuf};

use replica_core::prelude::*;
use tracing::{debug, info};

use crate::csv_io::{create_writer, open_reader, parse_err, write_err};

/// Reads a two-column weights file: symbol first, weight second.
///
/// Header names are not checked, so optimizer exports such as
/// `index0,x.val` are accepted. Empty weights count as zero.
pub fn read_weights(path: impl AsRef<Path>) -> ReplicaResult<WeightVector> {
    let path = path.as_ref();
    let entries = read_pairs(path)?;
    WeightVector::new(entries)
}

fn read_pairs(path: &Path) -> ReplicaResult<Vec<(String, f64)>> {
    let mut reader = open_reader(path)?;
    let mut entries = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let (name, weight): (String, Option<f64>) =
            result.map_err(|e| parse_err(path, i + 2, e))?;
        entries.push((name, weight.filter(|w| !w.is_nan()).unwrap_or(0.0)));
    }
    Ok(entries)
}

/// Writes a `symbol,weight` file.
pub fn write_weights(path: impl AsRef<Path>, weights: &WeightVector) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer
        .write_record(["symbol", "weight"])
        .map_err(|e| write_err(path, e))?;
    for (symbol, weight) in weights.iter() {
        writer
            .write_record([symbol.to_string(), weight.to_string()])
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// A [`WeightSolver`] that reads the result of an optimizer run from disk.
///
/// The optimizer itself runs out of process on the data file written by
/// [`crate::ampl::write_ampl_data`]. Its output names instruments either by
/// symbol or by the 1-based column index used in that data file.
#[derive(Debug, Clone)]
pub struct SolverOutputFile {
    path: PathBuf,
    method: String,
}

impl SolverOutputFile {
    /// Output file at `path`, reported under the `AMPL` label.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_method(path, "AMPL")
    }

    /// Output file at `path`, reported under `method`.
    pub fn with_method(path: impl AsRef<Path>, method: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            method: method.into(),
        }
    }
}

fn resolve(name: &str, problem: &SolverProblem) -> ReplicaResult<Symbol> {
    if let Some(found) = problem.symbols().iter().find(|s| s.as_str() == name) {
        return Ok(found.clone());
    }
    match name.parse::<usize>() {
        Ok(idx) if (1..=problem.n_symbols()).contains(&idx) => {
            Ok(problem.symbols()[idx - 1].clone())
        }
        _ => Err(ReplicaError::data(format!(
            "solver output names unknown instrument '{name}'"
        ))),
    }
}

impl WeightSolver for SolverOutputFile {
    fn method(&self) -> &str {
        &self.method
    }

    fn solve(&self, problem: &SolverProblem) -> ReplicaResult<WeightVector> {
        let pairs = read_pairs(&self.path)?;
        let mut entries = Vec::with_capacity(pairs.len());
        for (name, weight) in pairs {
            let symbol = resolve(&name, problem)?;
            debug!(%name, %symbol, weight, "solver weight");
            entries.push((symbol, weight));
        }
        info!(path = %self.path.display(), entries = entries.len(), "solver output loaded");
        WeightVector::new(entries)
    }
}
