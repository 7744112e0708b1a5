//! AMPL data file for the cardinality-constrained tracking model.
//!
//! Layout:
//!
//! ```text
//! param N := 3;
//! param T := 2;
//! param q := 2;
//!
//! param benchmark :=
//! 1 0.001000
//! 2 -0.002000
//! ;
//!
//! param R : 1 2 3 :=
//! 1 0.010000 0.000000 -0.007000
//! 2 ...
//! ;
//! ```
//!
//! Periods and instruments are 1-based; instrument `i` is the `i`-th symbol of
//! the problem.

use std::fmt::Write as _;
use std::path::Path;

use replica_core::prelude::*;
use tracing::info;

/// Renders the data file contents.
#[must_use]
pub fn render_ampl_data(problem: &SolverProblem) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "param N := {};", problem.n_symbols());
    let _ = writeln!(out, "param T := {};", problem.n_periods());
    let _ = writeln!(out, "param q := {};\n", problem.q());

    out.push_str("param benchmark :=\n");
    for (t, value) in problem.benchmark().iter().enumerate() {
        let _ = writeln!(out, "{} {value:.6}", t + 1);
    }
    out.push_str(";\n\n");

    let header: Vec<String> = (1..=problem.n_symbols()).map(|i| i.to_string()).collect();
    let _ = writeln!(out, "param R : {} :=", header.join(" "));
    for (t, row) in problem.returns().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        let _ = writeln!(out, "{} {}", t + 1, cells.join(" "));
    }
    out.push_str(";\n");
    out
}

/// Writes the data file, creating parent directories.
pub fn write_ampl_data(path: impl AsRef<Path>, problem: &SolverProblem) -> ReplicaResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_ampl_data(problem))?;
    info!(
        path = %path.display(),
        n = problem.n_symbols(),
        t = problem.n_periods(),
        q = problem.q(),
        "AMPL data written"
    );
    Ok(())
}
