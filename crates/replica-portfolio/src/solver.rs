//! Assembly of sparse-tracking problems for an external optimizer.

use replica_core::prelude::*;
use tracing::info;

/// Builds the optimizer input from the returns of the selected symbols.
///
/// Symbols and dates are sorted, missing cells become zero returns, and the
/// benchmark is the equal-weighted mean of each row.
///
/// # Errors
///
/// `ReplicaError::Data` if none of `selected` has returns and
/// `ReplicaError::Validation` if `q` is zero or exceeds the number of symbols
/// found.
pub fn build_problem(
    table: &ReturnTable,
    selected: &[Symbol],
    q: usize,
) -> ReplicaResult<SolverProblem> {
    let panel = table.filter_symbols(selected).to_panel().filled(0.0);
    if panel.is_empty() {
        return Err(ReplicaError::data(
            "none of the selected symbols has return data",
        ));
    }

    let n = panel.n_symbols() as f64;
    let benchmark = panel
        .rows()
        .iter()
        .map(|row| row.iter().sum::<f64>() / n)
        .collect();

    let problem = SolverProblem::new(
        panel.symbols().to_vec(),
        panel.dates().to_vec(),
        panel.rows().to_vec(),
        benchmark,
        q,
    )?;
    info!(
        n = problem.n_symbols(),
        t = problem.n_periods(),
        q,
        "solver problem assembled"
    );
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> ReturnTable {
        let d = |day| Date::from_ymd(2024, 7, day).unwrap();
        let obs = |day, symbol: &str, value| ReturnObservation {
            date: d(day),
            symbol: Symbol::from(symbol),
            close: 100.0,
            value,
        };
        ReturnTable::new(
            ReturnKind::Log,
            vec![
                obs(2, "MSFT", 0.02),
                obs(1, "AAPL", 0.01),
                obs(2, "AAPL", -0.01),
                obs(1, "TSLA", 0.5),
            ],
        )
    }

    #[test]
    fn test_problem_sorted_and_zero_filled() {
        let selected = vec![Symbol::from("MSFT"), Symbol::from("AAPL")];
        let problem = build_problem(&table(), &selected, 1).unwrap();
        assert_eq!(problem.symbols(), &[Symbol::from("AAPL"), Symbol::from("MSFT")]);
        assert_eq!(problem.n_periods(), 2);
        assert_relative_eq!(problem.returns()[0][1], 0.0);
        assert_relative_eq!(problem.benchmark()[0], 0.005, epsilon = 1e-12);
        assert_relative_eq!(problem.benchmark()[1], 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_no_overlap() {
        let err = build_problem(&table(), &[Symbol::from("IBM")], 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_q_too_large() {
        let err = build_problem(&table(), &[Symbol::from("AAPL")], 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
