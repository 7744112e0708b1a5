//! End-to-end tests of the `replica` binary.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SYMBOLS: [&str; 5] = ["AAA", "BBB", "CCC", "DDD", "EEE"];

fn write_prices(path: &Path, days: u32) {
    let mut csv = String::from("date,symbol,close\n");
    for (k, symbol) in SYMBOLS.iter().enumerate() {
        let mut px = 50.0 + 10.0 * k as f64;
        for t in 0..days {
            let shock = (f64::from(t) * (0.3 + 0.07 * k as f64)).sin() * 0.01
                + (f64::from(t) * 0.05).cos() * 0.003;
            px *= 1.0 + shock;
            let date = chrono_free_date(t);
            let _ = writeln!(csv, "{date},{symbol},{px:.4}");
        }
    }
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, csv).unwrap();
}

/// 2023-01-01 plus `offset` days, rendered without pulling in a date crate.
fn chrono_free_date(offset: u32) -> String {
    const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut remaining = offset;
    for (m, len) in MONTH_DAYS.iter().enumerate() {
        if remaining < *len {
            return format!("2023-{:02}-{:02}", m + 1, remaining + 1);
        }
        remaining -= len;
    }
    panic!("offset beyond 2023");
}

fn replica(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("replica").unwrap();
    cmd.current_dir(dir.path()).env_remove("REPLICA_CONFIG").env("RUST_LOG", "warn");
    cmd
}

// =============================================================================
// Individual commands
// =============================================================================

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    replica(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("solver-data"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_config_shows_defaults_as_json() {
    let dir = TempDir::new().unwrap();
    replica(&dir)
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rolling_window\": 63"))
        .stdout(predicate::str::contains("\"risk_free_rate\": 0.02"));
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("replica.toml"), "n_stocks = 7\n").unwrap();
    replica(&dir)
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"n_stocks\": 7"));
}

#[test]
fn test_config_write_round_trip() {
    let dir = TempDir::new().unwrap();
    replica(&dir)
        .args(["config", "--write", "conf/replica.toml"])
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("conf/replica.toml")).unwrap();
    assert!(text.contains("n_components = 10"));
}

#[test]
fn test_missing_input_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    replica(&dir)
        .arg("returns")
        .assert()
        .failure()
        .stderr(predicate::str::contains("replica fetch"));
}

#[test]
fn test_returns_and_stats() {
    let dir = TempDir::new().unwrap();
    write_prices(&dir.path().join("data/raw/prices_full.csv"), 30);

    replica(&dir)
        .args(["returns", "--kind", "simple"])
        .assert()
        .success();
    let returns = fs::read_to_string(dir.path().join("data/processed/returns.csv")).unwrap();
    assert!(returns.starts_with("date,symbol,close,return"));

    replica(&dir)
        .args(["stats", "--format", "csv", "--summary-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Symbols,5"))
        .stdout(predicate::str::contains("Total Days,29"));
}

#[test]
fn test_fetch_skips_unknown_symbols() {
    let dir = TempDir::new().unwrap();
    write_prices(&dir.path().join("dump.csv"), 10);

    replica(&dir)
        .args([
            "fetch",
            "--source",
            "dump.csv",
            "--symbols",
            "AAA,ZZZ",
            "--start",
            "2023-01-01",
            "--end",
            "2023-12-31",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched,1"))
        .stdout(predicate::str::contains("Failed,1"));

    let prices = fs::read_to_string(dir.path().join("data/raw/prices_full.csv")).unwrap();
    assert!(prices.contains("AAA"));
    assert!(!prices.contains("ZZZ"));
}

#[test]
fn test_compare_without_summaries_fails() {
    let dir = TempDir::new().unwrap();
    replica(&dir)
        .args(["compare", "PCA", "AMPL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No stored summary for method PCA"));
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_pipeline_pca_solver_compare() {
    let dir = TempDir::new().unwrap();
    write_prices(&dir.path().join("data/raw/prices_full.csv"), 150);

    replica(&dir).arg("returns").assert().success();
    replica(&dir).arg("benchmark").assert().success();

    replica(&dir)
        .args(["solver-data", "--q", "2"])
        .assert()
        .success();
    let dat = fs::read_to_string(dir.path().join("data/ampl/sp100_tracking.dat")).unwrap();
    assert!(dat.contains("param N := 5;"));
    assert!(dat.contains("param q := 2;"));

    replica(&dir)
        .args(["pca", "--n-components", "2", "--n-stocks", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance"));
    for name in ["pca_performance.csv", "pca_rolling.csv", "pca_returns.csv", "pca_weights.csv"] {
        assert!(dir.path().join("data/results").join(name).exists(), "{name}");
    }

    fs::write(
        dir.path().join("data/ampl/solver_weights.csv"),
        "index,x\n1,0.5\n2,0\n3,0.5\n4,0\n5,0\n",
    )
    .unwrap();
    replica(&dir)
        .args(["solver", "--q", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAA"))
        .stdout(predicate::str::contains("CCC"));
    assert!(dir.path().join("data/results/ampl_performance.csv").exists());
    assert!(dir.path().join("data/results/method_comparison.csv").exists());

    replica(&dir)
        .args(["compare", "PCA", "AMPL", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"difference\""));
}

#[test]
fn test_pca_fails_when_stored_summary_lacks_horizon() {
    let dir = TempDir::new().unwrap();
    write_prices(&dir.path().join("data/raw/prices_full.csv"), 150);
    replica(&dir).arg("returns").assert().success();
    replica(&dir).arg("benchmark").assert().success();

    let results = dir.path().join("data/results");
    fs::create_dir_all(&results).unwrap();
    fs::write(
        results.join("ampl_performance.csv"),
        ",correlation,tracking_error,information_ratio,sharpe_ratio\n3M,0.9,0.05,0.1,1.0\n",
    )
    .unwrap();

    replica(&dir)
        .args(["pca", "--n-components", "2", "--n-stocks", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("6M"));
    assert!(!results.join("method_comparison.csv").exists());
}

#[test]
fn test_solver_rejects_wrong_support() {
    let dir = TempDir::new().unwrap();
    write_prices(&dir.path().join("data/raw/prices_full.csv"), 40);
    replica(&dir).arg("returns").assert().success();
    replica(&dir).arg("benchmark").assert().success();

    fs::create_dir_all(dir.path().join("data/ampl")).unwrap();
    fs::write(
        dir.path().join("data/ampl/solver_weights.csv"),
        "symbol,weight\nAAA,0.4\nBBB,0.3\nCCC,0.3\n",
    )
    .unwrap();
    replica(&dir)
        .args(["solver", "--q", "2"])
        .assert()
        .failure();
    assert!(!dir.path().join("data/results/ampl_performance.csv").exists());
}
