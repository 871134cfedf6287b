//! Integration tests for the `rootlab` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn rootlab() -> Command {
    let mut cmd = Command::cargo_bin("rootlab").unwrap();
    cmd.env_remove("ROOTLAB_TOLERANCE")
        .env_remove("ROOTLAB_MAX_ITERATIONS")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// FUNCTIONS
// =============================================================================

#[test]
fn functions_lists_catalogue() {
    rootlab()
        .args(["--format", "minimal", "functions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cosine"))
        .stdout(predicate::str::contains("quadratic"))
        .stdout(predicate::str::contains("log"));
}

// =============================================================================
// SOLVE
// =============================================================================

#[test]
fn solve_bisection_minimal() {
    rootlab()
        .args(["--format", "minimal", "solve", "quadratic", "--method", "bisection"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn solve_newton_json_report() {
    let output = rootlab()
        .args(["--format", "json", "solve", "quadratic", "--method", "newton", "--x0", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["method"], "newton");
    assert_eq!(report["converged"], true);
    assert_eq!(report["iterations"], 5);
    assert_eq!(report["trace"].as_array().unwrap().len(), 5);
    assert!((report["root"].as_f64().unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn solve_accepts_negative_bracket() {
    rootlab()
        .args([
            "--format", "minimal", "solve", "quadratic", "--method", "bisection", "--a", "-3",
            "--b", "-1",
        ])
        .assert()
        .success()
        .stdout("-2\n");
}

#[test]
fn solve_table_shows_trace() {
    rootlab()
        .args(["solve", "cosine", "--method", "aitken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Iterations"))
        .stdout(predicate::str::contains("accelerated"));
}

#[test]
fn solve_singular_derivative_warns() {
    rootlab()
        .args(["--format", "minimal", "solve", "cube", "--method", "newton"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("singular derivative"));
}

#[test]
fn solve_tolerance_from_environment() {
    let output = rootlab()
        .env("ROOTLAB_TOLERANCE", "1e-12")
        .args(["--format", "json", "solve", "cosine", "--method", "fixed-point"])
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["final_error"].as_f64().unwrap() < 1e-12);
}

#[test]
fn solve_rejects_unknown_function() {
    rootlab()
        .args(["solve", "tangent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown function"));
}

#[test]
fn solve_rejects_unknown_method() {
    rootlab()
        .args(["solve", "cosine", "--method", "brent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown method: brent"));
}

#[test]
fn solve_reports_bad_bracket() {
    rootlab()
        .args(["solve", "quadratic", "--method", "bisection", "--a", "3", "--b", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bracket"));
}

#[test]
fn solve_reports_domain_error() {
    rootlab()
        .args(["solve", "log", "--method", "bisection", "--a", "-1", "--b", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ln(x) is undefined"));
}

#[test]
fn solve_rejects_invalid_tolerance() {
    rootlab()
        .args(["--tolerance", "0", "solve", "cosine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance"));
}

// =============================================================================
// COMPARE AND ACCELERATE
// =============================================================================

#[test]
fn compare_minimal_prints_iteration_counts() {
    rootlab()
        .args(["--format", "minimal", "--tolerance", "1e-8", "compare", "cosine"])
        .assert()
        .success()
        .stdout("45 8\n");
}

#[test]
fn accelerate_geometric_partial_sums() {
    rootlab()
        .args(["--format", "minimal", "accelerate", "1", "1.5", "1.75"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn accelerate_short_sequence_is_unchanged() {
    rootlab()
        .args(["accelerate", "1", "2"])
        .assert()
        .success()
        .stdout("1\n2\n")
        .stderr(predicate::str::contains("unchanged"));
}
