//! Integration tests for scenario suites and their reports.

use std::path::PathBuf;

use market_verification::cli::{self, VerifyArgs, EXIT_ERROR, EXIT_FAILED, EXIT_SUCCESS};
use market_verification::report;
use market_verification::scenario;
use market_verification::{Runner, StubConfig, Suite, ValidationStub};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn load_suite(name: &str) -> Suite {
    Suite::parse_file(testdata_path().join(name)).expect("should parse suite")
}

fn verify_args(suite: Option<&str>, config: Option<&str>) -> VerifyArgs {
    VerifyArgs {
        suite: suite.map(|s| testdata_path().join(s)),
        config: config.map(|c| testdata_path().join(c)),
        format: "json".to_string(),
    }
}

#[test]
fn test_boundaries_suite_passes() {
    let suite = load_suite("boundaries.suite.yaml");
    scenario::validate(&suite).expect("suite should be valid");

    let stub = ValidationStub::default();
    let report = Runner::new(&stub).run(&suite);

    assert!(report.passed(), "failures: {:?}", report.outcomes);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.contract, scenario::DEFAULT_CONTRACT);
}

#[test]
fn test_mismatched_suite_reports_each_failure() {
    let suite = load_suite("mismatched.suite.yaml");
    let stub = ValidationStub::default();
    let report = Runner::new(&stub).run(&suite);

    assert!(!report.passed());
    assert_eq!(report.failed_count(), 2);

    let mismatches: Vec<&str> = report
        .outcomes
        .iter()
        .filter_map(|o| o.mismatch.as_deref())
        .collect();
    assert!(mismatches[0].contains("success=true"));
    assert!(mismatches[1].contains("quantum-score"));

    let json: serde_json::Value =
        serde_json::from_str(&report::render_suite_json(&report).unwrap()).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["failed"], 2);
}

#[test]
fn test_builtin_suite_fails_under_strict_config() {
    let config = StubConfig::parse_file(testdata_path().join("strict-config.yaml")).unwrap();
    let stub = ValidationStub::new(config);
    let report = Runner::new(&stub).run(&Suite::builtin());

    // only the rejection scenarios still hold
    assert!(!report.passed());
    assert!(report
        .outcomes
        .iter()
        .filter(|o| o.scenario.starts_with("should reject"))
        .all(|o| o.passed));
}

#[test]
fn test_invalid_suite_rejected() {
    let suite = load_suite("invalid.suite.yaml");
    let err = scenario::validate(&suite).unwrap_err();
    assert!(err.to_string().contains("expects success with an error code"));
}

#[test]
fn test_verify_exit_codes() {
    assert_eq!(cli::run_verify(&verify_args(None, None)).unwrap(), EXIT_SUCCESS);
    assert_eq!(
        cli::run_verify(&verify_args(Some("boundaries.suite.yaml"), None)).unwrap(),
        EXIT_SUCCESS
    );
    assert_eq!(
        cli::run_verify(&verify_args(Some("mismatched.suite.yaml"), None)).unwrap(),
        EXIT_FAILED
    );
    assert_eq!(
        cli::run_verify(&verify_args(Some("invalid.suite.yaml"), None)).unwrap(),
        EXIT_ERROR
    );
    assert_eq!(
        cli::run_verify(&verify_args(None, Some("bad-owner-config.yaml"))).unwrap(),
        EXIT_ERROR
    );
    assert_eq!(
        cli::run_verify(&verify_args(Some("missing.suite.yaml"), None)).unwrap(),
        EXIT_ERROR
    );
}

#[test]
fn test_call_exit_codes() {
    let call = |method: &str, args: Vec<f64>| cli::CallArgs {
        method: method.to_string(),
        args,
        contract: scenario::DEFAULT_CONTRACT.to_string(),
        config: Some(testdata_path().join("strict-config.yaml")),
        format: "json".to_string(),
    };

    assert_eq!(cli::run_call(&call("register-trading-system", vec![90.0, 95.0])).unwrap(), EXIT_SUCCESS);
    assert_eq!(cli::run_call(&call("register-trading-system", vec![85.0, 90.0])).unwrap(), EXIT_FAILED);
    assert_eq!(cli::run_call(&call("transfer", vec![])).unwrap(), EXIT_FAILED);

    let mut bad_format = call("get-system-info", vec![]);
    bad_format.format = "sarif".to_string();
    assert_eq!(cli::run_call(&bad_format).unwrap(), EXIT_ERROR);
}
