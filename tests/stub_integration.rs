//! Integration tests for the validation stub.
//!
//! These tests exercise the public call surface with the literal scenarios of
//! the market-verification contract and with configs loaded from testdata.

use std::path::PathBuf;

use market_verification::config;
use market_verification::{CallResult, ErrorCode, ResponseValue, StubConfig, ValidationStub};

const CONTRACT: &str = "market-verification";
const REGISTER: &str = "register-trading-system";
const SYSTEM_INFO: &str = "get-system-info";

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn to_json(result: &CallResult) -> serde_json::Value {
    serde_json::to_value(result).expect("result should serialize")
}

#[test]
fn test_register_valid_trading_system() {
    let stub = ValidationStub::default();
    let result = stub.contract_call(CONTRACT, REGISTER, &[85.0, 90.0, 95.0, 80.0]);

    assert_eq!(to_json(&result), serde_json::json!({"success": true, "value": 1}));
}

#[test]
fn test_reject_low_quantum_score() {
    let stub = ValidationStub::default();
    let result = stub.contract_call(CONTRACT, REGISTER, &[30.0, 90.0, 95.0, 80.0]);

    assert_eq!(
        to_json(&result),
        serde_json::json!({"success": false, "error": "ERR_INVALID_SYSTEM"})
    );
}

#[test]
fn test_reject_low_accuracy_rate() {
    let stub = ValidationStub::default();
    let result = stub.contract_call(CONTRACT, REGISTER, &[85.0, 70.0, 95.0, 80.0]);

    assert_eq!(result.error(), Some(ErrorCode::InvalidSystem));
}

#[test]
fn test_retrieve_system_information() {
    let stub = ValidationStub::default();
    let json = to_json(&stub.contract_call(CONTRACT, SYSTEM_INFO, &[1.0]));

    assert_eq!(json["success"], true);
    assert_eq!(json["value"]["quantum-score"], 85);
    assert_eq!(json["value"]["is-active"], true);
    assert_eq!(json["value"]["verification-timestamp"], 100);
}

#[test]
fn test_quantum_score_requirements() {
    let stub = ValidationStub::default();

    for score in [50.0, 50.1, 75.0, 100.0] {
        let result = stub.call(REGISTER, &[score, 85.0, 90.0, 75.0]);
        assert!(result.is_success(), "score {} should register", score);
    }

    for score in [0.0, 25.0, 49.0, 49.9, 49.999] {
        let result = stub.call(REGISTER, &[score, 85.0, 90.0, 75.0]);
        assert!(!result.is_success(), "score {} should be rejected", score);
    }
}

#[test]
fn test_accuracy_rate_requirements() {
    let stub = ValidationStub::default();

    for rate in [80.0, 80.5, 100.0, f64::MAX, f64::INFINITY] {
        assert!(stub.call(REGISTER, &[85.0, rate, 0.0, 0.0]).is_success());
    }
    for rate in [f64::NEG_INFINITY, f64::MIN, -1.0, 0.0, 79.0, 79.99] {
        assert_eq!(
            stub.call(REGISTER, &[85.0, rate, 0.0, 0.0]).error(),
            Some(ErrorCode::InvalidSystem)
        );
    }
}

#[test]
fn test_fractional_quantum_score_boundary() {
    let stub = ValidationStub::default();

    assert_eq!(
        to_json(&stub.call(REGISTER, &[49.9, 90.0, 95.0, 80.0])),
        serde_json::json!({"success": false, "error": "ERR_INVALID_SYSTEM"})
    );
    assert_eq!(
        to_json(&stub.call(REGISTER, &[50.0, 90.0, 95.0, 80.0])),
        serde_json::json!({"success": true, "value": 1})
    );
}

#[test]
fn test_unknown_method_not_found() {
    let stub = ValidationStub::default();
    let json = to_json(&stub.contract_call(CONTRACT, "transfer", &[]));

    assert_eq!(
        json,
        serde_json::json!({"success": false, "error": "METHOD_NOT_FOUND"})
    );
}

#[test]
fn test_calls_do_not_share_state() {
    let stub = ValidationStub::default();
    let first = stub.call(REGISTER, &[85.0, 90.0, 95.0, 80.0]);
    let _ = stub.call(REGISTER, &[30.0, 90.0, 95.0, 80.0]);
    let _ = stub.call("transfer", &[1.0]);
    let again = stub.call(REGISTER, &[85.0, 90.0, 95.0, 80.0]);

    // identifier is a placeholder, not a counter
    assert_eq!(first, again);
    assert_eq!(again, CallResult::Success(ResponseValue::Id(1)));
}

#[test]
fn test_strict_config_from_file() {
    let config = StubConfig::parse_file(testdata_path().join("strict-config.yaml"))
        .expect("should parse config");
    config::validate(&config).expect("config should be valid");
    let stub = ValidationStub::new(config);

    assert!(!stub.call(REGISTER, &[85.0, 90.0, 95.0, 80.0]).is_success());
    assert_eq!(
        stub.call(REGISTER, &[90.0, 95.0, 0.0, 0.0]),
        CallResult::Success(ResponseValue::Id(7))
    );

    match stub.call(SYSTEM_INFO, &[]).value() {
        Some(ResponseValue::SystemInfo(info)) => {
            assert_eq!(info.quantum_score, 97);
            assert!(!info.is_active);
        }
        other => panic!("expected system info, got {:?}", other),
    }
}

#[test]
fn test_bad_owner_config_rejected() {
    let config = StubConfig::parse_file(testdata_path().join("bad-owner-config.yaml"))
        .expect("should parse config");
    let err = config::validate(&config).unwrap_err();
    assert!(err.to_string().contains("not-a-principal"));
}

#[test]
fn test_missing_config_file() {
    let err = StubConfig::parse_file(testdata_path().join("does-not-exist.yaml")).unwrap_err();
    assert!(err.to_string().contains("does-not-exist.yaml"));
}
