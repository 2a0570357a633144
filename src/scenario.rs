//! Scenario suites: named contract calls with expected outcomes.
//!
//! A suite is a YAML file listing calls and what each must return. Expected
//! values are matched as a subset: an expected object only constrains the keys
//! it names, so `{quantum-score: 85}` matches a full system info record.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::StubError;
use crate::stub::ValidationStub;
use crate::types::CallResult;

/// Contract name used when a suite doesn't specify one.
pub const DEFAULT_CONTRACT: &str = "market-verification";

/// Top-level suite definition.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Suite {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_contract")]
    pub contract: String,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

fn default_contract() -> String {
    DEFAULT_CONTRACT.to_string()
}

/// A single call, or a family of calls when `each_args` is set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    pub name: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<f64>,
    /// Run the call once per argument vector, all against the same expectation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub each_args: Vec<Vec<f64>>,
    pub expect: Expectation,
}

impl Scenario {
    /// Argument vectors this scenario expands to.
    pub fn calls(&self) -> Vec<&[f64]> {
        if self.each_args.is_empty() {
            vec![self.args.as_slice()]
        } else {
            self.each_args.iter().map(Vec::as_slice).collect()
        }
    }
}

/// Expected outcome of a call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Expectation {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Expectation {
    /// Check a call result against this expectation, describing the first mismatch.
    pub fn check(&self, result: &CallResult) -> Result<(), String> {
        if result.is_success() != self.success {
            return Err(format!(
                "expected success={}, got success={}",
                self.success,
                result.is_success()
            ));
        }

        if let Some(expected) = &self.error {
            match result.error() {
                Some(code) if code.as_str() == expected => {}
                Some(code) => return Err(format!("expected error {}, got {}", expected, code)),
                None => return Err(format!("expected error {}, got none", expected)),
            }
        }

        if let Some(expected) = &self.value {
            let actual = match result.value() {
                Some(v) => serde_json::to_value(v).map_err(|e| e.to_string())?,
                None => serde_json::Value::Null,
            };
            if !json_subset(expected, &actual) {
                return Err(format!("expected value {}, got {}", expected, actual));
            }
        }

        Ok(())
    }
}

/// True when every key of an expected object is present in `actual` with a
/// matching value. Non-object values must be equal.
fn json_subset(expected: &serde_json::Value, actual: &serde_json::Value) -> bool {
    match (expected, actual) {
        (serde_json::Value::Object(exp), serde_json::Value::Object(act)) => exp
            .iter()
            .all(|(k, v)| act.get(k).is_some_and(|a| json_subset(v, a))),
        _ => expected == actual,
    }
}

impl Suite {
    /// Parse a suite from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, StubError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| StubError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The market-verification suite the stub was written against.
    pub fn builtin() -> Self {
        let register = "register-trading-system";
        let invalid = || Expectation {
            success: false,
            value: None,
            error: Some("ERR_INVALID_SYSTEM".to_string()),
        };
        let scores = |scores: &[f64]| -> Vec<Vec<f64>> {
            scores.iter().map(|s| vec![*s, 85.0, 90.0, 75.0]).collect()
        };

        Suite {
            name: "Market Verification Contract".to_string(),
            contract: DEFAULT_CONTRACT.to_string(),
            scenarios: vec![
                Scenario {
                    name: "should register a valid trading system".to_string(),
                    method: register.to_string(),
                    args: vec![85.0, 90.0, 95.0, 80.0],
                    each_args: vec![],
                    expect: Expectation {
                        success: true,
                        value: Some(serde_json::json!(1)),
                        error: None,
                    },
                },
                Scenario {
                    name: "should reject system with low quantum score".to_string(),
                    method: register.to_string(),
                    args: vec![30.0, 90.0, 95.0, 80.0],
                    each_args: vec![],
                    expect: invalid(),
                },
                Scenario {
                    name: "should reject system with low accuracy rate".to_string(),
                    method: register.to_string(),
                    args: vec![85.0, 70.0, 95.0, 80.0],
                    each_args: vec![],
                    expect: invalid(),
                },
                Scenario {
                    name: "should retrieve system information".to_string(),
                    method: "get-system-info".to_string(),
                    args: vec![1.0],
                    each_args: vec![],
                    expect: Expectation {
                        success: true,
                        value: Some(serde_json::json!({"quantum-score": 85, "is-active": true})),
                        error: None,
                    },
                },
                Scenario {
                    name: "should accept valid quantum scores".to_string(),
                    method: register.to_string(),
                    args: vec![],
                    each_args: scores(&[50.0, 75.0, 100.0]),
                    expect: Expectation {
                        success: true,
                        value: Some(serde_json::json!(1)),
                        error: None,
                    },
                },
                Scenario {
                    name: "should reject invalid quantum scores".to_string(),
                    method: register.to_string(),
                    args: vec![],
                    each_args: scores(&[0.0, 25.0, 49.0]),
                    expect: invalid(),
                },
            ],
        }
    }
}

/// Validate a suite for correctness.
pub fn validate(suite: &Suite) -> Result<(), StubError> {
    if suite.scenarios.is_empty() {
        return Err(StubError::InvalidSuite("suite has no scenarios".to_string()));
    }

    for s in &suite.scenarios {
        if s.name.trim().is_empty() {
            return Err(StubError::InvalidSuite(format!(
                "scenario calling {:?} has no name",
                s.method
            )));
        }
        if !s.args.is_empty() && !s.each_args.is_empty() {
            return Err(StubError::InvalidSuite(format!(
                "scenario {:?} sets both args and each_args",
                s.name
            )));
        }
        if s.expect.success && s.expect.error.is_some() {
            return Err(StubError::InvalidSuite(format!(
                "scenario {:?} expects success with an error code",
                s.name
            )));
        }
        if !s.expect.success && s.expect.value.is_some() {
            return Err(StubError::InvalidSuite(format!(
                "scenario {:?} expects failure with a value",
                s.name
            )));
        }
        if let Some(args) = s.calls().into_iter().find(|a| a.iter().any(|v| v.is_nan())) {
            return Err(StubError::InvalidSuite(format!(
                "scenario {:?} has a NaN argument in {:?}",
                s.name, args
            )));
        }
        if let Some(code) = &s.expect.error {
            code.parse::<crate::types::ErrorCode>()
                .map_err(|e| StubError::InvalidSuite(format!("scenario {:?}: {}", s.name, e)))?;
        }
    }

    Ok(())
}

/// Result of a single call made by the runner.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub method: String,
    pub args: Vec<f64>,
    pub result: CallResult,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<String>,
}

/// Results of running a suite.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub contract: String,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Whether every call matched its expectation.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }
}

/// Executes suites against a validation stub.
pub struct Runner<'a> {
    stub: &'a ValidationStub,
}

impl<'a> Runner<'a> {
    pub fn new(stub: &'a ValidationStub) -> Self {
        Self { stub }
    }

    /// Run every scenario in order.
    pub fn run(&self, suite: &Suite) -> SuiteReport {
        let mut outcomes = Vec::new();

        for scenario in &suite.scenarios {
            for args in scenario.calls() {
                let result = self
                    .stub
                    .contract_call(&suite.contract, &scenario.method, args);
                let mismatch = scenario.expect.check(&result).err();
                debug!(scenario = %scenario.name, ?args, passed = mismatch.is_none(), "scenario call");

                outcomes.push(ScenarioOutcome {
                    scenario: scenario.name.clone(),
                    method: scenario.method.clone(),
                    args: args.to_vec(),
                    result,
                    passed: mismatch.is_none(),
                    mismatch,
                });
            }
        }

        let report = SuiteReport {
            suite: suite.name.clone(),
            contract: suite.contract.clone(),
            outcomes,
        };
        info!(
            suite = %report.suite,
            calls = report.outcomes.len(),
            failed = report.failed_count(),
            "suite finished"
        );
        report
    }
}
