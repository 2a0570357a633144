//! Core types for contract calls and their results.

use serde::{Deserialize, Serialize};

/// Fixed error codes a call can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "ERR_INVALID_SYSTEM")]
    InvalidSystem,
    #[serde(rename = "METHOD_NOT_FOUND")]
    MethodNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSystem => "ERR_INVALID_SYSTEM",
            ErrorCode::MethodNotFound => "METHOD_NOT_FOUND",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ERR_INVALID_SYSTEM" => Ok(ErrorCode::InvalidSystem),
            "METHOD_NOT_FOUND" => Ok(ErrorCode::MethodNotFound),
            _ => Err(format!("unknown error code: {}", s)),
        }
    }
}

/// Contract methods the stub answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    RegisterTradingSystem,
    GetSystemInfo,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::RegisterTradingSystem => "register-trading-system",
            Method::GetSystemInfo => "get-system-info",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "register-trading-system" => Some(Method::RegisterTradingSystem),
            "get-system-info" => Some(Method::GetSystemInfo),
            _ => None,
        }
    }

    /// All known methods, in declaration order.
    pub fn all() -> &'static [Method] {
        &[Method::RegisterTradingSystem, Method::GetSystemInfo]
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static record returned by `get-system-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemInfo {
    pub owner: String,
    pub quantum_score: i64,
    pub verification_timestamp: u64,
    pub is_active: bool,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            owner: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
            quantum_score: 85,
            verification_timestamp: 100,
            is_active: true,
        }
    }
}

/// Arguments of a `register-trading-system` call.
///
/// Only `quantum_score` and `accuracy_rate` take part in acceptance. The other
/// two fields are carried as given and never checked. Fields are plain
/// numbers with no units, so fractional values compare as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegistrationRequest {
    pub quantum_score: Option<f64>,
    pub accuracy_rate: Option<f64>,
    pub processing_speed: Option<f64>,
    pub entanglement_level: Option<f64>,
}

impl RegistrationRequest {
    /// Build a request from positional call arguments. Extra arguments are ignored.
    pub fn from_args(args: &[f64]) -> Self {
        Self {
            quantum_score: args.first().copied(),
            accuracy_rate: args.get(1).copied(),
            processing_speed: args.get(2).copied(),
            entanglement_level: args.get(3).copied(),
        }
    }

    /// Acceptance predicate: score and rate must both be present and meet the minimums.
    /// NaN never meets a minimum.
    pub fn is_acceptable(&self, min_quantum_score: f64, min_accuracy_rate: f64) -> bool {
        matches!(
            (self.quantum_score, self.accuracy_rate),
            (Some(score), Some(rate)) if score >= min_quantum_score && rate >= min_accuracy_rate
        )
    }
}

/// Value carried by a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Id(u64),
    SystemInfo(SystemInfo),
}

/// Outcome of a single contract call.
///
/// Serializes as `{"success": true, "value": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResult", try_from = "WireResult")]
pub enum CallResult {
    Success(ResponseValue),
    Failure(ErrorCode),
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }

    pub fn value(&self) -> Option<&ResponseValue> {
        match self {
            CallResult::Success(v) => Some(v),
            CallResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<ErrorCode> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure(code) => Some(*code),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<ResponseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorCode>,
}

impl From<CallResult> for WireResult {
    fn from(result: CallResult) -> Self {
        match result {
            CallResult::Success(value) => WireResult {
                success: true,
                value: Some(value),
                error: None,
            },
            CallResult::Failure(code) => WireResult {
                success: false,
                value: None,
                error: Some(code),
            },
        }
    }
}

impl TryFrom<WireResult> for CallResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        match (wire.success, wire.value, wire.error) {
            (true, Some(value), None) => Ok(CallResult::Success(value)),
            (false, None, Some(code)) => Ok(CallResult::Failure(code)),
            (true, _, _) => Err("successful result must carry a value and no error".to_string()),
            (false, _, _) => Err("failed result must carry an error and no value".to_string()),
        }
    }
}
