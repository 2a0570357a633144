//! Stub configuration schema.
//!
//! Every field is optional; an empty file yields the literal behavior of the
//! market-verification mock (score >= 50, rate >= 80, id 1, fixed system info).
//! A config is only ever loaded from a path given explicitly.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::StubError;
use crate::types::SystemInfo;

/// Default minimum quantum score for registration.
pub const DEFAULT_MIN_QUANTUM_SCORE: f64 = 50.0;
/// Default minimum accuracy rate for registration.
pub const DEFAULT_MIN_ACCURACY_RATE: f64 = 80.0;
/// Placeholder identifier returned by a successful registration.
pub const DEFAULT_REGISTRATION_ID: u64 = 1;

lazy_static! {
    static ref PRINCIPAL_RE: Regex = Regex::new(r"^S[PMTN][0-9A-Z]{38,40}$").unwrap();
}

/// Top-level stub configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StubConfig {
    #[serde(default = "default_min_quantum_score")]
    pub min_quantum_score: f64,
    #[serde(default = "default_min_accuracy_rate")]
    pub min_accuracy_rate: f64,
    #[serde(default = "default_registration_id")]
    pub registration_id: u64,
    /// Record returned by `get-system-info`
    #[serde(default)]
    pub system_info: SystemInfo,
}

fn default_min_quantum_score() -> f64 {
    DEFAULT_MIN_QUANTUM_SCORE
}

fn default_min_accuracy_rate() -> f64 {
    DEFAULT_MIN_ACCURACY_RATE
}

fn default_registration_id() -> u64 {
    DEFAULT_REGISTRATION_ID
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            min_quantum_score: DEFAULT_MIN_QUANTUM_SCORE,
            min_accuracy_rate: DEFAULT_MIN_ACCURACY_RATE,
            registration_id: DEFAULT_REGISTRATION_ID,
            system_info: SystemInfo::default(),
        }
    }
}

impl StubConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, StubError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| StubError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Validate a configuration for correctness.
pub fn validate(config: &StubConfig) -> Result<(), StubError> {
    for (key, value) in [
        ("min_quantum_score", config.min_quantum_score),
        ("min_accuracy_rate", config.min_accuracy_rate),
    ] {
        if !value.is_finite() {
            return Err(StubError::InvalidConfig(format!(
                "{} must be a finite number, got {}",
                key, value
            )));
        }
    }

    if config.registration_id == 0 {
        return Err(StubError::InvalidConfig(
            "registration_id must be greater than 0".to_string(),
        ));
    }

    if !PRINCIPAL_RE.is_match(&config.system_info.owner) {
        return Err(StubError::InvalidConfig(format!(
            "system_info.owner {:?} is not a valid principal",
            config.system_info.owner
        )));
    }

    Ok(())
}
