//! market-verification - validation stub for the market-verification contract.
//!
//! The stub answers contract calls without executing any contract: a trading
//! system registers when its quantum score is at least 50 and its accuracy
//! rate at least 80, and system info is a fixed record.
//!
//! # Architecture
//!
//! - `types`: call results, error codes, methods and the system info record
//! - `error`: typed errors for config and suite loading
//! - `config`: YAML stub configuration (thresholds, fixture)
//! - `stub`: the validation stub itself
//! - `scenario`: YAML scenario suites and the runner that checks them
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command-line commands
//! - `logging`: tracing subscriber setup

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scenario;
pub mod stub;
pub mod types;

pub use config::StubConfig;
pub use error::StubError;
pub use scenario::{Expectation, Runner, Scenario, Suite, SuiteReport};
pub use stub::ValidationStub;
pub use types::{CallResult, ErrorCode, Method, RegistrationRequest, ResponseValue, SystemInfo};
