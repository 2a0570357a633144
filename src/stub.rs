//! The validation stub answering market-verification contract calls.
//!
//! Each call is a pure function of the method name, its arguments and the
//! stub's configuration. Nothing is recorded between calls.

use tracing::debug;

use crate::config::StubConfig;
use crate::types::{CallResult, ErrorCode, Method, RegistrationRequest, ResponseValue};

/// In-process stand-in for the market-verification contract.
#[derive(Debug, Clone, Default)]
pub struct ValidationStub {
    config: StubConfig,
}

impl ValidationStub {
    /// Create a stub with the given configuration.
    pub fn new(config: StubConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StubConfig {
        &self.config
    }

    /// Dispatch a call by method name.
    pub fn call(&self, method: &str, args: &[f64]) -> CallResult {
        let result = match Method::parse(method) {
            Some(Method::RegisterTradingSystem) => {
                self.register_trading_system(&RegistrationRequest::from_args(args))
            }
            Some(Method::GetSystemInfo) => self.get_system_info(),
            None => CallResult::Failure(ErrorCode::MethodNotFound),
        };
        debug!(method, ?args, success = result.is_success(), "contract call");
        result
    }

    /// Dispatch a call addressed to a named contract.
    ///
    /// The stub stands in for a single contract, so the name is only logged.
    pub fn contract_call(&self, contract: &str, method: &str, args: &[f64]) -> CallResult {
        debug!(contract, "routing call to validation stub");
        self.call(method, args)
    }

    /// Accept the registration if score and rate meet the configured minimums.
    pub fn register_trading_system(&self, request: &RegistrationRequest) -> CallResult {
        if request.is_acceptable(self.config.min_quantum_score, self.config.min_accuracy_rate) {
            CallResult::Success(ResponseValue::Id(self.config.registration_id))
        } else {
            CallResult::Failure(ErrorCode::InvalidSystem)
        }
    }

    /// Return the fixed system info record.
    pub fn get_system_info(&self) -> CallResult {
        CallResult::Success(ResponseValue::SystemInfo(self.config.system_info.clone()))
    }
}
