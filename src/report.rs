//! Output formatting for call results and suite reports.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the `{success, value | error}` shape, for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::scenario::{ScenarioOutcome, SuiteReport};
use crate::types::{CallResult, ErrorCode, Method, ResponseValue};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON envelope for a single call.
#[derive(Serialize)]
struct JsonCall<'a> {
    contract: &'a str,
    method: &'a str,
    args: &'a [f64],
    #[serde(flatten)]
    result: &'a CallResult,
}

/// JSON report for a suite run.
#[derive(Serialize)]
pub struct JsonSuiteReport<'a> {
    pub version: &'static str,
    pub passed: bool,
    pub calls: usize,
    pub failed: usize,
    #[serde(flatten)]
    pub report: &'a SuiteReport,
}

/// Render a call result as pretty-printed JSON.
pub fn render_call_json(
    contract: &str,
    method: &str,
    args: &[f64],
    result: &CallResult,
) -> anyhow::Result<String> {
    let call = JsonCall {
        contract,
        method,
        args,
        result,
    };
    Ok(serde_json::to_string_pretty(&call)?)
}

/// Write a call result in JSON format.
pub fn write_call_json(
    contract: &str,
    method: &str,
    args: &[f64],
    result: &CallResult,
) -> anyhow::Result<()> {
    println!("{}", render_call_json(contract, method, args, result)?);
    Ok(())
}

/// Render a suite report as pretty-printed JSON.
pub fn render_suite_json(report: &SuiteReport) -> anyhow::Result<String> {
    let json = JsonSuiteReport {
        version: env!("CARGO_PKG_VERSION"),
        passed: report.passed(),
        calls: report.outcomes.len(),
        failed: report.failed_count(),
        report,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Write a suite report in JSON format.
pub fn write_suite_json(report: &SuiteReport) -> anyhow::Result<()> {
    println!("{}", render_suite_json(report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "market-verification".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn format_args(args: &[f64]) -> String {
    let parts: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// One-line description of a call result, uncolored.
pub fn describe_result(result: &CallResult) -> String {
    match result {
        CallResult::Success(ResponseValue::Id(id)) => format!("ok u{}", id),
        CallResult::Success(ResponseValue::SystemInfo(info)) => format!(
            "ok {{owner: {}, quantum-score: {}, verification-timestamp: {}, is-active: {}}}",
            info.owner, info.quantum_score, info.verification_timestamp, info.is_active
        ),
        CallResult::Failure(code) => format!("err {}", code),
    }
}

/// Write a call result in pretty format.
pub fn write_call_pretty(contract: &str, method: &str, args: &[f64], result: &CallResult) {
    write_header();

    print!("  {}", "Contract: ".dimmed());
    println!("{}", contract);
    print!("  {}", "Call:     ".dimmed());
    println!("{} {}", method.blue(), format_args(args));
    println!();

    if result.is_success() {
        print!("  {}", "✓ OK".green());
    } else {
        print!("  {}", "✗ ERR".red());
    }
    println!("  {}", describe_result(result));

    if result.error() == Some(ErrorCode::MethodNotFound) {
        println!("      {} {}", "known methods:".dimmed(), known_methods());
    }
    println!();
}

/// Comma-separated list of the methods the stub answers.
pub fn known_methods() -> String {
    let names: Vec<&str> = Method::all().iter().map(Method::as_str).collect();
    names.join(", ")
}

/// Write a suite report in pretty format.
pub fn write_suite_pretty(report: &SuiteReport) {
    write_header();

    print!("  {}", "Suite:    ".dimmed());
    println!("{}", report.suite);
    print!("  {}", "Contract: ".dimmed());
    println!("{}", report.contract);
    println!();

    for outcome in &report.outcomes {
        write_outcome(outcome);
    }
    println!();

    let total = report.outcomes.len();
    let failed = report.failed_count();
    if report.passed() {
        println!(
            "  {}  {} calls matched",
            "✓ PASS".green().bold(),
            total.to_string().green()
        );
    } else {
        println!(
            "  {}  {} of {} calls mismatched",
            "✗ FAIL".red().bold(),
            failed.to_string().red(),
            total
        );
    }
    println!();
}

fn write_outcome(outcome: &ScenarioOutcome) {
    if outcome.passed {
        print!("  {} ", "✓".green());
    } else {
        print!("  {} ", "✗".red());
    }
    print!("{}", outcome.scenario);
    println!(" {}", format_args(&outcome.args).dimmed());

    if let Some(mismatch) = &outcome.mismatch {
        println!("      {}", mismatch.yellow());
    }
}
