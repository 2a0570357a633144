//! Command-line interface for market-verification.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{self, StubConfig};
use crate::report;
use crate::scenario::{self, Runner, Suite, DEFAULT_CONTRACT};
use crate::stub::ValidationStub;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Validation stub for the market-verification contract.
///
/// Answers register-trading-system and get-system-info calls with the fixed
/// results of the contract mock, and checks scenario suites against them.
#[derive(Parser)]
#[command(name = "market-verification")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Make a single contract call
    Call(CallArgs),
    /// Run a scenario suite against the stub
    #[command(visible_alias = "test")]
    Verify(VerifyArgs),
    /// Create a config or suite file from a template
    Init(InitArgs),
}

/// Arguments for the call command.
#[derive(Parser)]
pub struct CallArgs {
    /// Method name (e.g. register-trading-system)
    pub method: String,

    /// Numeric call arguments
    #[arg(allow_negative_numbers = true, value_parser = parse_number)]
    pub args: Vec<f64>,

    /// Contract name the call is addressed to
    #[arg(long, default_value = DEFAULT_CONTRACT)]
    pub contract: String,

    /// Path to stub config YAML file (default: built-in behavior)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Parse a numeric call argument, rejecting NaN.
fn parse_number(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("{:?} is not a number", s))?;
    if value.is_nan() {
        return Err("NaN is not a valid argument".to_string());
    }
    Ok(value)
}

/// Arguments for the verify command.
#[derive(Parser)]
pub struct VerifyArgs {
    /// Path to suite YAML file (default: built-in suite)
    pub suite: Option<PathBuf>,

    /// Path to stub config YAML file (default: built-in behavior)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path (default: depends on template)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Template to use
    #[arg(short, long, default_value = "stub-config")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available templates.
struct Template {
    name: &'static str,
    description: &'static str,
    default_output: &'static str,
    content: &'static str,
    /// Command to suggest once the file exists; `{path}` is replaced.
    next_step: &'static str,
}

impl Template {
    fn find(name: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.name == name)
    }

    fn next_step(&self, path: &Path) -> String {
        self.next_step.replace("{path}", &path.display().to_string())
    }
}

static TEMPLATES: &[Template] = &[
    Template {
        name: "stub-config",
        description: "Stub thresholds, registration id and system info fixture",
        default_output: "market-verification.yaml",
        content: include_str!("templates/stub-config.yaml"),
        next_step: "market-verification call register-trading-system 85 90 95 80 --config {path}",
    },
    Template {
        name: "suite",
        description: "Scenario suite covering registration and system info",
        default_output: "market-verification.suite.yaml",
        content: include_str!("templates/suite.yaml"),
        next_step: "market-verification verify {path}",
    },
];

fn validate_format(format: &str) -> bool {
    if format != "pretty" && format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'pretty' or 'json'", format);
        return false;
    }
    true
}

/// Load and validate the stub configuration.
///
/// Only an explicitly given file is read; otherwise the built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<StubConfig> {
    let config = match explicit {
        Some(p) => {
            debug!(path = %p.display(), "loading stub config");
            StubConfig::parse_file(p)?
        }
        None => StubConfig::default(),
    };
    config::validate(&config)?;
    Ok(config)
}

/// Run the call command.
pub fn run_call(args: &CallArgs) -> anyhow::Result<i32> {
    if !validate_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let stub = ValidationStub::new(config);
    let result = stub.contract_call(&args.contract, &args.method, &args.args);

    match args.format.as_str() {
        "json" => report::write_call_json(&args.contract, &args.method, &args.args, &result)?,
        _ => report::write_call_pretty(&args.contract, &args.method, &args.args, &result),
    }

    if result.is_success() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the verify command.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<i32> {
    if !validate_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let suite = match &args.suite {
        Some(path) => match Suite::parse_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error parsing suite: {}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => Suite::builtin(),
    };

    if let Err(e) = scenario::validate(&suite) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    let stub = ValidationStub::new(config);
    let report = Runner::new(&stub).run(&suite);

    match args.format.as_str() {
        "json" => report::write_suite_json(&report)?,
        _ => report::write_suite_pretty(&report),
    }

    if report.passed() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.list {
        list_templates();
        return Ok(EXIT_SUCCESS);
    }

    let Some(template) = Template::find(&args.template) else {
        eprintln!(
            "Error: unknown template {:?} (known: {})",
            args.template,
            template_names()
        );
        return Ok(EXIT_ERROR);
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(template.default_output));

    if let Err(e) = write_template(template, &output) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    debug!(template = template.name, path = %output.display(), "template written");
    println!("Created {}", output.display());
    println!();
    println!("Next:");
    println!("  {}", template.next_step(&output));

    Ok(EXIT_SUCCESS)
}

/// Write a template to a new file, creating parent directories.
fn write_template(template: &Template, output: &Path) -> anyhow::Result<()> {
    if output.exists() {
        anyhow::bail!(
            "{} already exists; pass --output to write elsewhere",
            output.display()
        );
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    std::fs::write(output, template.content)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}

fn template_names() -> String {
    let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
    names.join(", ")
}

fn list_templates() {
    for template in TEMPLATES {
        println!(
            "{:<14} {:<32} {}",
            template.name, template.default_output, template.description
        );
    }
}
