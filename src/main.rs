//! market-verification CLI entry point.

use clap::Parser;
use market_verification::cli::{self, Cli, Commands, EXIT_ERROR};
use market_verification::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Call(args) => cli::run_call(args),
        Commands::Verify(args) => cli::run_verify(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
