//! # yamlvalid entry point
//!
//! Parses command-line arguments, sets up logging, and runs the validate
//! command against stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use yamlvalid_cli::validate::{run_validate, ValidateArgs};
use yamlvalid_cli::EXIT_ERROR;

/// Lint a workload manifest.
///
/// Checks field presence and value ranges in a YAML workload manifest and
/// prints one line per finding.
#[derive(Parser, Debug)]
#[command(name = "yamlvalid", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "yamlvalid starting");

    let mut stdout = std::io::stdout().lock();
    match run_validate(&cli.validate, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
