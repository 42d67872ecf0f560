//! # catalint CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalint_cli::keywords::{run_keywords, KeywordsArgs};
use catalint_cli::validate::{run_validate, ValidateArgs};
use catalint_cli::EXIT_FATAL;

/// catalint: validate workflow catalogs against JSON Schemas and explain
/// every failure in terms of the catalog entry that caused it.
#[derive(Parser, Debug)]
#[command(name = "catalint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file with engine options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate catalog documents against a schema.
    Validate(ValidateArgs),

    /// Show how a catalog kind classifies field names.
    Keywords(KeywordsArgs),
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

    tracing::debug!("catalint CLI starting");

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, cli.config.as_deref(), &mut stdout),
        Commands::Keywords(args) => run_keywords(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
