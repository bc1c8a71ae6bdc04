//! # dftool CLI entry point
//!
//! Parses command-line arguments, loads the configuration and dispatches to
//! subcommand handlers. Reports go to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dftool_cli::check::{run_check, CheckArgs};
use dftool_cli::config::{CliConfig, OutputFormat};
use dftool_cli::metaschema::{run_metaschema, MetaschemaArgs};
use dftool_cli::schema::{run_schema, SchemaArgs};

/// Data format tool.
///
/// Checks data format documents against the data-format meta-schema, and
/// sample payloads against the JSON Schema a document embeds.
#[derive(Parser, Debug)]
#[command(name = "dftool", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report format. Overrides the configuration file.
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Meta-schema version label. Overrides the configuration file.
    #[arg(long, global = true)]
    metaschema_version: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the data-format meta-schema or its version labels.
    Metaschema(MetaschemaArgs),

    /// Check a data format document with the schema viewer rules.
    Schema(SchemaArgs),

    /// Check a data format document and, optionally, a sample payload.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("dftool starting");

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(cli.output, cli.metaschema_version),
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let mut stdout = std::io::stdout();
    let result = match cli.command {
        Commands::Metaschema(args) => run_metaschema(&args, &config, &mut stdout),
        Commands::Schema(args) => run_schema(&args, &config, &mut stdout),
        Commands::Check(args) => run_check(&args, &config, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
