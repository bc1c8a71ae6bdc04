//! # Metaschema Subcommand
//!
//! Prints the data-format meta-schema, or the list of version labels with
//! the configured one marked.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use dftool_schema::MetaSchemaRepository;
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::report::write_json;

#[derive(Args, Debug)]
pub struct MetaschemaArgs {
    /// List the available version labels instead of printing the schema.
    #[arg(long)]
    pub versions: bool,
}

#[derive(Serialize)]
struct VersionsReport<'a> {
    current: &'a str,
    versions: &'a [&'static str],
}

pub fn run_metaschema(args: &MetaschemaArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let mut repository = MetaSchemaRepository::new()?;
    repository.set_metaschema_version(config.metaschema_version.clone());

    if args.versions {
        let report = VersionsReport {
            current: repository.metaschema_version(),
            versions: repository.metaschema_versions(),
        };
        match config.output {
            OutputFormat::Json => write_json(out, &report)?,
            OutputFormat::Text => {
                for version in report.versions {
                    let marker = if *version == report.current { "*" } else { " " };
                    writeln!(out, "{marker} {version}")?;
                }
            }
        }
        return Ok(0);
    }

    match config.output {
        OutputFormat::Json => write_json(out, repository.current_metaschema())?,
        OutputFormat::Text => writeln!(out, "{}", repository.current_metaschema_formatted())?,
    }
    Ok(0)
}
