//! # Schema Subcommand
//!
//! Runs one document through the schema viewer form.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dftool_forms::status::VALID_DATA_FORMAT_SCHEMA;
use dftool_forms::SchemaForm;

use crate::config::{CliConfig, OutputFormat};
use crate::read_input;
use crate::report::{write_json, write_metaschema_if, write_status};

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Data format document to check (`-` for standard input).
    pub document: PathBuf,
}

pub fn run_schema(args: &SchemaArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let text = read_input(&args.document)?;

    let mut form = SchemaForm::new()?;
    form.validator_mut()
        .repository_mut()
        .set_metaschema_version(config.metaschema_version.clone());
    if config.display_metaschema {
        form.toggle_metaschema();
    }
    write_metaschema_if(
        out,
        form.toggle().is_displayed(),
        config.output,
        form.metaschema_text(),
    )?;

    let status = form.on_schema_change(&text);
    tracing::info!(document = %args.document.display(), status = %status.message, "schema checked");

    match config.output {
        OutputFormat::Json => write_json(out, status)?,
        OutputFormat::Text => write_status(out, "schema", status)?,
    }

    if status.message == VALID_DATA_FORMAT_SCHEMA {
        Ok(0)
    } else {
        Ok(1)
    }
}
