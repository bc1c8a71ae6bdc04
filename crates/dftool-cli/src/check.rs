//! # Check Subcommand
//!
//! Runs a document, and optionally a sample payload, through the document
//! form. The payload is applied after the document, the same order a user
//! filling in the form would follow.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dftool_forms::status::{JSON_INPUT_VALIDATED, VALID_DATA_FORMAT_SCHEMA};
use dftool_forms::{DataFormatForm, FormStatus};
use dftool_schema::DataFormatDocument;
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::read_input;
use crate::report::{write_json, write_metaschema_if, write_status};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Data format document to check (`-` for standard input).
    pub document: PathBuf,

    /// Sample payload to check against the document's embedded schema.
    #[arg(long)]
    pub payload: Option<PathBuf>,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    schema: &'a FormStatus,
    payload: &'a FormStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

pub fn run_check(args: &CheckArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let document = read_input(&args.document)?;
    let payload = args.payload.as_deref().map(read_input).transpose()?;

    let mut form = DataFormatForm::new()?;
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

    form.on_schema_change(&document);
    if let Some(payload) = &payload {
        form.on_payload_change(payload);
    }

    let summary = form
        .valid_document()
        .and_then(|value| match DataFormatDocument::from_value(value) {
            Ok(doc) => Some(doc.summary()),
            Err(e) => {
                tracing::warn!(error = %e, "valid document did not decode");
                None
            }
        });

    let schema_status = form.schema_status();
    let payload_status = form.payload_status();
    tracing::info!(
        document = %args.document.display(),
        schema = %schema_status.message,
        payload = %payload_status.message,
        "document checked"
    );

    match config.output {
        OutputFormat::Json => write_json(
            out,
            &CheckReport {
                schema: schema_status,
                payload: payload_status,
                summary: summary.clone(),
            },
        )?,
        OutputFormat::Text => {
            write_status(out, "schema", schema_status)?;
            if let Some(summary) = &summary {
                writeln!(out, "format: {summary}")?;
            }
            write_status(out, "payload", payload_status)?;
        }
    }

    let schema_ok = schema_status.message == VALID_DATA_FORMAT_SCHEMA;
    let payload_ok = payload.is_none() || payload_status.message == JSON_INPUT_VALIDATED;
    if schema_ok && payload_ok {
        Ok(0)
    } else {
        Ok(1)
    }
}
