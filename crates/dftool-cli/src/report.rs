//! Report rendering shared by the subcommands.

use std::io::Write;

use anyhow::Result;
use dftool_forms::FormStatus;
use serde::Serialize;

use crate::config::OutputFormat;

/// Write one labelled status as text: `label: message`, then one indented
/// line per detail. Blank statuses are skipped.
pub fn write_status(out: &mut dyn Write, label: &str, status: &FormStatus) -> Result<()> {
    if status.is_blank() {
        return Ok(());
    }
    writeln!(out, "{label}: {}", status.message)?;
    for detail in &status.details {
        writeln!(out, "  - {detail}")?;
    }
    Ok(())
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Write the meta-schema ahead of a report, when asked to.
pub fn write_metaschema_if(
    out: &mut dyn Write,
    display: bool,
    format: OutputFormat,
    text: &str,
) -> Result<()> {
    if display && format == OutputFormat::Text {
        writeln!(out, "{text}")?;
    }
    Ok(())
}
