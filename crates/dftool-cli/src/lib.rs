//! # dftool-cli: Data Format Tool Command-Line Interface
//!
//! Drives the data format forms from files instead of a browser page.
//!
//! ## Subcommands
//!
//! - `dftool metaschema`: print the meta-schema or the version labels.
//! - `dftool schema`: check a document with the schema viewer form.
//! - `dftool check`: check a document, and optionally a sample payload,
//!   with the document form.
//!
//! ```bash
//! dftool check formats/cuda-simple-json.json --payload formats/cuda-simple-json.payload.json
//! dftool --output json schema formats/cef-reference.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation logic lives in the form and
//!   schema crates.
//! - Handlers write reports to the writer they are given and return the
//!   process exit code: 0 when everything checked is valid, 1 otherwise.

pub mod check;
pub mod config;
pub mod metaschema;
pub mod report;
pub mod schema;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read an input file, or standard input when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("cannot read standard input")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
