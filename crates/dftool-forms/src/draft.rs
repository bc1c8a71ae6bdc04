//! # Draft Policy
//!
//! Which `$schema` URIs a form accepts for a document's embedded
//! `jsonschema`. The schema viewer accepts draft-04 and draft-06; the
//! document form accepts draft-04 only, because payloads are always
//! compiled with the draft-04 engine.

use dftool_schema::{DRAFT_04_URI, DRAFT_06_URI};
use serde_json::Value;

const VERSION_MUST_BE_04: &str =
    "Invalid JSON Schema Data Format -  jsonschema$schema version must be 04";
const VERSION_MUST_BE_04_OR_06: &str =
    "Invalid JSON Schema Data Format -  jsonschema$schema version must be 04 or 06";
const MUST_SPECIFY_SCHEMA: &str =
    "Invalid JSON Schema Data Format -  jsonschema$schema must specified";
const MUST_BE_SPECIFIED_SCHEMA: &str =
    "Invalid JSON Schema Data Format -  jsonschema$schema must be specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPolicy {
    /// Only draft-04 (document form).
    Draft04Only,
    /// Draft-04 or draft-06 (schema viewer).
    Draft04Or06,
}

impl DraftPolicy {
    /// The accepted `$schema` URIs.
    pub fn accepted(&self) -> &'static [&'static str] {
        match self {
            Self::Draft04Only => &[DRAFT_04_URI],
            Self::Draft04Or06 => &[DRAFT_04_URI, DRAFT_06_URI],
        }
    }

    pub fn accepts(&self, uri: &str) -> bool {
        self.accepted().contains(&uri)
    }

    /// Status shown when `$schema` names an unaccepted draft.
    pub fn version_mismatch_message(&self) -> &'static str {
        match self {
            Self::Draft04Only => VERSION_MUST_BE_04,
            Self::Draft04Or06 => VERSION_MUST_BE_04_OR_06,
        }
    }

    /// Status shown when `$schema` is absent.
    pub fn missing_schema_message(&self) -> &'static str {
        match self {
            Self::Draft04Only => MUST_SPECIFY_SCHEMA,
            Self::Draft04Or06 => MUST_BE_SPECIFIED_SCHEMA,
        }
    }

    /// Check the `$schema` of an embedded `jsonschema` value, returning the
    /// status message to show when it is missing or not accepted.
    ///
    /// A non-string `$schema` counts as a version mismatch.
    pub fn check(&self, embedded: &Value) -> Result<(), &'static str> {
        match embedded.get("$schema") {
            None => Err(self.missing_schema_message()),
            Some(Value::String(uri)) if self.accepts(uri) => Ok(()),
            Some(_) => Err(self.version_mismatch_message()),
        }
    }
}
