//! # Form Status
//!
//! The user-visible state of one form field: a status line plus the
//! detail messages under it. Both are replaced together on every event.
//!
//! The status strings are shown verbatim, spacing included, and are
//! matched by existing tooling.

use dftool_schema::MessageList;
use serde::Serialize;

/// The document satisfies the meta-schema.
pub const VALID_DATA_FORMAT_SCHEMA: &str = "Valid Data Format Schema";

/// The document fails the meta-schema (document form).
pub const INVALID_DATA_FORMAT_SCHEMA: &str = "Invalid Data Format Schema";

/// The document fails the meta-schema (schema viewer).
pub const INVALID_DATA_FORMAT_SCHEMA_VIEWER: &str = "Invalid Data Format Schema:";

/// The document form only accepts documents with an embedded JSON Schema.
pub const MUST_SPECIFY_JSONSCHEMA: &str = "Invalid Schema - must specify jsonschema";

/// A payload cannot be checked until a valid document has been entered.
/// Shown for an empty document, a rejected `$schema`, or a payload entered
/// before any document passed.
pub const ENTER_VALID_SCHEMA: &str = "Enter a Valid Schema";

/// Demotion shown when the document is malformed, lacks `jsonschema`, or
/// fails the meta-schema. The lower-case "valid" is part of the string.
pub const ENTER_VALID_SCHEMA_LOWER: &str = "Enter a valid Schema";

pub const JSON_INPUT_VALIDATED: &str = "JSON Input Validated";

pub const JSON_INPUT_MISMATCH: &str = "JSON Input does not match Schema:";

/// Prefix of the status shown when the embedded schema cannot be compiled
/// or run. The engine's reason follows directly, with no separator.
pub const UNEXPECTED_VALIDATION_ERROR: &str = "Unexpected Schema Validation Error";

/// Status line plus detail messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub message: String,
    pub details: MessageList,
}

impl FormStatus {
    /// Blank status: no message, no details.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Set the status line and drop any details.
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.details = MessageList::new();
    }

    pub fn set_with_details(&mut self, message: impl Into<String>, details: MessageList) {
        self.message = message.into();
        self.details = details;
    }

    /// True when nothing is shown.
    pub fn is_blank(&self) -> bool {
        self.message.is_empty() && self.details.is_empty()
    }
}
