//! # Data Format Document Form
//!
//! Two inputs: a data format document that must embed a draft-04
//! `jsonschema`, and a sample payload checked against that schema.
//!
//! ## Events
//!
//! - **Document changed.** The document goes through syntax, `jsonschema`
//!   presence, draft-04 `$schema`, and meta-schema checks, stopping at the
//!   first failure. On failure, a payload that was previously well-formed
//!   is demoted to [`ENTER_VALID_SCHEMA`] (empty document, `$schema`
//!   failures) or [`ENTER_VALID_SCHEMA_LOWER`] (malformed document, no
//!   `jsonschema`, meta-schema failure). On success the document becomes
//!   the current snapshot and a well-formed payload is re-checked at once.
//! - **Payload changed.** The payload is checked against the embedded
//!   schema of the last document that passed, never against the raw text
//!   currently in the document field.
//!
//! Each event recomputes the affected statuses completely.

use dftool_schema::{run_schema, DataFormatValidator, JsonSyntaxChecker, SchemaError};
use serde::Serialize;
use serde_json::Value;

use crate::draft::DraftPolicy;
use crate::status::{
    FormStatus, ENTER_VALID_SCHEMA, ENTER_VALID_SCHEMA_LOWER, INVALID_DATA_FORMAT_SCHEMA,
    JSON_INPUT_MISMATCH,
    JSON_INPUT_VALIDATED, MUST_SPECIFY_JSONSCHEMA, UNEXPECTED_VALIDATION_ERROR,
    VALID_DATA_FORMAT_SCHEMA,
};
use crate::toggle::MetaSchemaToggle;

/// Both statuses of a [`DataFormatForm`], for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub schema: FormStatus,
    pub payload: FormStatus,
}

/// A document that did not pass, and what a well-formed payload shows
/// because of it.
struct Rejection {
    /// `None` for an empty document, which shows no status.
    status: Option<FormStatus>,
    demote_to: &'static str,
}

impl Rejection {
    fn new(message: impl Into<String>, demote_to: &'static str) -> Self {
        let mut status = FormStatus::default();
        status.set(message);
        Self {
            status: Some(status),
            demote_to,
        }
    }

    fn empty() -> Self {
        Self {
            status: None,
            demote_to: ENTER_VALID_SCHEMA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataFormatForm {
    validator: DataFormatValidator,
    syntax: JsonSyntaxChecker,
    toggle: MetaSchemaToggle,
    document: String,
    payload: String,
    schema_status: FormStatus,
    payload_status: FormStatus,
    /// Last document that passed every check.
    valid_document: Option<Value>,
    /// Whether the current payload text is well-formed JSON.
    payload_well_formed: bool,
}

impl DataFormatForm {
    pub const DRAFT_POLICY: DraftPolicy = DraftPolicy::Draft04Only;

    /// # Errors
    ///
    /// Fails only if the bundled meta-schema cannot be loaded.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self::with_validator(DataFormatValidator::new()?))
    }

    pub fn with_validator(validator: DataFormatValidator) -> Self {
        Self {
            validator,
            syntax: JsonSyntaxChecker::new(),
            toggle: MetaSchemaToggle::default(),
            document: String::new(),
            payload: String::new(),
            schema_status: FormStatus::default(),
            payload_status: FormStatus::default(),
            valid_document: None,
            payload_well_formed: false,
        }
    }

    /// Handle a change of the document text.
    pub fn on_schema_change(&mut self, text: &str) -> &FormStatus {
        self.schema_status.clear();
        self.valid_document = None;
        self.document = text.to_string();

        match self.check_document(text) {
            Ok(document) => {
                self.schema_status.set(VALID_DATA_FORMAT_SCHEMA);
                self.valid_document = Some(document);
                if self.payload_well_formed {
                    self.validate_payload();
                }
            }
            Err(rejection) => {
                if let Some(status) = rejection.status {
                    self.schema_status = status;
                }
                self.demote_payload(rejection.demote_to);
            }
        }

        tracing::debug!(
            status = %self.schema_status.message,
            details = self.schema_status.details.len(),
            "document status updated"
        );
        &self.schema_status
    }

    /// Run the document checks in order, stopping at the first failure.
    fn check_document(&mut self, text: &str) -> Result<Value, Rejection> {
        if text.is_empty() {
            return Err(Rejection::empty());
        }

        let Some(document) = self.syntax.check(text) else {
            return Err(Rejection::new(self.syntax.message(), ENTER_VALID_SCHEMA_LOWER));
        };

        let Some(embedded) = document.get("jsonschema") else {
            return Err(Rejection::new(MUST_SPECIFY_JSONSCHEMA, ENTER_VALID_SCHEMA_LOWER));
        };

        if let Err(message) = Self::DRAFT_POLICY.check(embedded) {
            return Err(Rejection::new(message, ENTER_VALID_SCHEMA));
        }

        let result = self.validator.check_value(&document);
        if !result.valid {
            let mut status = FormStatus::default();
            status.set_with_details(INVALID_DATA_FORMAT_SCHEMA, result.messages);
            return Err(Rejection {
                status: Some(status),
                demote_to: ENTER_VALID_SCHEMA_LOWER,
            });
        }
        Ok(document)
    }

    fn demote_payload(&mut self, message: &'static str) {
        if self.payload_well_formed {
            self.payload_status.set(message);
        }
    }

    /// Handle a change of the payload text.
    pub fn on_payload_change(&mut self, text: &str) -> &FormStatus {
        self.payload = text.to_string();
        self.validate_payload();
        &self.payload_status
    }

    fn validate_payload(&mut self) {
        self.payload_status.clear();
        self.payload_well_formed = false;
        if self.payload.is_empty() {
            return;
        }

        let Some(payload) = self.syntax.check(&self.payload) else {
            self.payload_status.set(self.syntax.message());
            return;
        };
        self.payload_well_formed = true;

        let Some(document) = &self.valid_document else {
            self.payload_status.set(ENTER_VALID_SCHEMA);
            return;
        };
        let embedded = &document["jsonschema"];
        if let Err(message) = Self::DRAFT_POLICY.check(embedded) {
            self.payload_status.set(message);
            return;
        }

        match run_schema(self.validator.engine(), embedded, &payload) {
            Ok(result) if result.valid => self.payload_status.set(JSON_INPUT_VALIDATED),
            Ok(result) => self
                .payload_status
                .set_with_details(JSON_INPUT_MISMATCH, result.messages),
            Err(e) => {
                tracing::warn!(error = %e, "embedded schema could not be applied");
                self.payload_status
                    .set(format!("{UNEXPECTED_VALIDATION_ERROR}{e}"));
            }
        }
        tracing::debug!(status = %self.payload_status.message, "payload status updated");
    }

    pub fn toggle_metaschema(&mut self) -> &'static str {
        self.toggle.toggle()
    }

    pub fn toggle(&self) -> &MetaSchemaToggle {
        &self.toggle
    }

    pub fn metaschema_text(&self) -> &str {
        self.validator.repository().current_metaschema_formatted()
    }

    pub fn validator_mut(&mut self) -> &mut DataFormatValidator {
        &mut self.validator
    }

    pub fn schema_status(&self) -> &FormStatus {
        &self.schema_status
    }

    pub fn payload_status(&self) -> &FormStatus {
        &self.payload_status
    }

    /// The last document that passed every check.
    pub fn valid_document(&self) -> Option<&Value> {
        self.valid_document.as_ref()
    }

    pub fn report(&self) -> FormReport {
        FormReport {
            schema: self.schema_status.clone(),
            payload: self.payload_status.clone(),
        }
    }
}
