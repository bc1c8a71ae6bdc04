//! # Schema Viewer Form
//!
//! Checks a data format document on its own, without a payload. Any of the
//! four document variants is accepted; when the document embeds a
//! `jsonschema`, its `$schema` must be draft-04 or draft-06.

use dftool_schema::{DataFormatValidator, JsonSyntaxChecker, SchemaError};
use serde_json::Value;

use crate::draft::DraftPolicy;
use crate::status::{FormStatus, INVALID_DATA_FORMAT_SCHEMA_VIEWER, VALID_DATA_FORMAT_SCHEMA};
use crate::toggle::MetaSchemaToggle;

#[derive(Debug, Clone)]
pub struct SchemaForm {
    validator: DataFormatValidator,
    syntax: JsonSyntaxChecker,
    toggle: MetaSchemaToggle,
    document: String,
    schema: FormStatus,
}

impl SchemaForm {
    pub const DRAFT_POLICY: DraftPolicy = DraftPolicy::Draft04Or06;

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
            schema: FormStatus::default(),
        }
    }

    /// Handle a change of the document text.
    pub fn on_schema_change(&mut self, text: &str) -> &FormStatus {
        self.schema.clear();
        self.document = text.to_string();
        if text.is_empty() {
            return &self.schema;
        }

        let Some(document) = self.syntax.check(text) else {
            self.schema.set(self.syntax.message());
            return &self.schema;
        };

        if let Some(embedded) = document.get("jsonschema") {
            if let Err(message) = Self::DRAFT_POLICY.check(embedded) {
                self.schema.set(message);
                return &self.schema;
            }
        }

        self.check_against_metaschema(&document);
        tracing::debug!(status = %self.schema.message, "schema viewer updated");
        &self.schema
    }

    fn check_against_metaschema(&mut self, document: &Value) {
        let result = self.validator.check_value(document);
        if result.valid {
            self.schema.set(VALID_DATA_FORMAT_SCHEMA);
        } else {
            self.schema
                .set_with_details(INVALID_DATA_FORMAT_SCHEMA_VIEWER, result.messages);
        }
    }

    pub fn toggle_metaschema(&mut self) -> &'static str {
        self.toggle.toggle()
    }

    pub fn toggle(&self) -> &MetaSchemaToggle {
        &self.toggle
    }

    /// The meta-schema text, formatted for display.
    pub fn metaschema_text(&self) -> &str {
        self.validator.repository().current_metaschema_formatted()
    }

    pub fn validator_mut(&mut self) -> &mut DataFormatValidator {
        &mut self.validator
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn status(&self) -> &FormStatus {
        &self.schema
    }
}
