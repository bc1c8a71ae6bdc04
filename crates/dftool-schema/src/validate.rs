//! # Data-Format Schema Validator
//!
//! Checks a data format specification document in two steps:
//!
//! 1. The text must be well-formed JSON. If it is not, the syntax
//!    checker's message becomes the only error.
//! 2. The parsed document is validated against the data-format meta-schema
//!    with the draft-04 engine. Every violation is turned into a message
//!    (`additionalProperties` violations get a `" - <property>"` suffix)
//!    and exact duplicates are dropped, keeping first-seen order.
//!
//! Engine failures are caught and reported as a single message. Nothing
//! here returns an error to the caller: every pass ends in a boolean plus
//! a message list, and both are replaced wholesale on the next pass.

use serde::Serialize;
use serde_json::Value;

use crate::engine::{CompiledSchema, Draft4Engine, SchemaEngine};
use crate::error::SchemaError;
use crate::messages::MessageList;
use crate::metaschema::MetaSchemaRepository;
use crate::syntax::JsonSyntaxChecker;

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// De-duplicated messages in first-seen order. Empty when valid.
    pub messages: MessageList,
}

impl ValidationResult {
    pub fn passed() -> Self {
        Self {
            valid: true,
            messages: MessageList::new(),
        }
    }

    pub fn failed(messages: MessageList) -> Self {
        Self {
            valid: false,
            messages,
        }
    }
}

/// Validate an already-parsed `instance` against `schema` with `engine`,
/// formatting violations the way every validator in this crate reports them.
///
/// # Errors
///
/// Returns the engine's error if `schema` cannot be compiled or run.
pub fn run_schema<E: SchemaEngine>(
    engine: &E,
    schema: &Value,
    instance: &Value,
) -> Result<ValidationResult, SchemaError> {
    let compiled = engine.compile(schema)?;
    let outcome = compiled.run(instance)?;
    for violation in &outcome.violations {
        tracing::trace!(schema_path = %violation.schema_path, "{violation}");
    }
    if outcome.valid {
        Ok(ValidationResult::passed())
    } else {
        Ok(ValidationResult::failed(MessageList::from_violations(
            &outcome.violations,
        )))
    }
}

/// Validator for data format specification documents.
#[derive(Debug, Clone)]
pub struct DataFormatValidator<E = Draft4Engine> {
    repository: MetaSchemaRepository,
    syntax: JsonSyntaxChecker,
    engine: E,
    last_errors: MessageList,
}

impl DataFormatValidator<Draft4Engine> {
    /// Create a validator over the bundled meta-schema and the draft-04 engine.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MetaSchemaLoad`] if a bundled document is unreadable.
    pub fn new() -> Result<Self, SchemaError> {
        let repository = MetaSchemaRepository::new()?;
        let engine = Draft4Engine::new(&repository);
        Ok(Self::with_engine(repository, engine))
    }
}

impl<E: SchemaEngine> DataFormatValidator<E> {
    pub fn with_engine(repository: MetaSchemaRepository, engine: E) -> Self {
        Self {
            repository,
            syntax: JsonSyntaxChecker::new(),
            engine,
            last_errors: MessageList::new(),
        }
    }

    /// Validate the document `text`. Messages are available from
    /// [`messages`](Self::messages) until the next call.
    pub fn validate(&mut self, text: &str) -> bool {
        let result = self.check(text);
        self.last_errors = result.messages;
        result.valid
    }

    /// Validate the document `text` and return the full result.
    pub fn check(&mut self, text: &str) -> ValidationResult {
        let Some(document) = self.syntax.check(text) else {
            let result = ValidationResult::failed(MessageList::single(self.syntax.message()));
            self.last_errors = result.messages.clone();
            return result;
        };
        let result = self.check_value(&document);
        tracing::debug!(
            len = text.len(),
            valid = result.valid,
            messages = result.messages.len(),
            "data format document validated"
        );
        result
    }

    /// Validate an already-parsed document against the meta-schema.
    pub fn check_value(&mut self, document: &Value) -> ValidationResult {
        let result = match run_schema(
            &self.engine,
            self.repository.current_metaschema(),
            document,
        ) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "meta-schema validation engine failed");
                ValidationResult::failed(MessageList::single(e.to_string()))
            }
        };
        self.last_errors = result.messages.clone();
        result
    }

    /// Messages from the most recent pass. Empty after a successful one.
    pub fn messages(&self) -> &MessageList {
        &self.last_errors
    }

    pub fn repository(&self) -> &MetaSchemaRepository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut MetaSchemaRepository {
        &mut self.repository
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
