//! # dftool-schema: Data Format Schema Validation
//!
//! Checks data format specification documents, the JSON documents that
//! describe what a component publishes or consumes, and the sample
//! payloads written against them.
//!
//! ## Pipeline
//!
//! 1. [`JsonSyntaxChecker`]: is the text JSON at all?
//! 2. [`DataFormatValidator`]: does the document satisfy the data-format
//!    meta-schema held by [`MetaSchemaRepository`]?
//! 3. [`run_schema`]: does a payload satisfy the document's embedded
//!    `jsonschema`?
//!
//! Steps 2 and 3 go through the [`SchemaEngine`] seam. The production
//! engine, [`Draft4Engine`], reads every schema with draft-04 semantics.
//!
//! ## Crate Policy
//!
//! - Validation never fails the caller: malformed input, schema
//!   violations, and engine failures all end as a [`ValidationResult`].
//! - The meta-schema documents are compiled into the crate from
//!   `schemas/`; nothing is loaded from disk or network at run time.

pub mod document;
pub mod engine;
pub mod error;
pub mod messages;
pub mod metaschema;
pub mod syntax;
pub mod validate;

pub use document::{DataFormatBody, DataFormatDocument, FieldDescriptor, FieldType};
pub use engine::{CompiledSchema, Draft4Engine, Outcome, SchemaEngine, Violation};
pub use error::SchemaError;
pub use messages::MessageList;
pub use metaschema::{MetaSchemaRepository, DRAFT_04_URI, DRAFT_06_URI};
pub use syntax::{parse_json, JsonSyntaxChecker, INVALID_JSON_PREFIX, VALID_JSON};
pub use validate::{run_schema, DataFormatValidator, ValidationResult};
