//! # dftool-forms: Data Format Form Controllers
//!
//! Headless versions of the two data format forms. Each form owns its
//! state as an explicit record (status line plus details per field, the
//! last valid document) and updates it synchronously, one input event at
//! a time.
//!
//! - [`SchemaForm`]: checks a document on its own. Any variant is
//!   accepted; an embedded `jsonschema` may be draft-04 or draft-06.
//! - [`DataFormatForm`]: checks a document that must embed a draft-04
//!   `jsonschema`, and a sample payload against it.
//!
//! Both forms carry a [`MetaSchemaToggle`] for showing the meta-schema.
//!
//! ## Crate Policy
//!
//! - Validation is delegated to `dftool-schema`; this crate only sequences
//!   the checks and chooses the status text.
//! - Status strings are part of the interface and are kept verbatim.

pub mod document_form;
pub mod draft;
pub mod schema_form;
pub mod status;
pub mod toggle;

pub use document_form::{DataFormatForm, FormReport};
pub use draft::DraftPolicy;
pub use schema_form::SchemaForm;
pub use status::FormStatus;
pub use toggle::MetaSchemaToggle;
