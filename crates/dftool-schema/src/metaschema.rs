//! # Meta-Schema Repository
//!
//! Holds the data-format meta-schema, the schema every data format
//! specification document must satisfy, together with the draft-04 core
//! meta-schema the validation engine treats as its canonical dialect.
//!
//! Both documents live in `schemas/` at the repository root and are
//! compiled into the binary. They are parsed once, when the repository is
//! constructed, and never change afterwards.
//!
//! The version label is cosmetic. Setting it is accepted and remembered,
//! but the same v1.0 document is served whatever the label says.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::SchemaError;

const DATAFORMAT_METASCHEMA_V1: &str = include_str!("../../../schemas/dataformat.metaschema.json");
const DRAFT_04_METASCHEMA: &str = include_str!("../../../schemas/draft-04.schema.json");

/// `$schema` URI of JSON Schema draft-04.
pub const DRAFT_04_URI: &str = "http://json-schema.org/draft-04/schema#";

/// `$schema` URI of JSON Schema draft-06.
pub const DRAFT_06_URI: &str = "http://json-schema.org/draft-06/schema#";

/// Version label a new repository starts with.
pub const DEFAULT_METASCHEMA_VERSION: &str = "1.0";

/// Labels offered for selection.
pub const METASCHEMA_VERSIONS: &[&str] = &["1.0", "1.1 test only"];

/// The fixed data-format meta-schema and its draft-04 dialect.
#[derive(Debug, Clone)]
pub struct MetaSchemaRepository {
    metaschema: Value,
    formatted: String,
    draft04: Value,
    version: String,
}

impl MetaSchemaRepository {
    /// Parse the bundled documents.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MetaSchemaLoad`] if a bundled document is not
    /// valid JSON.
    pub fn new() -> Result<Self, SchemaError> {
        let metaschema = load_bundled("dataformat.metaschema.json", DATAFORMAT_METASCHEMA_V1)?;
        let draft04 = load_bundled("draft-04.schema.json", DRAFT_04_METASCHEMA)?;
        let formatted =
            to_tab_indented(&metaschema).map_err(|reason| SchemaError::MetaSchemaLoad {
                name: "dataformat.metaschema.json",
                reason,
            })?;

        Ok(Self {
            metaschema,
            formatted,
            draft04,
            version: DEFAULT_METASCHEMA_VERSION.to_string(),
        })
    }

    /// The meta-schema every data format document is validated against.
    pub fn current_metaschema(&self) -> &Value {
        &self.metaschema
    }

    /// The meta-schema pretty-printed with a tab indent.
    pub fn current_metaschema_formatted(&self) -> &str {
        &self.formatted
    }

    /// The bundled draft-04 core meta-schema.
    pub fn draft04_metaschema(&self) -> &Value {
        &self.draft04
    }

    pub fn metaschema_version(&self) -> &str {
        &self.version
    }

    /// Record a new version label. Always succeeds; the served document
    /// does not change.
    pub fn set_metaschema_version(&mut self, version: impl Into<String>) -> bool {
        let version = version.into();
        tracing::info!(from = %self.version, to = %version, "metaschema version label changed");
        self.version = version;
        true
    }

    pub fn metaschema_versions(&self) -> &'static [&'static str] {
        METASCHEMA_VERSIONS
    }
}

fn load_bundled(name: &'static str, text: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(text).map_err(|e| SchemaError::MetaSchemaLoad {
        name,
        reason: e.to_string(),
    })
}

fn to_tab_indented(value: &Value) -> Result<String, String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser).map_err(|e| e.to_string())?;
    String::from_utf8(buf).map_err(|e| e.to_string())
}
