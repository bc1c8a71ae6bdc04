//! # Data Format Document Model
//!
//! Typed view of a data format specification document. A document carries
//! an identity block (`self`), the `dataformatversion` it was written
//! against, and exactly one description of its payload:
//!
//! | Key               | Variant                         |
//! |-------------------|---------------------------------|
//! | `jsonschema`      | [`DataFormatBody::JsonSchema`]   |
//! | `reference`       | [`DataFormatBody::Reference`]    |
//! | `delimitedschema` | [`DataFormatBody::Delimited`]    |
//! | `unstructured`    | [`DataFormatBody::Unstructured`] |
//!
//! The meta-schema is what enforces "exactly one variant, no extra keys".
//! Decode documents only after they have passed
//! [`crate::DataFormatValidator`]; decoding does not repeat those checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// A data format specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFormatDocument {
    #[serde(rename = "self")]
    pub identity: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataformatversion: Option<String>,
    #[serde(flatten)]
    pub body: DataFormatBody,
}

impl DataFormatDocument {
    /// Decode a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Decode`] if the value does not have the
    /// document's shape.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        Ok(Self::deserialize(value)?)
    }

    /// One-line description: `name version (variant)`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} ({})",
            self.identity.name,
            self.identity.version,
            self.body.kind()
        )
    }
}

/// Identifying information of a data format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    /// Semantic version, `major.minor.patch`.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The payload description carried by a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataFormatBody {
    /// An embedded JSON Schema.
    #[serde(rename = "jsonschema")]
    JsonSchema(Value),
    /// A pointer to an externally defined schema.
    #[serde(rename = "reference")]
    Reference(ExternalReference),
    /// Delimited records.
    #[serde(rename = "delimitedschema")]
    Delimited(DelimitedSchema),
    /// Free text in a given encoding.
    #[serde(rename = "unstructured")]
    Unstructured(UnstructuredText),
}

impl DataFormatBody {
    /// The document key naming this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JsonSchema(_) => "jsonschema",
            Self::Reference(_) => "reference",
            Self::Delimited(_) => "delimitedschema",
            Self::Unstructured(_) => "unstructured",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    pub name: String,
    pub version: String,
    pub format: ReferenceFormat,
}

/// Format of an externally referenced schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceFormat {
    #[serde(rename = "JSON")]
    Json,
    DelimitedFormat,
    #[serde(rename = "XML")]
    Xml,
    Unstructured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimitedSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<Delimiter>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "|")]
    Pipe,
    #[serde(rename = "\t")]
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Self::Comma => ',',
            Self::Pipe => '|',
            Self::Tab => '\t',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstructuredText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TextEncoding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "ASCII")]
    Ascii,
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-16")]
    Utf16,
    #[serde(rename = "UTF-32")]
    Utf32,
}

/// One field of a delimited record.
///
/// The numeric constraints, `fieldPattern` included, are integers in the
/// v1.0 meta-schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fieldtype: Option<FieldType>,
    #[serde(rename = "fieldPattern", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<i64>,
    #[serde(rename = "fieldMaxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(rename = "fieldMinLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(rename = "fieldMinimum", default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(rename = "fieldMaximum", default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

/// XML Schema primitive and derived type names allowed for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum FieldType {
    String,
    Boolean,
    Decimal,
    Float,
    Double,
    Duration,
    DateTime,
    Time,
    Date,
    GYearMonth,
    GYear,
    GMonthDay,
    GDay,
    GMonth,
    HexBinary,
    Base64Binary,
    AnyUri,
    QName,
    Notation,
    NormalizedString,
    Token,
    Language,
    IdRefs,
    Entities,
    NmToken,
    NmTokens,
    Name,
    NcName,
    Id,
    IdRef,
    Entity,
    Integer,
    NonPositiveInteger,
    NegativeInteger,
    Long,
    Int,
    Short,
    Byte,
    NonNegativeInteger,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    PositiveInteger,
}

/// Number of field types.
pub const FIELD_TYPE_COUNT: usize = 44;

impl FieldType {
    /// All field types in meta-schema order.
    pub fn all() -> &'static [FieldType] {
        &[
            Self::String,
            Self::Boolean,
            Self::Decimal,
            Self::Float,
            Self::Double,
            Self::Duration,
            Self::DateTime,
            Self::Time,
            Self::Date,
            Self::GYearMonth,
            Self::GYear,
            Self::GMonthDay,
            Self::GDay,
            Self::GMonth,
            Self::HexBinary,
            Self::Base64Binary,
            Self::AnyUri,
            Self::QName,
            Self::Notation,
            Self::NormalizedString,
            Self::Token,
            Self::Language,
            Self::IdRefs,
            Self::Entities,
            Self::NmToken,
            Self::NmTokens,
            Self::Name,
            Self::NcName,
            Self::Id,
            Self::IdRef,
            Self::Entity,
            Self::Integer,
            Self::NonPositiveInteger,
            Self::NegativeInteger,
            Self::Long,
            Self::Int,
            Self::Short,
            Self::Byte,
            Self::NonNegativeInteger,
            Self::UnsignedLong,
            Self::UnsignedInt,
            Self::UnsignedShort,
            Self::UnsignedByte,
            Self::PositiveInteger,
        ]
    }

    /// The name used in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Double => "double",
            Self::Duration => "duration",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::Date => "date",
            Self::GYearMonth => "gYearMonth",
            Self::GYear => "gYear",
            Self::GMonthDay => "gMonthDay",
            Self::GDay => "gDay",
            Self::GMonth => "gMonth",
            Self::HexBinary => "hexBinary",
            Self::Base64Binary => "base64Binary",
            Self::AnyUri => "anyURI",
            Self::QName => "QName",
            Self::Notation => "NOTATION",
            Self::NormalizedString => "normalizedString",
            Self::Token => "token",
            Self::Language => "language",
            Self::IdRefs => "IDREFS",
            Self::Entities => "ENTITIES",
            Self::NmToken => "NMTOKEN",
            Self::NmTokens => "NMTOKENS",
            Self::Name => "Name",
            Self::NcName => "NCName",
            Self::Id => "ID",
            Self::IdRef => "IDREF",
            Self::Entity => "ENTITY",
            Self::Integer => "integer",
            Self::NonPositiveInteger => "nonPositiveInteger",
            Self::NegativeInteger => "negativeInteger",
            Self::Long => "long",
            Self::Int => "int",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::NonNegativeInteger => "nonNegativeInteger",
            Self::UnsignedLong => "unsignedLong",
            Self::UnsignedInt => "unsignedInt",
            Self::UnsignedShort => "unsignedShort",
            Self::UnsignedByte => "unsignedByte",
            Self::PositiveInteger => "positiveInteger",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Case-sensitive, accepting exactly the names produced by [`FieldType::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown field type: {s:?}"))
    }
}

impl TryFrom<String> for FieldType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldType> for &'static str {
    fn from(t: FieldType) -> Self {
        t.as_str()
    }
}
