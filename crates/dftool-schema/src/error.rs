//! # Error Types
//!
//! Errors raised while checking data format documents. All of them are
//! recoverable: the validators turn each one into a status message rather
//! than letting it reach the caller as a failure.
//!
//! A document that parses but does not satisfy a schema is *not* an error.
//! That outcome is a [`crate::ValidationResult`] with `valid == false`.

use thiserror::Error;

/// Error during data format validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The text is not valid JSON.
    #[error("Invalid JSON: {reason}")]
    InvalidJson {
        /// The parser's description of the failure.
        reason: String,
    },

    /// The validation engine could not be configured or could not compile
    /// a schema.
    #[error("validator build error: {reason}")]
    EngineBuild {
        /// Reason reported by the engine.
        reason: String,
    },

    /// The validation engine failed while running a compiled schema.
    #[error("validator run error: {reason}")]
    EngineRun {
        /// Reason reported by the engine.
        reason: String,
    },

    /// A bundled schema document could not be parsed.
    #[error("bundled schema '{name}' is unreadable: {reason}")]
    MetaSchemaLoad {
        /// Name of the bundled document.
        name: &'static str,
        /// Parser failure.
        reason: String,
    },

    /// A validated document could not be decoded into the typed model.
    #[error("document decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SchemaError {
    /// True for the errors raised by the engine itself rather than by the
    /// input text.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, Self::EngineBuild { .. } | Self::EngineRun { .. })
    }
}
