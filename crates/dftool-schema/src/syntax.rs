//! # JSON Syntax Checker
//!
//! Parses raw text as JSON and remembers the outcome as a single status
//! message. The slot is overwritten on every call, so callers must read
//! [`JsonSyntaxChecker::message`] before checking the next input.

use serde_json::Value;

use crate::error::SchemaError;

/// Status message recorded after a successful parse.
pub const VALID_JSON: &str = "Valid JSON";

/// Prefix of the status message recorded after a failed parse.
pub const INVALID_JSON_PREFIX: &str = "Invalid JSON: ";

/// Parse `text` as JSON, mapping parser failures to [`SchemaError::InvalidJson`].
pub fn parse_json(text: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(text).map_err(|e| SchemaError::InvalidJson {
        reason: e.to_string(),
    })
}

/// Single-slot JSON syntax checker.
#[derive(Debug, Clone, Default)]
pub struct JsonSyntaxChecker {
    last_message: String,
}

impl JsonSyntaxChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `text` is well-formed JSON.
    ///
    /// On success the status becomes [`VALID_JSON`]; on failure it becomes
    /// [`INVALID_JSON_PREFIX`] followed by the parser's description.
    pub fn validate(&mut self, text: &str) -> bool {
        self.check(text).is_some()
    }

    /// Like [`validate`](Self::validate), but hands back the parsed value.
    pub fn check(&mut self, text: &str) -> Option<Value> {
        match parse_json(text) {
            Ok(value) => {
                self.last_message = VALID_JSON.to_string();
                Some(value)
            }
            Err(e) => {
                tracing::debug!(len = text.len(), error = %e, "json syntax check failed");
                self.last_message = e.to_string();
                None
            }
        }
    }

    /// The status message of the most recent check. Empty before the first.
    pub fn message(&self) -> &str {
        &self.last_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_json_sets_valid_marker() {
        let mut checker = JsonSyntaxChecker::new();
        assert!(checker.validate(r#"{"a": [1, 2, 3]}"#));
        assert_eq!(checker.message(), VALID_JSON);
    }

    #[test]
    fn invalid_json_sets_prefixed_message() {
        let mut checker = JsonSyntaxChecker::new();
        assert!(!checker.validate(r#""testjson": "teststring"}"#));
        assert!(checker.message().starts_with(INVALID_JSON_PREFIX));
        assert!(checker.message().len() > INVALID_JSON_PREFIX.len());
    }

    #[test]
    fn message_is_overwritten_not_accumulated() {
        let mut checker = JsonSyntaxChecker::new();
        assert!(!checker.validate("{"));
        assert!(checker.validate("[]"));
        assert_eq!(checker.message(), VALID_JSON);
        assert!(!checker.validate(""));
        assert!(checker.message().starts_with(INVALID_JSON_PREFIX));
        assert_eq!(checker.message().matches(INVALID_JSON_PREFIX).count(), 1);
    }

    #[test]
    fn scalars_are_valid_json() {
        let mut checker = JsonSyntaxChecker::new();
        assert!(checker.validate("42"));
        assert!(checker.validate("\"text\""));
        assert!(checker.validate(" null "));
    }

    #[test]
    fn check_returns_parsed_value() {
        let mut checker = JsonSyntaxChecker::new();
        let value = checker.check(r#"{"raw-text": "test"}"#).unwrap();
        assert_eq!(value["raw-text"], "test");
    }

    #[test]
    fn fresh_checker_has_empty_message() {
        assert_eq!(JsonSyntaxChecker::new().message(), "");
    }
}
