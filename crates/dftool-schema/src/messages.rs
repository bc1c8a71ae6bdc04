//! Ordered, de-duplicated list of user-facing validation messages.

use serde::Serialize;

use crate::engine::Violation;

/// Messages in first-seen order. A message equal (as a string) to one
/// already collected is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageList(Vec<String>);

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the list shown for a failed validation pass.
    pub fn from_violations<'a>(violations: impl IntoIterator<Item = &'a Violation>) -> Self {
        let mut list = Self::new();
        for violation in violations {
            list.push(violation.display_message());
        }
        list
    }

    /// A list holding one message.
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// Append `message` unless it is already present. Returns whether it
    /// was added.
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.0.contains(&message) {
            return false;
        }
        self.0.push(message);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
