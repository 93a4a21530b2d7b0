//! Error types for request validation.

use thiserror::Error;

/// A request failed its preconditions and was not sent.
///
/// Carries a headline message plus one entry per unmet precondition,
/// in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: {}", .failures.join("; "))]
pub struct ValidationError {
    message: String,
    failures: Vec<String>,
    code: i32,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, failures: Vec<String>) -> Self {
        Self::with_code(message, failures, 0)
    }

    pub fn with_code(message: impl Into<String>, failures: Vec<String>, code: i32) -> Self {
        ValidationError {
            message: message.into(),
            failures,
            code,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}
