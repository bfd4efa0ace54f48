//! Validation outcome types.

use serde::Serialize;
use thiserror::Error;

/// A single failed rule, scoped to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field the issue belongs to, e.g. `"wallet_address"`.
    pub path: String,
    /// Translated message shown next to the field.
    pub message: String,
}

/// Every issue found while validating one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} validation issue(s): {}", .issues.len(), describe(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

fn describe(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// First message recorded for `path`.
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| i.path == path)
            .map(|i| i.message.as_str())
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A built schema.
///
/// Builders resolve every message up front, so validating never touches the
/// translator.
pub trait Validator {
    type Candidate;
    type Output;

    fn validate(&self, candidate: &Self::Candidate) -> Result<Self::Output, ValidationErrors>;
}

/// Record `message` under `path` when `value` is empty.
pub(crate) fn require_text(errors: &mut ValidationErrors, path: &str, value: &str, message: &str) {
    if value.is_empty() {
        errors.push(path, message);
    }
}
