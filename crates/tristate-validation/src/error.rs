//! Validation error types and aggregation

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The validated value was not a record
    Structural,
    /// An empty field carried the `required` rule
    Required,
    /// A non-empty field failed a simple or parameterized rule
    RuleViolation,
    /// A custom-type validator rejected the field
    CustomType,
    /// A string rule was applied to a non-string field
    UnsupportedRule,
}

/// A single field failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as declared on the record
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// Whether `message` is used verbatim, without the field name prefix
    pub custom_message: bool,
    pub kind: FailureKind,
}

impl FieldError {
    /// Create a field error with a generated message
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            custom_message: false,
            kind,
        }
    }

    /// Create a field error whose message is rendered verbatim
    pub fn custom(field: impl Into<String>, message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            custom_message: true,
            ..Self::new(field, message, kind)
        }
    }

    /// Error for a value that is not a record at all
    pub fn structural(found: &str) -> Self {
        Self::custom(
            "",
            format!("function only accepts records; got {}", found),
            FailureKind::Structural,
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.custom_message {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Ordered collection of field failures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append a failure, keeping insertion order
    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Append every failure of another collection
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Errors recorded for one field
    pub fn field_errors<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            write!(f, "{};", error)?;
        }
        Ok(())
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors raised while registering rules
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid pattern for rule '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Lock error on resource: {resource}")]
    LockError { resource: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_message() {
        let cases = vec![
            (ValidationErrors::new(), ""),
            (
                ValidationErrors::from(FieldError::custom("a", "Error 1", FailureKind::RuleViolation)),
                "Error 1;",
            ),
            (
                vec![
                    FieldError::new("Custom error name", "Custom error", FailureKind::RuleViolation),
                    FieldError::custom("b", "Error 2", FailureKind::Required),
                ]
                .into_iter()
                .collect(),
                "Custom error name: Custom error;Error 2;",
            ),
            (
                vec![
                    FieldError::custom("a", "Error 123", FailureKind::CustomType),
                    FieldError::custom("c", "Custom error2", FailureKind::CustomType),
                ]
                .into_iter()
                .collect(),
                "Error 123;Custom error2;",
            ),
        ];

        for (errors, expected) in cases {
            assert_eq!(errors.to_string(), expected);
        }
    }

    #[test]
    fn test_field_lookup() {
        let mut errors = ValidationErrors::new();
        errors.add(FieldError::new("name", "too long", FailureKind::RuleViolation));
        errors.add(FieldError::custom("age", "non zero value required", FailureKind::Required));
        errors.add(FieldError::new("name", "bad", FailureKind::RuleViolation));

        assert_eq!(errors.len(), 3);
        assert!(errors.has_field_errors("age"));
        assert!(!errors.has_field_errors("email"));
        assert_eq!(errors.field_errors("name").count(), 2);
    }

    #[test]
    fn test_structural_error_renders_without_field() {
        let error = FieldError::structural("i64");
        assert_eq!(error.to_string(), "function only accepts records; got i64");
        assert_eq!(error.kind, FailureKind::Structural);
    }
}
