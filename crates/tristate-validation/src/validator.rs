//! Validation engine
//!
//! Walks a record's visible fields in declaration order, dispatches each one and
//! folds the verdicts into an [`Outcome`]. Nested records are walked with the same
//! registry and their errors are appended to the parent's list.

use crate::config::ValidatorConfig;
use crate::dispatch::{Dispatcher, Verdict};
use crate::error::{FieldError, RegistryError, ValidationErrors};
use crate::record::Record;
use crate::registry::RuleRegistry;
use crate::value::FieldValue;
use std::sync::Arc;

/// Result of validating one record.
///
/// `passed` and `errors` are tracked separately: a field of a kind no rule
/// applies to fails without an error, so a failed outcome may carry no errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    passed: bool,
    errors: ValidationErrors,
}

impl Outcome {
    fn pass() -> Self {
        Self {
            passed: true,
            errors: ValidationErrors::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The collected errors, or `None` when there are none
    pub fn errors(&self) -> Option<&ValidationErrors> {
        if self.errors.is_empty() {
            None
        } else {
            Some(&self.errors)
        }
    }

    pub fn into_parts(self) -> (bool, Option<ValidationErrors>) {
        let errors = if self.errors.is_empty() {
            None
        } else {
            Some(self.errors)
        };
        (self.passed, errors)
    }

    /// `Ok(())` only when the record passed. A silent failure yields an empty
    /// error list.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.passed {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Record validator bound to a rule registry
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
}

impl Validator {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self { registry }
    }

    /// Validator over a fresh registry built from `config`
    pub fn with_config(config: &ValidatorConfig) -> Result<Self, RegistryError> {
        Ok(Self::new(Arc::new(RuleRegistry::with_config(config)?)))
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate every visible field of `record`
    pub fn validate(&self, record: &dyn Record) -> Outcome {
        run(&self.registry, record)
    }

    /// Validate an optional record; nothing to validate passes
    pub fn validate_option(&self, record: Option<&dyn Record>) -> Outcome {
        match record {
            Some(record) => self.validate(record),
            None => Outcome::pass(),
        }
    }

    /// Validate a dynamically shaped value, which must be a record or absent
    pub fn validate_value(&self, value: FieldValue<'_>) -> Outcome {
        match value {
            FieldValue::Record(record) => self.validate(record),
            FieldValue::Absent => Outcome::pass(),
            other => {
                tracing::debug!(found = other.type_name(), "refusing to validate non-record value");
                Outcome {
                    passed: false,
                    errors: FieldError::structural(other.type_name()).into(),
                }
            }
        }
    }
}

impl Default for Validator {
    /// Validator over its own registry holding the built-in rules
    fn default() -> Self {
        Self::new(Arc::new(RuleRegistry::default()))
    }
}

/// Validate `record` against the process-wide registry
pub fn validate(record: &dyn Record) -> Outcome {
    run(RuleRegistry::global(), record)
}

fn run(registry: &RuleRegistry, record: &dyn Record) -> Outcome {
    let type_name = record.type_name();
    tracing::debug!(record = type_name, "validation started");

    let mut outcome = Outcome::pass();
    walk(&Dispatcher::new(registry), record, &mut outcome);

    tracing::debug!(
        record = type_name,
        passed = outcome.passed,
        errors = outcome.errors.len(),
        "validation finished"
    );
    outcome
}

fn walk(dispatcher: &Dispatcher<'_>, record: &dyn Record, outcome: &mut Outcome) {
    let type_name = record.type_name();

    for field in record.fields().iter().filter(|field| field.visible) {
        let verdict = dispatcher.evaluate(field, record);
        tracing::trace!(
            record = type_name,
            field = field.name,
            kind = ?field.value.kind(),
            passed = verdict.is_pass(),
            "field evaluated"
        );

        match verdict {
            Verdict::Pass => {}
            Verdict::Fail(errors) => {
                outcome.passed = false;
                outcome.errors.merge(errors.into_iter().collect());
            }
            Verdict::SilentFail => outcome.passed = false,
            Verdict::Descend(nested) => walk(dispatcher, nested, outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::record::Field;
    use crate::value::Validatable;
    use tristate_null::{NullInt, NullString};

    struct Account {
        name: NullString,
        age: NullInt,
        secret: NullString,
    }

    impl Record for Account {
        fn type_name(&self) -> &'static str {
            "Account"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Name", true, "required,stringlength(1|5)", self.name.field_value()),
                Field::new("Age", true, "required~age missing", self.age.field_value()),
                Field::new("secret", false, "required", self.secret.field_value()),
            ]
        }
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let account = Account {
            name: NullString::from("abcdefg"),
            age: NullInt::absent(),
            secret: NullString::absent(),
        };

        let outcome = Validator::default().validate(&account);
        assert!(!outcome.passed());
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "Name: abcdefg does not validate as stringlength(1|5);age missing;"
        );
    }

    #[test]
    fn test_hidden_fields_are_ignored() {
        let account = Account {
            name: NullString::from("bob"),
            age: NullInt::from_value(40),
            secret: NullString::absent(),
        };
        assert_eq!(Validator::default().validate(&account).into_parts(), (true, None));
    }

    #[test]
    fn test_silent_failure_has_no_errors() {
        struct Measured {
            ratio: f64,
        }
        impl Record for Measured {
            fn type_name(&self) -> &'static str {
                "Measured"
            }
            fn fields(&self) -> Vec<Field<'_>> {
                vec![Field::new("Ratio", true, "required", self.ratio.field_value())]
            }
        }

        let outcome = Validator::default().validate(&Measured { ratio: 0.5 });
        assert!(!outcome.passed());
        assert!(outcome.errors().is_none());
        assert!(outcome.into_result().unwrap_err().is_empty());
    }

    #[test]
    fn test_structural_error_for_non_records() {
        let validator = Validator::default();
        let (passed, errors) = validator.validate_value(FieldValue::Int(3)).into_parts();
        assert!(!passed);
        let errors = errors.unwrap().into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FailureKind::Structural);
        assert_eq!(errors[0].to_string(), "function only accepts records; got i64");

        assert!(validator.validate_value(FieldValue::Absent).passed());
        assert!(validator.validate_option(None).passed());
    }
}
