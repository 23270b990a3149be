//! Per-field rule dispatch
//!
//! Decides which registry tier handles a field and turns the validator results
//! into a [`Verdict`]. Nested records are handed back to the engine rather than
//! walked here.

use crate::error::{FailureKind, FieldError};
use crate::record::{Field, Record};
use crate::registry::RuleRegistry;
use crate::tag::{self, Rule, RuleSet};
use crate::value::ValueKind;

/// Result of evaluating one field
#[derive(Debug)]
pub enum Verdict<'a> {
    Pass,
    /// Failed with at least one reportable error
    Fail(Vec<FieldError>),
    /// Failed without an error; the field's kind has no applicable rules
    SilentFail,
    /// The field is a record; its own fields decide the result
    Descend(&'a dyn Record),
}

impl Verdict<'_> {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Evaluates field rules against one registry
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate `field`, declared on `record`, against its rule specification
    pub fn evaluate<'a>(&self, field: &Field<'a>, record: &dyn Record) -> Verdict<'a> {
        if tag::is_skip(field.tag) {
            return Verdict::Pass;
        }
        let rules = RuleSet::parse(field.tag);
        if rules.is_empty() {
            return Verdict::Pass;
        }

        if let Some(verdict) = self.check_custom(field, record, &rules) {
            return verdict;
        }

        if field.value.is_empty() {
            return check_required(field, &rules);
        }

        match field.value.kind() {
            ValueKind::String | ValueKind::Integer | ValueKind::Boolean => {
                self.check_scalar(field, &rules)
            }
            ValueKind::Timestamp => Verdict::Pass,
            ValueKind::Record => match field.value.as_record() {
                Some(nested) => Verdict::Descend(nested),
                None => Verdict::SilentFail,
            },
            _ => Verdict::SilentFail,
        }
    }

    /// Run every custom-type validator named by the field's rules. `None` when
    /// no rule names a custom-type validator.
    fn check_custom<'a>(
        &self,
        field: &Field<'a>,
        record: &dyn Record,
        rules: &RuleSet,
    ) -> Option<Verdict<'a>> {
        let mut matched = false;
        let mut errors = Vec::new();

        for rule in rules.iter().filter(|rule| !rule.negated) {
            let Some(check) = self.registry.custom(&rule.name) else {
                continue;
            };
            matched = true;

            if !check(&field.value, record) {
                let error = match &rule.message {
                    Some(message) => {
                        FieldError::custom(field.name, message.as_str(), FailureKind::CustomType)
                    }
                    None => FieldError::new(
                        field.name,
                        format!("{} does not validate as {}", field.value, rule.name),
                        FailureKind::CustomType,
                    ),
                };
                errors.push(error);
            }
        }

        if !matched {
            return None;
        }
        if errors.is_empty() {
            Some(Verdict::Pass)
        } else {
            Some(Verdict::Fail(errors))
        }
    }

    /// Parameterized tier, else simple tier, failing on the first violated rule
    fn check_scalar<'a>(&self, field: &Field<'a>, rules: &RuleSet) -> Verdict<'a> {
        for rule in rules.iter() {
            let mut parameterized = false;
            for (param_rule, params) in self.registry.param_matches(&rule.name) {
                parameterized = true;
                let Some(value) = field.value.as_str() else {
                    return Verdict::Fail(vec![unsupported(field, rule)]);
                };
                if param_rule.check(value, &params) == rule.negated {
                    return Verdict::Fail(vec![violation(field, rule, value)]);
                }
            }
            // A token answered by a pattern never reaches the simple tier
            if parameterized {
                continue;
            }

            if let Some(check) = self.registry.simple(&rule.name) {
                let Some(value) = field.value.as_str() else {
                    return Verdict::Fail(vec![unsupported(field, rule)]);
                };
                if check(value) == rule.negated {
                    return Verdict::Fail(vec![violation(field, rule, value)]);
                }
            }
        }
        Verdict::Pass
    }
}

/// Empty fields only answer to `required`
fn check_required<'a>(field: &Field<'_>, rules: &RuleSet) -> Verdict<'a> {
    match rules.required() {
        None => Verdict::Pass,
        Some(rule) => {
            let message = rule.message.as_deref().unwrap_or("non zero value required");
            Verdict::Fail(vec![FieldError::custom(
                field.name,
                message,
                FailureKind::Required,
            )])
        }
    }
}

fn violation(field: &Field<'_>, rule: &Rule, value: &str) -> FieldError {
    if let Some(message) = &rule.message {
        return FieldError::custom(field.name, message.as_str(), FailureKind::RuleViolation);
    }
    let verb = if rule.negated {
        "does validate as"
    } else {
        "does not validate as"
    };
    FieldError::new(
        field.name,
        format!("{} {} {}", value, verb, rule.name),
        FailureKind::RuleViolation,
    )
}

fn unsupported(field: &Field<'_>, rule: &Rule) -> FieldError {
    FieldError::new(
        field.name,
        format!(
            "Validator {} doesn't support type {}",
            rule.name,
            field.value.type_name()
        ),
        FailureKind::UnsupportedRule,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FieldValue, Validatable};
    use tristate_null::{NullBool, NullInt, NullString, NullTime};

    struct Holder;

    impl Record for Holder {
        fn type_name(&self) -> &'static str {
            "Holder"
        }
        fn fields(&self) -> Vec<Field<'_>> {
            Vec::new()
        }
    }

    fn evaluate<'a>(registry: &RuleRegistry, tag: &'static str, value: FieldValue<'a>) -> Verdict<'a> {
        let field = Field::new("Name", true, tag, value);
        Dispatcher::new(registry).evaluate(&field, &Holder)
    }

    fn messages(verdict: Verdict<'_>) -> Vec<String> {
        match verdict {
            Verdict::Fail(errors) => errors.into_iter().map(|e| e.to_string()).collect(),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_untagged_and_skipped_fields_pass() {
        let registry = RuleRegistry::builtin().unwrap();
        assert!(evaluate(&registry, "", FieldValue::Float(1.5)).is_pass());
        assert!(evaluate(&registry, "-", FieldValue::Float(1.5)).is_pass());
        assert!(evaluate(&registry, "bad\"tag", FieldValue::Float(1.5)).is_pass());
    }

    #[test]
    fn test_empty_value_only_checks_required() {
        let registry = RuleRegistry::builtin().unwrap();
        let absent = NullString::absent();
        assert!(evaluate(&registry, "url,length(3|5)", absent.field_value()).is_pass());
        assert_eq!(
            messages(evaluate(&registry, "url,required", absent.field_value())),
            vec!["non zero value required"]
        );
        assert_eq!(
            messages(evaluate(&registry, "required~name please", NullInt::null().field_value())),
            vec!["name please"]
        );
        assert!(evaluate(&registry, "!required", FieldValue::Str("")).is_pass());
    }

    #[test]
    fn test_param_and_simple_rules() {
        let registry = RuleRegistry::builtin().unwrap();
        let name = NullString::from("12345678901");

        assert_eq!(
            messages(evaluate(&registry, "stringlength(1|10)", name.field_value())),
            vec!["Name: 12345678901 does not validate as stringlength(1|10)"]
        );
        assert!(evaluate(&registry, "stringlength(1|11)", name.field_value()).is_pass());
        assert!(evaluate(&registry, "!url", FieldValue::Str("not a url")).is_pass());
        assert_eq!(
            messages(evaluate(&registry, "!url", FieldValue::Str("example.com"))),
            vec!["Name: example.com does validate as url"]
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let registry = RuleRegistry::builtin().unwrap();
        let verdict = evaluate(
            &registry,
            "length(1|2)~too long,url~bad url",
            FieldValue::Str("hello"),
        );
        assert_eq!(messages(verdict), vec!["too long"]);
    }

    #[test]
    fn test_string_rule_on_integer_is_unsupported() {
        let registry = RuleRegistry::builtin().unwrap();
        let count = NullInt::from_value(5);
        let verdict = evaluate(&registry, "length(1|2)", count.field_value());
        match verdict {
            Verdict::Fail(errors) => {
                assert_eq!(errors[0].kind, FailureKind::UnsupportedRule);
                assert_eq!(
                    errors[0].message,
                    "Validator length(1|2) doesn't support type NullInt"
                );
            }
            other => panic!("unexpected {:?}", other),
        }

        // Unknown rule names leave integers and booleans alone
        assert!(evaluate(&registry, "positive", count.field_value()).is_pass());
        assert!(evaluate(&registry, "required", NullBool::from_value(false).field_value()).is_pass());
    }

    #[test]
    fn test_other_kinds() {
        let registry = RuleRegistry::builtin().unwrap();
        let stamp = NullTime::from_value(chrono::Utc::now());
        assert!(evaluate(&registry, "required", stamp.field_value()).is_pass());
        assert!(matches!(
            evaluate(&registry, "required", FieldValue::Float(2.5)),
            Verdict::SilentFail
        ));
        assert!(matches!(
            evaluate(&registry, "required", FieldValue::Seq(3)),
            Verdict::SilentFail
        ));

        // A record with no fields is empty, so only `required` is consulted
        assert_eq!(
            messages(evaluate(&registry, "required", FieldValue::Record(&Holder))),
            vec!["non zero value required"]
        );

        struct Filled(i64);
        impl Record for Filled {
            fn type_name(&self) -> &'static str {
                "Filled"
            }
            fn fields(&self) -> Vec<Field<'_>> {
                vec![Field::new("0", true, "", self.0.field_value())]
            }
        }
        let filled = Filled(1);
        assert!(matches!(
            evaluate(&registry, "required", FieldValue::Record(&filled)),
            Verdict::Descend(_)
        ));
    }

    #[test]
    fn test_custom_tier_is_exclusive() {
        let registry = RuleRegistry::builtin().unwrap();
        registry
            .register_custom("even", |value, _| value.as_i64().map_or(true, |i| i % 2 == 0))
            .unwrap();
        registry
            .register_custom("small", |value, _| value.as_i64().map_or(true, |i| i < 10))
            .unwrap();

        // Custom validators see empty values and bypass `required`
        assert!(evaluate(&registry, "even,required", NullInt::absent().field_value()).is_pass());

        let verdict = evaluate(&registry, "even,small~too big,length(1|1)", FieldValue::Int(13));
        assert_eq!(
            messages(verdict),
            vec!["Name: 13 does not validate as even", "too big"]
        );

        assert!(evaluate(&registry, "even,length(9|9)", FieldValue::Int(4)).is_pass());
    }
}
