//! Rule specification parsing
//!
//! A field declares its rules as `"rule[~message][,rule[~message]...]"`.
//! Each rule may be negated with a leading `!` and may be a parameterized
//! expression such as `length(1|10)`. Tokens with characters outside the
//! allowed set are dropped without error.

use indexmap::IndexMap;

/// Tag value that turns validation off for a field
pub const SKIP: &str = "-";

/// Name of the rule that makes an empty field fail
pub const REQUIRED: &str = "required";

const RULE_SEPARATOR: char = ',';
const MESSAGE_DELIMITER: char = '~';
const NEGATION: char = '!';
const ALLOWED_PUNCTUATION: &str = "!#$%&()*+-./:<=>?@[]^_{|}~ ";

/// One parsed rule token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule name with any leading `!` removed; may be a full parameterized expression
    pub name: String,
    pub negated: bool,
    /// Message to report verbatim when the rule fails
    pub message: Option<String>,
}

impl Rule {
    /// Whether this token is the plain (non-negated) `required` rule
    pub fn is_required(&self) -> bool {
        !self.negated && self.name == REQUIRED
    }
}

/// Ordered set of rules declared on one field.
///
/// Keyed by the raw token, so `x` and `!x` are distinct entries; a repeated
/// token keeps its first position and takes the later message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    /// Parse a raw rule specification
    pub fn parse(tag: &str) -> Self {
        let mut rules = IndexMap::new();
        if is_skip(tag) {
            return Self { rules };
        }

        for option in tag.split(RULE_SEPARATOR) {
            let parts: Vec<&str> = option.split(MESSAGE_DELIMITER).collect();
            let token = parts[0];
            if !is_valid_token(token) {
                continue;
            }

            // Only `rule~message` carries a message; more delimiters leave it without one.
            let message = match parts.as_slice() {
                [_, message] if !message.is_empty() => Some(message.to_string()),
                _ => None,
            };

            let (name, negated) = match token.strip_prefix(NEGATION) {
                Some(stripped) => (stripped, true),
                None => (token, false),
            };

            rules.insert(
                token.to_string(),
                Rule {
                    name: name.to_string(),
                    negated,
                    message,
                },
            );
        }

        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// The non-negated `required` rule, if declared
    pub fn required(&self) -> Option<&Rule> {
        self.rules.get(REQUIRED).filter(|rule| rule.is_required())
    }
}

/// Empty tags and the skip sentinel declare no rules
pub fn is_skip(tag: &str) -> bool {
    tag.is_empty() || tag == SKIP
}

fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_token_char)
}

/// Letters, decimal digits and the allowed punctuation. Letter-like numerals
/// such as `Ⅻ` are alphabetic in Unicode but are not letters here.
fn is_token_char(c: char) -> bool {
    (c.is_alphabetic() && !c.is_numeric()) || c.is_ascii_digit() || ALLOWED_PUNCTUATION.contains(c)
}
