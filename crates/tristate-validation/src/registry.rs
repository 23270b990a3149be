//! Rule registry
//!
//! Three tiers keyed by rule name:
//!
//! - **simple**: `fn(&str) -> bool`, looked up by exact name
//! - **parameterized**: `fn(&str, &[&str]) -> bool`, found by matching the whole
//!   token against a compiled pattern whose capture groups become the parameters
//! - **custom-type**: `fn(&FieldValue, &dyn Record) -> bool`, looked up by exact
//!   name and given the enclosing record for cross-field checks
//!
//! The simple and parameterized tiers are filled before the registry is shared
//! and only read afterwards. The custom-type tier sits behind a read/write lock
//! so it can still be extended while validations run.

use crate::config::ValidatorConfig;
use crate::error::RegistryError;
use crate::record::Record;
use crate::validators::{self, length};
use crate::value::FieldValue;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Zero-parameter string predicate
pub type SimpleFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// String predicate taking the parameters captured from the rule token
pub type ParamFn = Arc<dyn Fn(&str, &[&str]) -> bool + Send + Sync>;

/// Whole-value predicate with access to the enclosing record
pub type CustomFn = Arc<dyn Fn(&FieldValue<'_>, &dyn Record) -> bool + Send + Sync>;

/// A parameterized rule and the pattern that recognizes its tokens
#[derive(Clone)]
pub struct ParamRule {
    name: String,
    pattern: Regex,
    check: ParamFn,
}

impl ParamRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capture groups of `token`, or `None` when the pattern does not match
    pub fn params<'t>(&self, token: &'t str) -> Option<Vec<&'t str>> {
        let captures = self.pattern.captures(token)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map_or("", |m| m.as_str()))
                .collect(),
        )
    }

    pub fn check(&self, value: &str, params: &[&str]) -> bool {
        (self.check)(value, params)
    }
}

impl fmt::Debug for ParamRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Registry of named validators
pub struct RuleRegistry {
    simple: HashMap<String, SimpleFn>,
    param: IndexMap<String, ParamRule>,
    custom: RwLock<HashMap<String, CustomFn>>,
}

static GLOBAL: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::default);

impl RuleRegistry {
    /// Create a registry with no rules at all
    pub fn new() -> Self {
        Self {
            simple: HashMap::new(),
            param: IndexMap::new(),
            custom: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in rules
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::with_config(&ValidatorConfig::default())
    }

    /// Create a registry as described by `config`
    pub fn with_config(config: &ValidatorConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        if config.builtin_rules {
            registry.install_builtins(config)?;
        }
        Ok(registry)
    }

    /// The process-wide registry, populated with the built-in rules on first use
    pub fn global() -> &'static RuleRegistry {
        &GLOBAL
    }

    fn install_builtins(&mut self, config: &ValidatorConfig) -> Result<(), RegistryError> {
        self.register_param("length", length::LENGTH_PATTERN, validators::byte_length)?;
        self.register_param(
            "stringlength",
            length::STRING_LENGTH_PATTERN,
            validators::string_length,
        )?;

        let url_max_length = config.url_max_length;
        self.register_simple("url", move |value| validators::is_url(value, url_max_length));
        self.register_simple("requrl", validators::is_request_url);

        // Absent or empty request URIs pass, even when the field is also `required`.
        self.register_custom("requri", |value, _| {
            value.is_empty() || value.as_str().map_or(false, validators::is_request_uri)
        })?;
        Ok(())
    }

    /// Register a zero-parameter string rule, replacing any rule of the same name
    pub fn register_simple<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(rule = %name, "registering simple rule");
        self.simple.insert(name, Arc::new(check));
    }

    /// Register a parameterized rule. `pattern` must match the whole token and
    /// capture each parameter in its own group.
    pub fn register_param<F>(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        check: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&str, &[&str]) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if self.has_param(&name) {
            tracing::debug!(rule = %name, "replacing parameterized rule");
        }
        let pattern = Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            name: name.clone(),
            source,
        })?;

        tracing::debug!(rule = %name, pattern = %pattern.as_str(), "registering parameterized rule");
        self.param.insert(
            name.clone(),
            ParamRule {
                name,
                pattern,
                check: Arc::new(check),
            },
        );
        Ok(())
    }

    /// Register a custom-type rule. Safe to call while validations are running.
    pub fn register_custom<F>(&self, name: impl Into<String>, check: F) -> Result<(), RegistryError>
    where
        F: Fn(&FieldValue<'_>, &dyn Record) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let mut custom = self.custom.write().map_err(|_| RegistryError::LockError {
            resource: "custom_rules".to_string(),
        })?;

        tracing::debug!(rule = %name, "registering custom-type rule");
        custom.insert(name, Arc::new(check));
        Ok(())
    }

    /// Remove a custom-type rule, returning whether it existed
    pub fn unregister_custom(&self, name: &str) -> Result<bool, RegistryError> {
        let mut custom = self.custom.write().map_err(|_| RegistryError::LockError {
            resource: "custom_rules".to_string(),
        })?;
        Ok(custom.remove(name).is_some())
    }

    pub fn simple(&self, name: &str) -> Option<&SimpleFn> {
        self.simple.get(name)
    }

    /// Parameterized rules whose pattern matches `token`, in registration order,
    /// with the captured parameters
    pub fn param_matches<'s, 't>(
        &'s self,
        token: &'t str,
    ) -> impl Iterator<Item = (&'s ParamRule, Vec<&'t str>)> + 's
    where
        't: 's,
    {
        self.param
            .values()
            .filter_map(move |rule| rule.params(token).map(|params| (rule, params)))
    }

    /// Look up a custom-type rule
    pub fn custom(&self, name: &str) -> Option<CustomFn> {
        match self.custom.read() {
            Ok(custom) => custom.get(name).cloned(),
            Err(poisoned) => {
                tracing::warn!(rule = %name, "custom rule lock poisoned, reading through it");
                poisoned.into_inner().get(name).cloned()
            }
        }
    }

    /// Whether a parameterized rule is registered under `name`
    pub fn has_param(&self, name: &str) -> bool {
        self.param.contains_key(name)
    }

    /// Names registered in each tier, sorted, for diagnostics
    pub fn rule_names(&self) -> (Vec<String>, Vec<String>, Vec<String>) {
        let mut simple: Vec<String> = self.simple.keys().cloned().collect();
        let param: Vec<String> = self.param.keys().cloned().collect();
        let mut custom: Vec<String> = match self.custom.read() {
            Ok(custom) => custom.keys().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
        };
        simple.sort();
        custom.sort();
        (simple, param, custom)
    }

    /// Copy every tier into a new registry that can be extended without
    /// touching this one
    pub fn fork(&self) -> Self {
        let custom = match self.custom.read() {
            Ok(custom) => custom.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Self {
            simple: self.simple.clone(),
            param: self.param.clone(),
            custom: RwLock::new(custom),
        }
    }
}

impl Default for RuleRegistry {
    /// Built-in rules with the default configuration
    fn default() -> Self {
        Self::builtin().unwrap_or_else(|error| {
            tracing::error!(%error, "built-in rules failed to register");
            Self::new()
        })
    }
}

impl Clone for RuleRegistry {
    fn clone(&self) -> Self {
        self.fork()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (simple, param, custom) = self.rule_names();
        f.debug_struct("RuleRegistry")
            .field("simple", &simple)
            .field("param", &param)
            .field("custom", &custom)
            .finish()
    }
}
