//! # tristate-validation
//!
//! Tag-driven validation of records whose fields are plain scalars or
//! [`tristate_null`] nullable wrappers.
//!
//! Each field declares its rules as a short specification string, e.g.
//! `#[valid("required,stringlength(1|10)")]`. Rules come from a [`RuleRegistry`]
//! with three tiers: simple string predicates, parameterized predicates such as
//! `length(min|max)`, and custom-type validators that see the whole record.
//!
//! ```ignore
//! use tristate_null::NullString;
//! use tristate_validation::Record;
//!
//! #[derive(Record)]
//! pub struct Signup {
//!     #[valid("required,stringlength(1|10)")]
//!     pub name: NullString,
//!     #[valid("requrl~homepage must be an absolute URL")]
//!     pub homepage: NullString,
//! }
//!
//! let outcome = tristate_validation::validate(&signup);
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod record;
pub mod registry;
pub mod tag;
pub mod validator;
pub mod validators;
pub mod value;

pub use config::{ConfigError, ValidatorConfig};
pub use dispatch::{Dispatcher, Verdict};
pub use error::{FailureKind, FieldError, RegistryError, ValidationErrors};
pub use record::{Field, Record};
pub use registry::{CustomFn, ParamFn, RuleRegistry, SimpleFn};
pub use tag::{Rule, RuleSet};
pub use validator::{validate, Outcome, Validator};
pub use value::{FieldValue, Validatable, ValueKind};

#[cfg(feature = "derive")]
pub use tristate_derive::Record;
