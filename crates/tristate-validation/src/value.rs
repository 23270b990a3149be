//! Field values as seen by the dispatcher
//!
//! Every field a record exposes is reduced to one [`FieldValue`] variant; the
//! dispatcher never inspects a type beyond that.

use crate::record::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tristate_null::{NullBool, NullInt, NullString, NullTime};

/// The closed set of value shapes the validator understands
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// `None` behind an optional field
    Absent,
    Str(&'a str),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Time(&'a DateTime<Utc>),
    NullString(&'a NullString),
    NullInt(&'a NullInt),
    NullBool(&'a NullBool),
    NullTime(&'a NullTime),
    /// A collection, reduced to its length
    Seq(usize),
    Record(&'a dyn Record),
    /// Anything else; carries a type name for diagnostics
    Unsupported(&'static str),
}

/// Coarse classification used for rule dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Absent,
    String,
    Integer,
    Boolean,
    Timestamp,
    Float,
    Sequence,
    Record,
    Unsupported,
}

impl<'a> FieldValue<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Absent => ValueKind::Absent,
            FieldValue::Str(_) | FieldValue::NullString(_) => ValueKind::String,
            FieldValue::Int(_) | FieldValue::UInt(_) | FieldValue::NullInt(_) => ValueKind::Integer,
            FieldValue::Bool(_) | FieldValue::NullBool(_) => ValueKind::Boolean,
            FieldValue::Time(_) | FieldValue::NullTime(_) => ValueKind::Timestamp,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Seq(_) => ValueKind::Sequence,
            FieldValue::Record(_) => ValueKind::Record,
            FieldValue::Unsupported(_) => ValueKind::Unsupported,
        }
    }

    /// Zero, blank, null or never assigned.
    ///
    /// Nullable wrappers are empty when absent or null; a present wrapper is
    /// never empty, even around `""`, `0` or `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::Int(i) => *i == 0,
            FieldValue::UInt(u) => *u == 0,
            FieldValue::Float(f) => *f == 0.0,
            FieldValue::Bool(b) => !*b,
            FieldValue::Time(t) => **t == DateTime::<Utc>::default(),
            FieldValue::NullString(n) => n.is_absent_or_empty(),
            FieldValue::NullInt(n) => n.is_absent_or_empty(),
            FieldValue::NullBool(n) => n.is_absent_or_empty(),
            FieldValue::NullTime(n) => n.is_absent_or_empty(),
            FieldValue::Seq(len) => *len == 0,
            FieldValue::Record(r) => r.is_empty(),
            FieldValue::Unsupported(_) => false,
        }
    }

    /// Type name used in "does not support type" messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Absent => "None",
            FieldValue::Str(_) => "String",
            FieldValue::Int(_) => "i64",
            FieldValue::UInt(_) => "u64",
            FieldValue::Float(_) => "f64",
            FieldValue::Bool(_) => "bool",
            FieldValue::Time(_) => "DateTime<Utc>",
            FieldValue::NullString(_) => "NullString",
            FieldValue::NullInt(_) => "NullInt",
            FieldValue::NullBool(_) => "NullBool",
            FieldValue::NullTime(_) => "NullTime",
            FieldValue::Seq(_) => "sequence",
            FieldValue::Record(r) => r.type_name(),
            FieldValue::Unsupported(name) => *name,
        }
    }

    /// Underlying string for string-like values
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Str(s) => Some(s),
            FieldValue::NullString(n) => n.as_option().map(String::as_str),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Int(i) => Some(i),
            FieldValue::UInt(u) => i64::try_from(u).ok(),
            FieldValue::NullInt(n) => n.as_option().copied(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            FieldValue::Bool(b) => Some(b),
            FieldValue::NullBool(n) => n.as_option().copied(),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&'a DateTime<Utc>> {
        match *self {
            FieldValue::Time(t) => Some(t),
            FieldValue::NullTime(n) => n.as_option(),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match *self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str("<absent>"),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::NullString(n) => write!(f, "{}", n),
            FieldValue::NullInt(n) => write!(f, "{}", n),
            FieldValue::NullBool(n) => write!(f, "{}", n),
            FieldValue::NullTime(n) => write!(f, "{}", n),
            FieldValue::Seq(len) => write!(f, "[{} items]", len),
            FieldValue::Record(r) => write!(f, "{:?}", r),
            FieldValue::Unsupported(name) => write!(f, "<{}>", name),
        }
    }
}

/// Capability every field type needs: reduce itself to a [`FieldValue`]
pub trait Validatable {
    fn field_value(&self) -> FieldValue<'_>;
}

impl Validatable for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl Validatable for str {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(impl Validatable for $ty {
            fn field_value(&self) -> FieldValue<'_> {
                FieldValue::Int(*self as i64)
            }
        })*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(impl Validatable for $ty {
            fn field_value(&self) -> FieldValue<'_> {
                FieldValue::UInt(*self as u64)
            }
        })*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl Validatable for f32 {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(f64::from(*self))
    }
}

impl Validatable for f64 {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl Validatable for bool {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl Validatable for DateTime<Utc> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Time(self)
    }
}

impl Validatable for NullString {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::NullString(self)
    }
}

impl Validatable for NullInt {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::NullInt(self)
    }
}

impl Validatable for NullBool {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::NullBool(self)
    }
}

impl Validatable for NullTime {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::NullTime(self)
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.field_value(),
            None => FieldValue::Absent,
        }
    }
}

impl<T: Validatable + ?Sized> Validatable for &T {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T> Validatable for Vec<T> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.len())
    }
}

impl<K, V, S> Validatable for HashMap<K, V, S> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.len())
    }
}

impl<K, V> Validatable for BTreeMap<K, V> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.len())
    }
}
