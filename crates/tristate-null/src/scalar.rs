//! Per-primitive codec hooks used by [`Nullable`]

use crate::column::ColumnValue;
use crate::error::{NullError, NullResult};
use crate::nullable::Nullable;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A primitive that can sit inside a [`Nullable`].
///
/// The text hooks see only non-`None` input; `Nullable::from_text` deals with
/// the missing case before delegating here.
pub trait Scalar: Clone + Default + PartialEq + fmt::Debug {
    /// Type name used in error messages
    const TYPE_NAME: &'static str;

    /// Whether JSON may also carry the value as `{"Time": .., "Null": .., "Valid": ..}`
    const OBJECT_FORM: bool = false;

    /// Decode a text form into a tri-state value
    fn decode_text(text: &str) -> NullResult<Nullable<Self>>;

    /// Render the present value as text
    fn encode_text(&self) -> String;

    /// Convert a non-null storage cell into the primitive
    fn from_column(column: ColumnValue) -> NullResult<Self>;

    /// Convert the primitive into a storage cell
    fn to_column(&self) -> ColumnValue;
}

impl Scalar for String {
    const TYPE_NAME: &'static str = "NullString";

    // An empty string was never assigned; the literal "null" is an explicit null.
    fn decode_text(text: &str) -> NullResult<Nullable<Self>> {
        Ok(match text {
            "" => Nullable::absent(),
            "null" => Nullable::null(),
            other => Nullable::from_value(other.to_string()),
        })
    }

    fn encode_text(&self) -> String {
        self.clone()
    }

    fn from_column(column: ColumnValue) -> NullResult<Self> {
        match column {
            ColumnValue::Text(s) => Ok(s),
            other => Err(NullError::scan(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_column(&self) -> ColumnValue {
        ColumnValue::Text(self.clone())
    }
}

impl Scalar for i64 {
    const TYPE_NAME: &'static str = "NullInt";

    fn decode_text(text: &str) -> NullResult<Nullable<Self>> {
        match text {
            "" | "null" => Ok(Nullable::null()),
            other => other
                .parse::<i64>()
                .map(Nullable::from_value)
                .map_err(|_| NullError::invalid_text(Self::TYPE_NAME, other)),
        }
    }

    fn encode_text(&self) -> String {
        self.to_string()
    }

    fn from_column(column: ColumnValue) -> NullResult<Self> {
        match column {
            ColumnValue::Int(i) => Ok(i),
            ColumnValue::Float(f) => Ok(f as i64),
            other => Err(NullError::scan(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_column(&self) -> ColumnValue {
        ColumnValue::Int(*self)
    }
}

impl Scalar for bool {
    const TYPE_NAME: &'static str = "NullBool";

    fn decode_text(text: &str) -> NullResult<Nullable<Self>> {
        match text {
            "" | "null" => Ok(Nullable::null()),
            "true" => Ok(Nullable::from_value(true)),
            "false" => Ok(Nullable::from_value(false)),
            other => Err(NullError::invalid_text(Self::TYPE_NAME, other)),
        }
    }

    fn encode_text(&self) -> String {
        self.to_string()
    }

    fn from_column(column: ColumnValue) -> NullResult<Self> {
        match column {
            ColumnValue::Bool(b) => Ok(b),
            other => Err(NullError::scan(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_column(&self) -> ColumnValue {
        ColumnValue::Bool(*self)
    }
}

impl Scalar for DateTime<Utc> {
    const TYPE_NAME: &'static str = "NullTime";
    const OBJECT_FORM: bool = true;

    fn decode_text(text: &str) -> NullResult<Nullable<Self>> {
        match text {
            "" | "null" => Ok(Nullable::null()),
            other => DateTime::parse_from_rfc3339(other)
                .map(|t| Nullable::from_value(t.with_timezone(&Utc)))
                .map_err(|_| NullError::invalid_text(Self::TYPE_NAME, other)),
        }
    }

    fn encode_text(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn from_column(column: ColumnValue) -> NullResult<Self> {
        match column {
            ColumnValue::Timestamp(t) => Ok(t),
            other => Err(NullError::scan(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_column(&self) -> ColumnValue {
        ColumnValue::Timestamp(*self)
    }
}
