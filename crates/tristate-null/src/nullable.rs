//! The tri-state nullable wrapper

use crate::column::ColumnValue;
use crate::error::NullResult;
use crate::scalar::Scalar;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A primitive value that also remembers whether it was explicitly null or never assigned.
///
/// | `valid` | `null` | meaning |
/// |---|---|---|
/// | `false` | any | never assigned (absent key, absent field) |
/// | `true` | `true` | present but null |
/// | `true` | `false` | a real value |
///
/// Decoding from JSON keeps the absent state only when the field is marked
/// `#[serde(default)]`; serde reports a missing key and a `null` the same way
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nullable<T> {
    /// Underlying primitive, meaningful only when present
    pub value: T,
    /// Key or column was present but held null
    pub null: bool,
    /// Value was assigned at all
    pub valid: bool,
}

impl<T: Default> Nullable<T> {
    /// Create a value from its raw parts
    pub fn new(value: T, null: bool, valid: bool) -> Self {
        Self { value, null, valid }
    }

    /// Create a present value
    pub fn from_value(value: T) -> Self {
        Self::new(value, false, true)
    }

    /// Create a present value, or an explicit null when `value` is `None`
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::from_value(v),
            None => Self::null(),
        }
    }

    /// Create an explicit null
    pub fn null() -> Self {
        Self::new(T::default(), true, true)
    }

    /// Create a value that was never assigned
    pub fn absent() -> Self {
        Self::new(T::default(), false, false)
    }

    /// Store `value` and mark it present
    pub fn set_valid(&mut self, value: T) {
        self.value = value;
        self.null = false;
        self.valid = true;
    }

    /// Check whether the value was explicitly null
    pub fn is_null(&self) -> bool {
        self.null
    }

    /// Check whether the value was assigned at all
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Check whether a real value is held
    pub fn is_present(&self) -> bool {
        self.valid && !self.null
    }

    /// Absent or null: the emptiness a validator cares about
    pub fn is_absent_or_empty(&self) -> bool {
        !self.is_present()
    }

    /// Borrow the value when present
    pub fn as_option(&self) -> Option<&T> {
        if self.is_present() {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Take the value when present
    pub fn into_option(self) -> Option<T> {
        if self.is_present() {
            Some(self.value)
        } else {
            None
        }
    }
}

impl<T: Scalar> Nullable<T> {
    /// Decode the text form. `None` leaves the value absent.
    pub fn from_text(text: Option<&str>) -> NullResult<Self> {
        match text {
            None => Ok(Self::absent()),
            Some(text) => T::decode_text(text),
        }
    }

    /// Encode the text form: `None` when absent, `"null"` when null
    pub fn to_text(&self) -> Option<String> {
        if !self.valid {
            return None;
        }
        if self.null {
            return Some("null".to_string());
        }
        Some(self.value.encode_text())
    }

    /// Decode a storage cell; a null cell becomes an explicit null
    pub fn scan(column: ColumnValue) -> NullResult<Self> {
        if column.is_null() {
            return Ok(Self::null());
        }
        T::from_column(column).map(Self::from_value)
    }

    /// Encode as a storage cell; null and absent both bind as SQL null
    pub fn to_column(&self) -> ColumnValue {
        match self.as_option() {
            Some(v) => v.to_column(),
            None => ColumnValue::Null,
        }
    }
}

impl<T: Scalar> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("<absent>"),
        }
    }
}

impl<T: Default> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl From<&str> for Nullable<String> {
    fn from(value: &str) -> Self {
        Self::from_value(value.to_string())
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.valid && !self.null {
            self.value.serialize(serializer)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Scalar,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if !T::OBJECT_FORM {
            return Option::<T>::deserialize(deserializer).map(Self::from_option);
        }

        match Encoded::<T>::deserialize(deserializer)? {
            Encoded::Plain(value) => Ok(Self::from_option(value)),
            Encoded::Object { value, null, valid } => Ok(Self::new(value, null, valid)),
        }
    }
}

/// JSON shapes accepted by scalars with an object form. The object carries
/// every flag, so it can spell out the absent state.
#[derive(Deserialize)]
#[serde(untagged)]
enum Encoded<T> {
    Plain(Option<T>),
    Object {
        #[serde(rename = "Time")]
        value: T,
        #[serde(rename = "Null")]
        null: bool,
        #[serde(rename = "Valid")]
        valid: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullBool, NullInt, NullString};

    #[test]
    fn test_constructors() {
        assert_eq!(
            NullString::from_value("test".to_string()),
            Nullable {
                value: "test".to_string(),
                null: false,
                valid: true
            }
        );
        assert_eq!(
            NullString::from_option(None),
            Nullable {
                value: String::new(),
                null: true,
                valid: true
            }
        );
        assert_eq!(NullInt::default(), NullInt::new(0, false, false));
    }

    #[test]
    fn test_set_valid_clears_null() {
        let mut target = NullInt::null();
        target.set_valid(7);
        assert_eq!(target, NullInt::from_value(7));
    }

    #[test]
    fn test_option_accessors() {
        assert_eq!(NullString::from("test").as_option().map(String::as_str), Some("test"));
        assert_eq!(NullString::null().as_option(), None);
        assert_eq!(NullString::absent().into_option(), None);
        assert_eq!(NullBool::from_value(false).into_option(), Some(false));
    }

    #[test]
    fn test_emptiness() {
        assert!(NullBool::absent().is_absent_or_empty());
        assert!(NullBool::null().is_absent_or_empty());
        assert!(!NullBool::from_value(false).is_absent_or_empty());
        assert!(!NullString::from("").is_absent_or_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(NullInt::from_value(42).to_string(), "42");
        assert_eq!(NullInt::null().to_string(), "null");
        assert_eq!(NullInt::absent().to_string(), "<absent>");
    }
}
