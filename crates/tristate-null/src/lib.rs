//! # tristate-null
//!
//! Nullable scalar types that tell apart "a value", "an explicit null" and
//! "never assigned", and keep that distinction through text, JSON and
//! tabular storage.

pub mod column;
pub mod error;
pub mod nullable;
pub mod scalar;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use column::ColumnValue;
pub use error::{NullError, NullResult};
pub use nullable::Nullable;
pub use scalar::Scalar;

/// Nullable string
pub type NullString = Nullable<String>;

/// Nullable 64-bit integer
pub type NullInt = Nullable<i64>;

/// Nullable boolean
pub type NullBool = Nullable<bool>;

/// Nullable UTC timestamp
pub type NullTime = Nullable<chrono::DateTime<chrono::Utc>>;
