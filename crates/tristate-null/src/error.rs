//! Errors raised by the nullable codecs

use thiserror::Error;

pub type NullResult<T> = Result<T, NullError>;

/// Error produced while decoding a nullable value from text or a storage column
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NullError {
    #[error("invalid input for {target}: '{input}'")]
    InvalidText { target: &'static str, input: String },

    #[error("cannot scan {found} into {expected}")]
    Scan {
        expected: &'static str,
        found: &'static str,
    },
}

impl NullError {
    /// Create an invalid text error
    pub fn invalid_text(target: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidText {
            target,
            input: input.into(),
        }
    }

    /// Create a scan type mismatch error
    pub fn scan(expected: &'static str, found: &'static str) -> Self {
        Self::Scan { expected, found }
    }
}
