//! Built-in rule predicates

pub mod length;
pub mod uri;

pub use length::{byte_length, string_length};
pub use uri::{is_request_uri, is_request_url, is_url};
