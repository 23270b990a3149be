//! # tristate-derive
//!
//! Derive macro for `tristate_validation::Record`.
//!
//! - `#[derive(Record)]`: list every field of a struct, in declaration order, to
//!   the validation engine. `pub` fields are validated; other fields are listed
//!   as hidden and never inspected.
//! - `#[valid("...")]`: the field's rule specification.

use proc_macro::TokenStream;

mod record;

/// Derive `Record` and `Validatable` for a struct
#[proc_macro_derive(Record, attributes(valid))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record_impl(input)
}
