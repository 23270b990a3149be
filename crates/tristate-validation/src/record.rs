//! Record introspection
//!
//! A record is anything whose fields can be enumerated in declaration order.
//! `#[derive(Record)]` writes the implementation; hand-written ones are fine
//! for types the derive cannot see into.

use crate::value::FieldValue;

/// One declared field of a record, as the validator sees it
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'static str,
    /// Only visible (`pub`) fields take part in validation
    pub visible: bool,
    /// Raw rule specification; empty when the field declares none
    pub tag: &'static str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, visible: bool, tag: &'static str, value: FieldValue<'a>) -> Self {
        Self {
            name,
            visible,
            tag,
            value,
        }
    }
}

/// A composite value whose fields can be walked
pub trait Record {
    /// Name of the record type, used in diagnostics
    fn type_name(&self) -> &'static str;

    /// All declared fields, visible or not, in declaration order
    fn fields(&self) -> Vec<Field<'_>>;

    /// Look up a sibling field by name; custom-type validators use this for cross-field checks
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.fields()
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.value)
    }

    /// A record is empty when every one of its visible fields is
    fn is_empty(&self) -> bool {
        self.fields()
            .iter()
            .filter(|f| f.visible)
            .all(|f| f.value.is_empty())
    }
}

impl std::fmt::Debug for dyn Record + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for field in self.fields() {
            s.field(field.name, &field.value);
        }
        s.finish()
    }
}
