use tristate_null::NullString;
use tristate_validation::{Record, Validatable};

#[derive(Record)]
pub struct Homepage(#[valid("requrl")] pub NullString, pub i32);

fn main() {
    let page = Homepage(NullString::from("https://example.com"), 1);
    let fields = tristate_validation::Record::fields(&page);
    assert_eq!(fields[0].name, "0");
    assert_eq!(fields[1].tag, "");
    assert!(page.field_value().as_record().is_some());
}
