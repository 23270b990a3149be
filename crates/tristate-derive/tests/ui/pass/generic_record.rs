use tristate_null::NullString;
use tristate_validation::Record;

#[derive(Record)]
pub struct Envelope<T> {
    #[valid("required")]
    pub label: NullString,
    #[valid("required")]
    pub payload: T,
}

#[derive(Record)]
pub struct Wrapper<'a> {
    #[valid("stringlength(1|3)")]
    pub code: &'a str,
}

fn main() {
    let envelope = Envelope {
        label: NullString::from("box"),
        payload: 7u32,
    };
    assert!(tristate_validation::validate(&envelope).passed());

    let wrapper = Wrapper { code: "abcd" };
    assert!(!tristate_validation::validate(&wrapper).passed());
}
