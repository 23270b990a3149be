use tristate_null::{NullInt, NullString};
use tristate_validation::{Record, Validator};

#[derive(Record)]
pub struct User {
    #[valid("required,stringlength(1|10)")]
    pub name: NullString,
    #[valid("required")]
    pub age: NullInt,
    pub nickname: Option<String>,
    password_hash: String,
}

fn main() {
    let user = User {
        name: NullString::from("alice"),
        age: NullInt::from_value(30),
        nickname: None,
        password_hash: String::new(),
    };
    let _ = &user.password_hash;
    assert!(Validator::default().validate(&user).passed());
}
