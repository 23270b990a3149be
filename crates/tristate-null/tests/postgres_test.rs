#![cfg(feature = "postgres")]

use sqlx::encode::IsNull;
use sqlx::postgres::{PgArgumentBuffer, Postgres};
use sqlx::{Decode, Encode, Type};
use tristate_null::{NullBool, NullInt, NullString, NullTime};

fn assert_bindable<T>()
where
    T: Type<Postgres> + for<'q> Encode<'q, Postgres> + for<'r> Decode<'r, Postgres>,
{
}

#[test]
fn test_nullable_scalars_bind_to_postgres() {
    assert_bindable::<NullString>();
    assert_bindable::<NullInt>();
    assert_bindable::<NullBool>();
    assert_bindable::<NullTime>();

    assert_eq!(NullInt::type_info(), <i64 as Type<Postgres>>::type_info());
}

#[test]
fn test_absent_and_null_encode_as_sql_null() {
    for value in [NullInt::absent(), NullInt::null()] {
        let mut buf = PgArgumentBuffer::default();
        assert!(matches!(value.encode_by_ref(&mut buf), IsNull::Yes));
    }

    let mut buf = PgArgumentBuffer::default();
    assert!(matches!(NullInt::from_value(7).encode_by_ref(&mut buf), IsNull::No));
}
