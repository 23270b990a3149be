//! `sqlx` bindings for Postgres
//!
//! Absent and null values bind as SQL `NULL`; a `NULL` cell decodes as an
//! explicit null, never as absent.

use crate::nullable::Nullable;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type, ValueRef};

impl<T> Type<Postgres> for Nullable<T>
where
    T: Type<Postgres>,
{
    fn type_info() -> PgTypeInfo {
        T::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        T::compatible(ty)
    }
}

impl<'q, T> Encode<'q, Postgres> for Nullable<T>
where
    T: Encode<'q, Postgres> + Default,
{
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
        match self.as_option() {
            Some(value) => value.encode_by_ref(buf),
            None => IsNull::Yes,
        }
    }
}

impl<'r, T> Decode<'r, Postgres> for Nullable<T>
where
    T: Decode<'r, Postgres> + Default,
{
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(Self::null());
        }
        T::decode(value).map(Self::from_value)
    }
}
