//! Typed bind values that sqlx can encode against PostgreSQL.

use chrono::NaiveDateTime;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value that can be bound to a PostgreSQL query. Each variant reports its own
/// wire type so `$n` placeholders need no casts.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Null,
    Int(i32),
    BigInt(i64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl From<i32> for SqlParam {
    fn from(n: i32) -> Self {
        SqlParam::Int(n)
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<Option<&str>> for SqlParam {
    fn from(s: Option<&str>) -> Self {
        s.map(SqlParam::from).unwrap_or(SqlParam::Null)
    }
}

impl From<NaiveDateTime> for SqlParam {
    fn from(t: NaiveDateTime) -> Self {
        SqlParam::Timestamp(t)
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlParam::Null => <Option<String> as Encode<Postgres>>::encode_by_ref(&None, buf)?,
            SqlParam::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlParam::BigInt(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlParam::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf)?,
            SqlParam::Timestamp(t) => <NaiveDateTime as Encode<Postgres>>::encode_by_ref(t, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Null | SqlParam::Text(_) => <String as Type<Postgres>>::type_info(),
            SqlParam::Int(_) => <i32 as Type<Postgres>>::type_info(),
            SqlParam::BigInt(_) => <i64 as Type<Postgres>>::type_info(),
            SqlParam::Timestamp(_) => <NaiveDateTime as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}
