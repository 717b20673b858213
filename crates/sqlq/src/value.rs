//! Bound argument values.
//!
//! Every value a statement binds ends up in the argument list as a [`Value`].
//! Conversions exist for the common scalar types so builder methods can take
//! plain Rust values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A single bound argument.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Json(serde_json::Value),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Timestamptz(DateTime<Utc>),
}

impl Value {
    /// Bind raw bytes (BLOB / BYTEA).
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(v.into())
    }

    /// Check if this is the NULL value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Bytes(v) => write!(f, "{v:?}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Json(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::Timestamptz(v) => write!(f, "{v}"),
        }
    }
}

/// Format an argument list as `[a b c]`.
pub(crate) fn fmt_args(args: &[Value], out: &mut String) {
    use std::fmt::Write;

    out.push('[');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{arg}");
    }
    out.push(']');
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u16 => I32,
    u32 => I64,
    f32 => F32,
    f64 => F64,
    String => Text,
    Uuid => Uuid,
    serde_json::Value => Json,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    DateTime<Utc> => Timestamptz,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::Value;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    type BoxError = Box<dyn Error + Sync + Send>;

    fn encode<T: ToSql>(v: &T, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        if !T::accepts(ty) {
            return Err(format!(
                "cannot bind {} to a parameter of type {}",
                std::any::type_name::<T>(),
                ty
            )
            .into());
        }
        v.to_sql(ty, out)
    }

    /// Integers are narrowed or widened to the parameter's declared width.
    fn encode_int(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match *ty {
            Type::INT2 => i16::try_from(v)?.to_sql(ty, out),
            Type::INT4 => i32::try_from(v)?.to_sql(ty, out),
            Type::INT8 => v.to_sql(ty, out),
            _ => Err(format!("cannot bind integer to a parameter of type {ty}").into()),
        }
    }

    impl ToSql for Value {
        fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => encode(v, ty, out),
                Value::I16(v) => encode_int(i64::from(*v), ty, out),
                Value::I32(v) => encode_int(i64::from(*v), ty, out),
                Value::I64(v) => encode_int(*v, ty, out),
                Value::F32(v) if *ty == Type::FLOAT8 => f64::from(*v).to_sql(ty, out),
                Value::F32(v) => encode(v, ty, out),
                Value::F64(v) => encode(v, ty, out),
                Value::Text(v) => encode(v, ty, out),
                Value::Bytes(v) => encode(v, ty, out),
                Value::Uuid(v) => encode(v, ty, out),
                Value::Json(v) => encode(v, ty, out),
                Value::Date(v) => encode(v, ty, out),
                Value::Time(v) => encode(v, ty, out),
                Value::DateTime(v) => encode(v, ty, out),
                Value::Timestamptz(v) => encode(v, ty, out),
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        tokio_postgres::types::to_sql_checked!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_is_null() {
        let v: Value = None::<i32>.into();
        assert!(v.is_null());
        let v: Value = Some("x").into();
        assert_eq!(v, Value::Text("x".into()));
    }

    #[test]
    fn args_format_like_a_list() {
        let mut out = String::new();
        fmt_args(
            &[Value::from("1"), Value::from("TestMan"), Value::from(100)],
            &mut out,
        );
        assert_eq!(out, "[1 TestMan 100]");

        let mut out = String::new();
        fmt_args(&[], &mut out);
        assert_eq!(out, "[]");
    }

    #[test]
    fn unsigned_values_widen() {
        assert_eq!(Value::from(7u16), Value::I32(7));
        assert_eq!(Value::from(7u32), Value::I64(7));
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::from(1), Value::from("a"), Value::Null]).unwrap();
        assert_eq!(json, r#"[1,"a",null]"#);
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn postgres_bridge_narrows_integers() {
        use bytes::BytesMut;
        use tokio_postgres::types::{IsNull, ToSql, Type};

        let mut out = BytesMut::new();
        let is_null = Value::I64(5).to_sql(&Type::INT4, &mut out).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(out.len(), 4);

        let mut out = BytesMut::new();
        assert!(Value::I64(i64::MAX).to_sql(&Type::INT4, &mut out).is_err());

        let mut out = BytesMut::new();
        assert!(Value::Text("x".into()).to_sql(&Type::INT4, &mut out).is_err());
        assert!(matches!(
            Value::Null.to_sql(&Type::INT4, &mut out).unwrap(),
            IsNull::Yes
        ));
    }
}
