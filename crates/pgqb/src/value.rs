//! Primitive bind values.

use bytes::BytesMut;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A primitive value carried in a statement's binding list.
///
/// The variant set is deliberately closed: text, numbers, booleans and NULL
/// are the only things this builder will parameterize. Numbers are split into
/// `Int` and `Float` so integer keys never round-trip through floating point.
///
/// `Value` implements [`ToSql`], so a serialized binding list can be handed to
/// the database client verbatim. It also implements `PartialEq`, which makes
/// serialized statements directly comparable in tests.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// UTF-8 text (`TEXT`, `VARCHAR`, ...).
    Text(String),
    /// Signed integer (`INT2`/`INT4`/`INT8`, widened to the column type).
    Int(i64),
    /// Floating-point number (`FLOAT4`/`FLOAT8`).
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// SQL NULL.
    Null,
}

impl Value {
    /// Whether this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Text(s) if <&str as ToSql>::accepts(ty) => s.as_str().to_sql(ty, out),
            Value::Bool(b) if <bool as ToSql>::accepts(ty) => b.to_sql(ty, out),
            Value::Int(n) => {
                if *ty == Type::INT2 {
                    i16::try_from(*n)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*n)?.to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    n.to_sql(ty, out)
                } else if *ty == Type::FLOAT4 {
                    (*n as f32).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*n as f64).to_sql(ty, out)
                } else {
                    Err(format!("cannot bind integer value to column of type {ty}").into())
                }
            }
            Value::Float(n) => {
                if *ty == Type::FLOAT4 {
                    (*n as f32).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    n.to_sql(ty, out)
                } else {
                    Err(format!("cannot bind float value to column of type {ty}").into())
                }
            }
            other => Err(format!("cannot bind {} value to column of type {ty}", other.kind()).into()),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // NULL must be bindable to any column type; per-variant mismatches are
        // reported from `to_sql` instead.
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_and_string() {
        assert_eq!(Value::from("alice"), Value::Text("alice".to_string()));
        assert_eq!(Value::from("x".to_string()), Value::Text("x".to_string()));
    }

    #[test]
    fn from_integers_widens() {
        assert_eq!(Value::from(1i16), Value::Int(1));
        assert_eq!(Value::from(2i32), Value::Int(2));
        assert_eq!(Value::from(3i64), Value::Int(3));
    }

    #[test]
    fn from_floats() {
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from(0.5f32), Value::Float(0.5));
    }

    #[test]
    fn from_option_none_is_null() {
        assert_eq!(Value::from(Option::<i64>::None), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
        assert!(Value::from(Option::<bool>::None).is_null());
    }

    #[test]
    fn int_encodes_as_int8() {
        let mut buf = BytesMut::new();
        let is_null = Value::Int(42).to_sql(&Type::INT8, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], &42i64.to_be_bytes());
    }

    #[test]
    fn int_rejects_text_column() {
        let mut buf = BytesMut::new();
        assert!(Value::Int(42).to_sql(&Type::TEXT, &mut buf).is_err());
    }

    #[test]
    fn null_encodes_for_any_type() {
        let mut buf = BytesMut::new();
        let is_null = Value::Null.to_sql(&Type::TIMESTAMPTZ, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
    }
}
