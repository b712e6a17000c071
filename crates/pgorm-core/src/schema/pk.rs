use super::SqlType;
use crate::{stmt::Value, Error, Result};

/// The primary key of a mapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Name of the key field inside the JSON document.
    pub field: String,

    /// Name of the key column in the table.
    pub column: String,

    /// SQL type of the key column.
    pub ty: SqlType,
}

impl PrimaryKey {
    /// Key column used when the field does not name one.
    pub const DEFAULT_COLUMN: &'static str = "id";

    /// Reads the key out of a serialized document.
    pub fn extract(&self, document: &serde_json::Value) -> Result<Value> {
        let Some(value) = document.get(&self.field) else {
            return Err(Error::invalid_key(format!(
                "document has no field `{}`",
                self.field
            )));
        };

        let value = match value {
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(n) => Value::I64(n),
                None => {
                    return Err(Error::invalid_key(format!(
                        "field `{}` holds non-integer number {n}",
                        self.field
                    )))
                }
            },
            serde_json::Value::Null => {
                return Err(Error::invalid_key(format!(
                    "field `{}` is null",
                    self.field
                )))
            }
            other => {
                return Err(Error::invalid_key(format!(
                    "field `{}` holds unsupported value {other}",
                    self.field
                )))
            }
        };

        self.coerce(value)
    }

    /// Converts `value` to the key column type.
    ///
    /// Integers widen to `BIGINT` and narrow to `INT` when they fit. Text keys
    /// only accept strings.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        match (self.ty, value) {
            (SqlType::Text, value @ Value::String(_)) => Ok(value),
            (SqlType::Int, value @ Value::I32(_)) => Ok(value),
            (SqlType::Int, Value::I64(v)) => i32::try_from(v)
                .map(Value::I32)
                .map_err(|_| Error::invalid_key(format!("{v} is out of range for INT"))),
            (SqlType::BigInt, Value::I32(v)) => Ok(Value::I64(v.into())),
            (SqlType::BigInt, value @ Value::I64(_)) => Ok(value),
            (ty, value) => Err(Error::invalid_key(format!(
                "{} cannot be used as a {ty} key",
                value.describe()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(ty: SqlType) -> PrimaryKey {
        PrimaryKey {
            field: "id".to_string(),
            column: "id".to_string(),
            ty,
        }
    }

    #[test]
    fn extract_text_key() {
        let pk = key(SqlType::Text);
        let value = pk.extract(&json!({"id": "1234", "name": "n"})).unwrap();
        assert_eq!(value, Value::from("1234"));
    }

    #[test]
    fn extract_int_key_narrows() {
        let pk = key(SqlType::Int);
        assert_eq!(pk.extract(&json!({"id": 7})).unwrap(), Value::I32(7));
    }

    #[test]
    fn extract_missing_field() {
        let pk = key(SqlType::Text);
        let err = pk.extract(&json!({"name": "n"})).unwrap_err();
        assert!(err.is_invalid_key());
    }

    #[test]
    fn coerce_rules() {
        assert_eq!(key(SqlType::BigInt).coerce(Value::I32(3)).unwrap(), Value::I64(3));
        assert_eq!(key(SqlType::Int).coerce(Value::I64(3)).unwrap(), Value::I32(3));
        assert!(key(SqlType::Int)
            .coerce(Value::I64(i64::MAX))
            .unwrap_err()
            .is_invalid_key());
        assert!(key(SqlType::Text)
            .coerce(Value::I32(1))
            .unwrap_err()
            .is_invalid_key());
        assert!(key(SqlType::Int)
            .coerce(Value::from("1"))
            .unwrap_err()
            .is_invalid_key());
    }
}
