/// A value bound to a statement parameter or read back from a row.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// A JSON document
    Json(serde_json::Value),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Converts the value into JSON, parsing strings that hold a document.
    ///
    /// Drivers may hand back the document column as text; in that case the
    /// string is parsed rather than wrapped.
    pub fn into_json(self) -> core::result::Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Json(v) => Ok(v),
            Self::String(v) => serde_json::from_str(&v),
            Self::Bool(v) => Ok(v.into()),
            Self::I32(v) => Ok(v.into()),
            Self::I64(v) => Ok(v.into()),
            Self::Null => Ok(serde_json::Value::Null),
        }
    }

    /// The value a key field serializes to.
    ///
    /// Strings and integral numbers map to their scalar variants, anything
    /// else is kept as JSON so key coercion can reject it.
    pub fn from_key<T: serde::Serialize + ?Sized>(key: &T) -> Value {
        match serde_json::to_value(key) {
            Ok(serde_json::Value::String(v)) => Self::String(v),
            Ok(serde_json::Value::Number(v)) => match v.as_i64() {
                Some(v) => Self::I64(v),
                None => Self::Json(v.into()),
            },
            Ok(serde_json::Value::Null) | Err(_) => Self::Null,
            Ok(other) => Self::Json(other),
        }
    }

    /// Short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Bool(v) => format!("bool {v}"),
            Self::I32(v) => format!("i32 {v}"),
            Self::I64(v) => format!("i64 {v}"),
            Self::Json(_) => "json document".to_string(),
            Self::Null => "null".to_string(),
            Self::String(v) => format!("string {v:?}"),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Json(v) => write!(f, "{v}"),
            Self::Null => f.write_str("NULL"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        Self::Json(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Self: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_document_parses() {
        let value = Value::from(r#"{"id":"1"}"#);
        assert_eq!(value.into_json().unwrap(), serde_json::json!({"id": "1"}));
    }

    #[test]
    fn option_none_is_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(5_i64)), Value::I64(5));
        assert_eq!(Value::from_key("a-1"), Value::String("a-1".to_string()));
        assert_eq!(Value::from_key(&7_u16), Value::I64(7));
        assert_eq!(Value::from_key(&1.5_f64), Value::Json(serde_json::json!(1.5)));
        assert!(Value::from_key(&None::<String>).is_null());
    }
}
