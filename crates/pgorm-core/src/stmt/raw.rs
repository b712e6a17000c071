use super::Value;

/// Caller-supplied SQL text with positional parameters.
///
/// The text is passed to the database as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    pub sql: String,

    pub params: Vec<Value>,
}

impl Raw {
    pub fn new(sql: impl Into<String>) -> Raw {
        Raw {
            sql: sql.into(),
            params: vec![],
        }
    }

    pub fn with_params(sql: impl Into<String>, params: Vec<Value>) -> Raw {
        Raw {
            sql: sql.into(),
            params,
        }
    }
}
