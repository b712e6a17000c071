use super::Value;
use crate::schema::Schema;

/// Point lookup of a single row by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,

    pub key_column: String,

    pub key: Value,
}

impl Select {
    pub fn by_key(schema: &Schema, key: Value) -> Select {
        Select {
            table: schema.table.clone(),
            key_column: schema.primary_key.column.clone(),
            key,
        }
    }
}
