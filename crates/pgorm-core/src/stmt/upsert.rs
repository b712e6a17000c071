use super::Value;
use crate::schema::{Schema, DOCUMENT_COLUMN};

/// Insert-or-replace of a single document.
///
/// A row with the same key is overwritten in full: both the key and the
/// document column take the new values.
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    pub table: String,

    pub key_column: String,

    pub document_column: String,

    /// Key value, already coerced to the key column type.
    pub key: Value,

    /// Serialized JSON text of the document.
    pub document: String,
}

impl Upsert {
    pub fn new(schema: &Schema, key: Value, document: String) -> Upsert {
        Upsert {
            table: schema.table.clone(),
            key_column: schema.primary_key.column.clone(),
            document_column: DOCUMENT_COLUMN.to_string(),
            key,
            document,
        }
    }
}
