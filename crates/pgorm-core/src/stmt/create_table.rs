use crate::schema::{Schema, SqlType, DOCUMENT_COLUMN};

/// `CREATE TABLE` for a document table: one key column plus the JSONB
/// document column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub name: String,

    pub key_column: String,

    pub key_ty: SqlType,

    pub document_column: String,

    pub if_not_exists: bool,
}

impl CreateTable {
    pub fn from_schema(schema: &Schema) -> CreateTable {
        CreateTable {
            name: schema.table.clone(),
            key_column: schema.primary_key.column.clone(),
            key_ty: schema.primary_key.ty,
            document_column: DOCUMENT_COLUMN.to_string(),
            if_not_exists: true,
        }
    }
}
