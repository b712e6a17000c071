use super::SqlType;

use std::any::TypeId;

/// A field declared on a mapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name of the field in the serialized JSON document.
    pub name: String,

    /// Classification of the field's Rust type.
    pub ty: FieldTy,

    /// Set when the field is the primary key; holds the key column name.
    pub primary_key: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldTy) -> Field {
        Field {
            name: name.into(),
            ty,
            primary_key: None,
        }
    }

    /// Marks the field as the primary key, stored in the default `id` column.
    pub fn primary_key(self) -> Field {
        self.primary_key_column(super::PrimaryKey::DEFAULT_COLUMN)
    }

    /// Marks the field as the primary key, stored in `column`.
    pub fn primary_key_column(mut self, column: impl Into<String>) -> Field {
        self.primary_key = Some(column.into());
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }
}

/// Classification of a field's Rust type.
///
/// Only the three key-capable types are distinguished; everything else is
/// carried by name so configuration errors can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTy {
    String,
    I32,
    I64,
    Other(&'static str),
}

impl FieldTy {
    /// Classifies `T` by type identity.
    pub fn of<T: ?Sized + 'static>() -> FieldTy {
        let id = TypeId::of::<T>();

        if id == TypeId::of::<String>() || id == TypeId::of::<str>() {
            FieldTy::String
        } else if id == TypeId::of::<i32>() {
            FieldTy::I32
        } else if id == TypeId::of::<i64>() {
            FieldTy::I64
        } else {
            FieldTy::Other(std::any::type_name::<T>())
        }
    }

    /// The key column type for this field, if it can be a primary key.
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            FieldTy::String => Some(SqlType::Text),
            FieldTy::I32 => Some(SqlType::Int),
            FieldTy::I64 => Some(SqlType::BigInt),
            FieldTy::Other(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldTy::String => "String",
            FieldTy::I32 => "i32",
            FieldTy::I64 => "i64",
            FieldTy::Other(name) => name,
        }
    }
}
