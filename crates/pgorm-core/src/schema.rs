mod field;
pub use field::{Field, FieldTy};

mod index;
pub use index::{IndexDef, IndexMethod, IndexTarget};

mod model;
pub use model::Model;

mod pk;
pub use pk::PrimaryKey;

mod ty;
pub use ty::SqlType;

use crate::{Error, Result};
use indexmap::IndexSet;

/// Name of the JSONB column holding the serialized document.
pub const DOCUMENT_COLUMN: &str = "data";

/// Storage layout for one mapped type.
///
/// Derived once from a [`Model`] and immutable afterwards. Owns everything
/// the bootstrap protocol and the save/load paths need: table name, key
/// column and the index artifacts to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Name of the mapped Rust type, used in logs and errors.
    pub model: String,

    /// Table holding one row per document.
    pub table: String,

    /// The key field and its column.
    pub primary_key: PrimaryKey,

    /// Fields receiving an ordered-comparable (B-tree) index.
    pub ordered_index_fields: IndexSet<String>,

    /// Fields receiving a per-field document (GIN) index.
    pub document_index_fields: IndexSet<String>,

    /// Every index artifact in creation order.
    pub indices: Vec<IndexDef>,
}

impl Schema {
    /// Derives the storage schema from a type's metadata.
    ///
    /// Fails with a configuration error when the table name is missing, when
    /// there is not exactly one primary key field, or when the key field's
    /// type has no SQL mapping.
    pub fn from_model(model: &Model) -> Result<Schema> {
        let table = model.table.as_deref().filter(|table| !table.trim().is_empty());
        let Some(table) = table else {
            return Err(Error::missing_table_metadata(&model.name));
        };

        let mut keys = model.fields.iter().filter(|field| field.is_primary_key());

        let Some(key) = keys.next() else {
            return Err(Error::missing_primary_key(&model.name));
        };

        let extra: Vec<_> = keys.collect();
        if !extra.is_empty() {
            let fields = core::iter::once(key)
                .chain(extra)
                .map(|field| field.name.clone())
                .collect();
            return Err(Error::duplicate_primary_key(&model.name, fields));
        }

        let Some(ty) = key.ty.sql_type() else {
            return Err(Error::unsupported_primary_key_type(
                &model.name,
                &key.name,
                key.ty.name(),
            ));
        };

        let primary_key = PrimaryKey {
            field: key.name.clone(),
            column: key
                .primary_key
                .clone()
                .unwrap_or_else(|| PrimaryKey::DEFAULT_COLUMN.to_string()),
            ty,
        };

        let ordered_index_fields: IndexSet<String> = model.indices.iter().cloned().collect();
        let document_index_fields: IndexSet<String> = model.gin_indices.iter().cloned().collect();

        let mut indices = Vec::with_capacity(ordered_index_fields.len() + document_index_fields.len() + 1);

        for field in &ordered_index_fields {
            indices.push(IndexDef::btree(table, field));
        }

        // Every table gets the whole-document index.
        indices.push(IndexDef::document(table));

        for field in &document_index_fields {
            indices.push(IndexDef::gin(table, field));
        }

        Ok(Schema {
            model: model.name.clone(),
            table: table.to_string(),
            primary_key,
            ordered_index_fields,
            document_index_fields,
            indices,
        })
    }

    /// Always `true`: the baseline GIN index over the whole document is part
    /// of every schema.
    pub fn whole_document_indexed(&self) -> bool {
        self.indices
            .iter()
            .any(|index| index.target == IndexTarget::Document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Model {
        Model::new("app::Widget")
            .table("widgets")
            .field(Field::new("id", FieldTy::of::<String>()).primary_key())
            .field(Field::new("name", FieldTy::of::<String>()))
            .field(Field::new("tag", FieldTy::of::<String>()))
    }

    #[test]
    fn derives_table_and_key() {
        let schema = Schema::from_model(&widget()).unwrap();

        assert_eq!(schema.table, "widgets");
        assert_eq!(schema.model, "app::Widget");
        assert_eq!(schema.primary_key.field, "id");
        assert_eq!(schema.primary_key.column, "id");
        assert_eq!(schema.primary_key.ty, SqlType::Text);
        assert!(schema.whole_document_indexed());
        assert_eq!(schema.indices.len(), 1);
    }

    #[test]
    fn key_column_can_differ_from_field() {
        let model = Model::new("app::Account")
            .table("accounts")
            .field(Field::new("account_id", FieldTy::of::<i64>()).primary_key_column("pk"));

        let schema = Schema::from_model(&model).unwrap();
        assert_eq!(schema.primary_key.field, "account_id");
        assert_eq!(schema.primary_key.column, "pk");
        assert_eq!(schema.primary_key.ty, SqlType::BigInt);
    }

    #[test]
    fn index_order_btree_then_document_then_gin() {
        let model = widget().index("name").index("tag").gin_index("tag");
        let schema = Schema::from_model(&model).unwrap();

        let names: Vec<_> = schema.indices.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "idx_btree_widgets_name",
                "idx_btree_widgets_tag",
                "idx_gin_widgets_data",
                "idx_gin_widgets_tag",
            ]
        );
    }

    #[test]
    fn duplicate_index_fields_collapse() {
        let model = widget().index("name").index("name");
        let schema = Schema::from_model(&model).unwrap();
        assert_eq!(schema.ordered_index_fields.len(), 1);
        assert_eq!(schema.indices.len(), 2);
    }

    #[test]
    fn missing_table() {
        let model = Model::new("app::NoTable")
            .field(Field::new("id", FieldTy::of::<String>()).primary_key());

        let err = Schema::from_model(&model).unwrap_err();
        assert!(err.is_missing_table_metadata());
    }

    #[test]
    fn blank_table_is_missing() {
        for name in ["", "   "] {
            let model = widget().table(name);
            let err = Schema::from_model(&model).unwrap_err();
            assert!(err.is_missing_table_metadata(), "table {name:?}");
        }
    }

    #[test]
    fn missing_primary_key() {
        let model = Model::new("app::NoKey")
            .table("widgets")
            .field(Field::new("id", FieldTy::of::<String>()));

        let err = Schema::from_model(&model).unwrap_err();
        assert!(err.is_missing_primary_key());
    }

    #[test]
    fn duplicate_primary_key() {
        let model = Model::new("app::TwoKeys")
            .table("widgets")
            .field(Field::new("id", FieldTy::of::<String>()).primary_key())
            .field(Field::new("other", FieldTy::of::<i32>()).primary_key());

        let err = Schema::from_model(&model).unwrap_err();
        assert!(err.is_duplicate_primary_key());
        assert!(err.to_string().contains("(id, other)"));
    }

    #[test]
    fn unsupported_primary_key_type() {
        let model = Model::new("app::FloatKey")
            .table("widgets")
            .field(Field::new("id", FieldTy::of::<f64>()).primary_key());

        let err = Schema::from_model(&model).unwrap_err();
        assert!(err.is_unsupported_primary_key_type());
        assert!(err.to_string().contains("`f64`"));
    }

    #[test]
    fn missing_table_reported_before_missing_key() {
        let model = Model::new("app::Empty");
        let err = Schema::from_model(&model).unwrap_err();
        assert!(err.is_missing_table_metadata());
    }
}
