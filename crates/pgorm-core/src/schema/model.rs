use super::Field;

/// Metadata declared by a mapped type.
///
/// Produced by `#[derive(Document)]` or written by hand. Nothing here is
/// validated; [`Schema::from_model`](super::Schema::from_model) does that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// Name of the Rust type.
    pub name: String,

    /// Table the documents are stored in.
    pub table: Option<String>,

    pub fields: Vec<Field>,

    /// Fields to index with an ordered-comparable (B-tree) index.
    pub indices: Vec<String>,

    /// Fields to index with a document (GIN) index.
    pub gin_indices: Vec<String>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            ..Model::default()
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Model {
        self.table = Some(table.into());
        self
    }

    pub fn field(mut self, field: Field) -> Model {
        self.fields.push(field);
        self
    }

    pub fn index(mut self, field: impl Into<String>) -> Model {
        self.indices.push(field.into());
        self
    }

    pub fn gin_index(mut self, field: impl Into<String>) -> Model {
        self.gin_indices.push(field.into());
        self
    }
}
