use super::DOCUMENT_COLUMN;

/// One index artifact created during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    /// Index name, unique per database.
    pub name: String,

    pub method: IndexMethod,

    pub target: IndexTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMethod {
    /// Ordered-comparable index supporting range and equality lookups.
    BTree,

    /// Inverted index supporting containment and key-existence lookups.
    Gin,
}

impl IndexMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexMethod::BTree => "BTREE",
            IndexMethod::Gin => "GIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    /// The whole document column.
    Document,

    /// A top-level field of the document (`data -> 'field'`).
    Path(String),
}

impl IndexDef {
    pub(super) fn btree(table: &str, field: &str) -> IndexDef {
        IndexDef {
            name: format!("idx_btree_{table}_{field}"),
            method: IndexMethod::BTree,
            target: IndexTarget::Path(field.to_string()),
        }
    }

    pub(super) fn document(table: &str) -> IndexDef {
        IndexDef {
            name: format!("idx_gin_{table}_{DOCUMENT_COLUMN}"),
            method: IndexMethod::Gin,
            target: IndexTarget::Document,
        }
    }

    pub(super) fn gin(table: &str, field: &str) -> IndexDef {
        IndexDef {
            name: format!("idx_gin_{table}_{field}"),
            method: IndexMethod::Gin,
            target: IndexTarget::Path(field.to_string()),
        }
    }
}
