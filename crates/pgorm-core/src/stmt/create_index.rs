use crate::schema::{IndexDef, IndexMethod, IndexTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    /// Name of the index
    pub name: String,

    /// Table the index is created on
    pub on: String,

    pub method: IndexMethod,

    pub target: IndexTarget,

    pub if_not_exists: bool,
}

impl CreateIndex {
    pub fn new(table: &str, index: &IndexDef) -> CreateIndex {
        CreateIndex {
            name: index.name.clone(),
            on: table.to_string(),
            method: index.method,
            target: index.target.clone(),
            if_not_exists: true,
        }
    }
}
