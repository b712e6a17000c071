mod create_index;
pub use create_index::CreateIndex;

mod create_table;
pub use create_table::CreateTable;

mod raw;
pub use raw::Raw;

mod select;
pub use select::Select;

mod upsert;
pub use upsert::Upsert;

mod value;
pub use value::Value;

use crate::schema::Schema;

/// A statement sent to the database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateIndex(CreateIndex),
    CreateTable(CreateTable),
    Raw(Raw),
    Select(Select),
    Upsert(Upsert),
}

impl Statement {
    /// The DDL statements bringing a database in line with `schema`.
    ///
    /// The table comes first, then the B-tree indexes, the whole-document GIN
    /// index and finally the per-field GIN indexes. Every statement is guarded
    /// by `IF NOT EXISTS`, so replaying the list is harmless.
    pub fn bootstrap(schema: &Schema) -> Vec<Statement> {
        let mut stmts = Vec::with_capacity(schema.indices.len() + 1);
        stmts.push(Statement::CreateTable(CreateTable::from_schema(schema)));

        for index in &schema.indices {
            stmts.push(Statement::CreateIndex(CreateIndex::new(&schema.table, index)));
        }

        stmts
    }

    /// Returns `true` when executing the statement yields rows.
    pub fn returns_rows(&self) -> bool {
        matches!(self, Statement::Select(_) | Statement::Raw(_))
    }

    pub fn is_ddl(&self) -> bool {
        matches!(self, Statement::CreateTable(_) | Statement::CreateIndex(_))
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Statement::CreateIndex(value)
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Statement::CreateTable(value)
    }
}

impl From<Raw> for Statement {
    fn from(value: Raw) -> Self {
        Statement::Raw(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}

impl From<Upsert> for Statement {
    fn from(value: Upsert) -> Self {
        Statement::Upsert(value)
    }
}
