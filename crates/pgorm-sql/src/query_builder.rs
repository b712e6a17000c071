//! Raw `SELECT` composition over a document table.
//!
//! **This is an unsafe, low-level escape hatch.** Field names, SQL type names
//! and literals are concatenated into the query text as given. Nothing is
//! quoted, escaped or checked, so the builder must never see untrusted input.
//! Use [`QueryBuilder::compare_param`] to bind a value as a parameter instead
//! of splicing it into the text.

use pgorm_core::{
    schema::DOCUMENT_COLUMN,
    stmt::{Raw, Statement, Value},
};

/// Comparison operator used by [`QueryBuilder::compare_value`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Lt,
    Eq,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Lt => "<",
            Comparison::Eq => "=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Ascending => "ASC",
            Order::Descending => "DESC",
        }
    }
}

/// Accumulates a `SELECT data FROM <table> ...` query fragment by fragment.
///
/// Fragments are appended in call order; the builder does not reorder or
/// validate them.
///
/// ```
/// use pgorm_sql::{Comparison, Order, QueryBuilder};
///
/// let query = QueryBuilder::new("widgets")
///     .where_clause()
///     .has("name")
///     .and()
///     .compare_value("size", "int", "3", Comparison::Gt)
///     .order("size", "int", Order::Descending);
///
/// assert_eq!(
///     query.sql(),
///     "SELECT data FROM widgets WHERE data->'name' IS NOT NULL \
///      AND (data->'size')::text::int > 3 ORDER BY (data->'size')::text::int DESC"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    sql: String,
    params: Vec<Value>,
}

impl QueryBuilder {
    pub fn new(table: &str) -> QueryBuilder {
        QueryBuilder {
            sql: format!("SELECT {DOCUMENT_COLUMN} FROM {table}"),
            params: vec![],
        }
    }

    /// Begins the predicate clause.
    pub fn where_clause(self) -> QueryBuilder {
        self.push("WHERE")
    }

    /// `data->'<field>' IS NOT NULL`
    pub fn has(self, field: &str) -> QueryBuilder {
        let fragment = format!("{} IS NOT NULL", path(field));
        self.push(&fragment)
    }

    pub fn and(self) -> QueryBuilder {
        self.push("AND")
    }

    /// `(data->'<field>')::text::<ty> <op> <literal>`, with `literal` spliced
    /// in verbatim.
    pub fn compare_value(
        self,
        field: &str,
        ty: &str,
        literal: &str,
        comparison: Comparison,
    ) -> QueryBuilder {
        let fragment = format!("{} {} {literal}", cast(field, ty), comparison.symbol());
        self.push(&fragment)
    }

    /// Like [`compare_value`](Self::compare_value), but binds `value` as a
    /// positional parameter.
    pub fn compare_param(
        mut self,
        field: &str,
        ty: &str,
        value: impl Into<Value>,
        comparison: Comparison,
    ) -> QueryBuilder {
        self.params.push(value.into());
        let fragment = format!(
            "{} {} ${}",
            cast(field, ty),
            comparison.symbol(),
            self.params.len()
        );
        self.push(&fragment)
    }

    /// Compares two fields of the same document.
    pub fn compare_field(
        self,
        field1: &str,
        ty1: &str,
        field2: &str,
        ty2: &str,
        comparison: Comparison,
    ) -> QueryBuilder {
        let fragment = format!(
            "{} {} {}",
            cast(field1, ty1),
            comparison.symbol(),
            cast(field2, ty2)
        );
        self.push(&fragment)
    }

    /// `ORDER BY (data->'<field>')::text::<ty> ASC|DESC`
    pub fn order(self, field: &str, ty: &str, order: Order) -> QueryBuilder {
        let fragment = format!("ORDER BY {} {}", cast(field, ty), order.as_str());
        self.push(&fragment)
    }

    /// The query text composed so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values bound by [`compare_param`](Self::compare_param), in placeholder
    /// order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_statement(self) -> Statement {
        Statement::Raw(Raw::with_params(self.sql, self.params))
    }

    fn push(mut self, fragment: &str) -> QueryBuilder {
        self.sql.push(' ');
        self.sql.push_str(fragment);
        self
    }
}

impl core::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.sql)
    }
}

fn path(field: &str) -> String {
    format!("{DOCUMENT_COLUMN}->'{field}'")
}

fn cast(field: &str, ty: &str) -> String {
    format!("({})::text::{ty}", path(field))
}
