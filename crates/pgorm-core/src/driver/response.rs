use crate::stmt::Value;

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by the operation
    Rows(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Response {
        Response::Count(count)
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Response::Count(_))
    }

    /// Returns the rows, or an empty list for count responses.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Response::Rows(rows) => rows,
            Response::Count(_) => vec![],
        }
    }
}

/// One result row, columns kept in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Removes and returns the value of `column`.
    pub fn take(&mut self, column: &str) -> Option<Value> {
        self.columns.shift_remove(column)
    }

    /// Value of the first column.
    pub fn first(&self) -> Option<&Value> {
        self.columns.get_index(0).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
