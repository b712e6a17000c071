use super::{Formatter, Params, ToSql};

/// Table, column or index name.
///
/// Names come from type metadata and are written verbatim, unquoted.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self.0.as_ref());
    }
}

/// A top-level document field, rendered as a string literal key.
pub(super) struct FieldKey<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for FieldKey<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('\'');
        f.dst.push_str(self.0.as_ref());
        f.dst.push('\'');
    }
}
