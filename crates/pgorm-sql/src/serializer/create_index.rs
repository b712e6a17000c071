use super::{ident::FieldKey, Formatter, Ident, IfNotExists, Params, ToSql};

use pgorm_core::{
    schema::{IndexTarget, DOCUMENT_COLUMN},
    stmt,
};

impl ToSql for &stmt::CreateIndex {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let target = &self.target;

        fmt!(
            f, "CREATE INDEX " IfNotExists(self.if_not_exists) Ident(&self.name) " ON " Ident(&self.on)
            " USING " self.method " (" target ")"
        );
    }
}

impl ToSql for &IndexTarget {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            IndexTarget::Document => fmt!(f, DOCUMENT_COLUMN),
            IndexTarget::Path(field) => {
                fmt!(f, "(" DOCUMENT_COLUMN " -> " FieldKey(field) ")")
            }
        }
    }
}
