use super::{Formatter, Ident, IfNotExists, Params, ToSql};

use pgorm_core::stmt;

impl ToSql for &stmt::CreateTable {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(
            f, "CREATE TABLE " IfNotExists(self.if_not_exists) Ident(&self.name) " ("
            Ident(&self.key_column) " " self.key_ty " PRIMARY KEY NOT NULL UNIQUE, "
            Ident(&self.document_column) " JSONB)"
        );
    }
}
