use super::{Comma, Formatter, Ident, Params, ToSql};

use pgorm_core::stmt;

/// `column = EXCLUDED.column`
struct Excluded<'a>(&'a str);

impl ToSql for Excluded<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(self.0) " = EXCLUDED." Ident(self.0));
    }
}

impl ToSql for &stmt::Upsert {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let columns = [self.key_column.as_str(), self.document_column.as_str()];
        let key = &self.key;
        let document = &stmt::Value::String(self.document.clone());

        fmt!(
            f, "INSERT INTO " Ident(&self.table) " (" Comma(columns.map(Ident)) ")"
            " VALUES (" key ", " document "::jsonb)"
            " ON CONFLICT (" Ident(&self.key_column) ") DO UPDATE SET "
            Comma(columns.map(Excluded))
        );
    }
}
