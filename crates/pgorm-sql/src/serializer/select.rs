use super::{Formatter, Ident, Params, ToSql};

use pgorm_core::stmt;

impl ToSql for &stmt::Select {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let key = &self.key;

        fmt!(
            f, "SELECT * FROM " Ident(&self.table) " WHERE " Ident(&self.key_column) " = " key
        );
    }
}
