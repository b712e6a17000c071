use super::{Formatter, Params, ToSql};

use pgorm_core::schema::{IndexMethod, SqlType};

impl ToSql for SqlType {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self.as_str());
    }
}

impl ToSql for IndexMethod {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self.as_str());
    }
}
