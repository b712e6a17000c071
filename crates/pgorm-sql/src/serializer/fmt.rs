use super::{Formatter, Params};

/// Writes each fragment in turn: `fmt!(f, "SELECT " Ident(t) ";")`.
macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_sql($f);
        )*
    }};
}

/// A piece of SQL text, possibly binding parameters as it is written.
pub(super) trait ToSql {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>);
}

impl ToSql for &str {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self);
    }
}

impl ToSql for &String {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        self.as_str().to_sql(f);
    }
}

/// Items separated by `", "`.
pub(super) struct Comma<L>(pub(super) L);

impl<L> ToSql for Comma<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        for (i, item) in self.0.into_iter().enumerate() {
            if i > 0 {
                f.dst.push_str(", ");
            }
            item.to_sql(f);
        }
    }
}

/// `IF NOT EXISTS ` when set, nothing otherwise.
pub(super) struct IfNotExists(pub(super) bool);

impl ToSql for IfNotExists {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if self.0 {
            f.dst.push_str("IF NOT EXISTS ");
        }
    }
}
