#[macro_use]
mod fmt;
use fmt::{Comma, IfNotExists, ToSql};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod create_index;
mod create_table;
mod select;
mod ty;
mod upsert;

use pgorm_core::stmt::Statement;

/// Serialize a statement to a PostgreSQL SQL string
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer { _priv: () }
    }

    /// Serializes `stmt`, appending bound values to `params`.
    ///
    /// Generated statements are terminated with `;`. Raw statements are
    /// returned exactly as supplied.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        match stmt {
            Statement::CreateIndex(stmt) => stmt.to_sql(&mut fmt),
            Statement::CreateTable(stmt) => stmt.to_sql(&mut fmt),
            Statement::Select(stmt) => stmt.to_sql(&mut fmt),
            Statement::Upsert(stmt) => stmt.to_sql(&mut fmt),
            Statement::Raw(stmt) => {
                for param in &stmt.params {
                    fmt.params.push(param);
                }
                return stmt.sql.clone();
            }
        }

        ret.push(';');
        ret
    }
}
