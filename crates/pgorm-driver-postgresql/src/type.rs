use pgorm_core::{bail, stmt, Error, Result};
use postgres_types::{FromSql, Type};
use tokio_postgres::Row;

pub trait TypeExt {
    /// Reads column `index` of `row` as a [`stmt::Value`].
    fn read(&self, row: &Row, index: usize) -> Result<stmt::Value>;
}

impl TypeExt for Type {
    fn read(&self, row: &Row, index: usize) -> Result<stmt::Value> {
        // NOTE: the inner representation of the PostgreSQL type enum is not
        // accessible, so each supported type is matched by hand.
        let value = match *self {
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                get::<String>(row, index)?.map(stmt::Value::String)
            }
            Type::BOOL => get::<bool>(row, index)?.map(stmt::Value::Bool),
            Type::INT2 => get::<i16>(row, index)?.map(|v| stmt::Value::I32(v.into())),
            Type::INT4 => get::<i32>(row, index)?.map(stmt::Value::I32),
            Type::INT8 => get::<i64>(row, index)?.map(stmt::Value::I64),
            Type::JSON | Type::JSONB => {
                get::<serde_json::Value>(row, index)?.map(stmt::Value::Json)
            }
            _ => bail!("unsupported PostgreSQL column type `{}`", self),
        };

        Ok(value.unwrap_or(stmt::Value::Null))
    }
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, index: usize) -> Result<Option<T>> {
    row.try_get::<usize, Option<T>>(index)
        .map_err(Error::driver_operation_failed)
}
