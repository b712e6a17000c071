use pgorm_core::stmt::Value;
use postgres_types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// A bound statement parameter, borrowed from the serializer's output.
#[derive(Debug)]
pub(crate) struct Param<'a>(pub(crate) &'a Value);

impl Param<'_> {
    /// The type declared for the parameter when the statement is prepared.
    ///
    /// Documents are sent as text and cast in SQL, and `NULL` has no type of
    /// its own, so both declare `TEXT`.
    pub(crate) fn declared_type(&self) -> Type {
        match self.0 {
            Value::Bool(_) => Type::BOOL,
            Value::I32(_) => Type::INT4,
            Value::I64(_) => Type::INT8,
            Value::Json(_) => Type::JSONB,
            Value::String(_) | Value::Null => Type::TEXT,
        }
    }
}

impl ToSql for Param<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match (self.0, ty) {
            (Value::Null, _) => Ok(IsNull::Yes),
            (Value::Bool(v), _) => v.to_sql(ty, out),
            // The server may infer a wider or narrower integer than declared.
            (Value::I32(v), &Type::INT8) => i64::from(*v).to_sql(ty, out),
            (Value::I32(v), _) => v.to_sql(ty, out),
            (Value::I64(v), &Type::INT4) => i32::try_from(*v)?.to_sql(ty, out),
            (Value::I64(v), _) => v.to_sql(ty, out),
            (Value::Json(v), _) => v.to_sql(ty, out),
            (Value::String(v), _) => v.to_sql(ty, out),
        }
    }

    accepts!(BOOL, INT4, INT8, TEXT, VARCHAR, JSON, JSONB);
    to_sql_checked!();
}
