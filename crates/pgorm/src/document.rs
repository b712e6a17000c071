use crate::{schema::Model, stmt::Value};

use serde::{de::DeserializeOwned, Serialize};

/// A type stored as a JSON document in its own table.
///
/// Usually implemented with `#[derive(Document)]`. A hand-written impl
/// builds the metadata with [`Model::new`]:
///
/// ```ignore
/// impl Document for Widget {
///     fn model() -> Model {
///         Model::new("app::Widget")
///             .table("widgets")
///             .field(Field::new("id", FieldTy::of::<String>()).primary_key())
///             .index("name")
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Storage metadata for the type.
    fn model() -> Model;

    /// The primary key value held by `self`.
    ///
    /// The derive reads it straight from the key field. Returning `None`
    /// makes `save` look the key up in the serialized document under the
    /// key field's name instead.
    fn key(&self) -> Option<Value> {
        None
    }
}
