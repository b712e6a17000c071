pub mod query_builder;
pub use query_builder::{Comparison, Order, QueryBuilder};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub use pgorm_core::stmt::Statement;
