//! Schema-on-read document storage on PostgreSQL.
//!
//! Each mapped type gets one table with a primary key column and a JSONB
//! `data` column holding the whole serialized value. Tables and indexes are
//! created on first use; values are written with an upsert and read back by
//! key.
//!
//! ```ignore
//! use pgorm::{Document, Store, StoreConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize, Document)]
//! #[table = "widgets"]
//! #[index("name")]
//! struct Widget {
//!     #[key]
//!     id: String,
//!     name: String,
//! }
//!
//! let store = Store::new(StoreConfig::from_env()?)?;
//! store.connect()?;
//!
//! let widgets = store.map_sync::<Widget>()?;
//! widgets.save(&Widget { id: "1".into(), name: "bolt".into() })?;
//! let widget = widgets.load("1")?;
//! ```

mod config;
pub use config::StoreConfig;

mod document;
pub use document::Document;

pub mod mapper;
pub use mapper::{AsyncMapper, Mapper, Pending};

pub mod store;
pub use store::{PoolConfig, Store};

pub use pgorm_core::{async_trait, bail, driver, err, schema, stmt, Error, Result};
pub use pgorm_driver_postgresql::{PostgreSQL, StatementCacheConfig};
pub use pgorm_macros::Document;
pub use pgorm_sql::{Comparison, Order, QueryBuilder};
