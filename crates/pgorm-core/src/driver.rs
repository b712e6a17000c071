mod response;
pub use response::{Response, Row};

use crate::{async_trait, stmt::Statement, Result};

use std::fmt::Debug;

/// Opens connections to a database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Creates a new connection to the database.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on connections the database accepts, if the driver knows
    /// one. The pool never opens more than this.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// A single open database connection.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Executes one statement.
    ///
    /// DDL and upserts return [`Response::Count`]; selects and raw statements
    /// return [`Response::Rows`].
    async fn exec(&mut self, stmt: &Statement) -> Result<Response>;

    /// Returns `true` once the underlying connection is unusable.
    fn is_closed(&self) -> bool {
        false
    }
}
