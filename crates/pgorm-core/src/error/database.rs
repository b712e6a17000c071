use super::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// PostgreSQL, its client library or the connection pool reported a failure.
///
/// Covers bootstrap DDL, upserts, key lookups and any raw SQL sent through
/// the store or the query builder.
#[derive(Debug)]
pub(super) struct DatabaseError {
    stage: Stage,
    source: Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Building the pool or checking a connection out of it.
    Pool,

    /// Connecting, preparing or running a statement.
    Statement,
}

impl DatabaseError {
    pub(super) fn source_ref(&self) -> &(dyn std::error::Error + 'static) {
        self.source.as_ref()
    }
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source_ref())
    }
}

impl core::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.stage == Stage::Pool {
            f.write_str("connection pool: ")?;
        }

        // tokio-postgres keeps the server message in the source chain.
        core::fmt::Display::fmt(&self.source, f)?;
        let mut next = self.source.source();
        while let Some(err) = next {
            write!(f, ": {err}")?;
            next = err.source();
        }
        Ok(())
    }
}

impl Error {
    fn database(stage: Stage, source: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Database(DatabaseError {
            stage,
            source: Box::new(source),
        }))
    }

    /// Wraps a failure to build the pool or check a connection out of it.
    pub fn connection_pool(source: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::database(Stage::Pool, source)
    }

    /// Wraps a client error raised while talking to the database.
    pub fn driver_operation_failed(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::database(Stage::Statement, source)
    }

    pub fn is_connection_pool(&self) -> bool {
        self.is_database(Stage::Pool)
    }

    pub fn is_driver_operation_failed(&self) -> bool {
        self.is_database(Stage::Statement)
    }

    fn is_database(&self, stage: Stage) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::Database(err) if err.stage == stage))
    }
}
