use indexmap::{Equivalent, IndexMap};
use postgres_types::Type;
use tokio_postgres::{Client, Error, Statement};

/// Prepared-statement cache settings for each connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementCacheConfig {
    /// Whether prepared statements are cached at all.
    pub enabled: bool,

    /// Maximum number of statements kept per connection.
    pub size: usize,

    /// Statements with longer SQL text are never cached.
    pub sql_limit: usize,
}

impl Default for StatementCacheConfig {
    fn default() -> Self {
        StatementCacheConfig {
            enabled: true,
            size: 250,
            sql_limit: 2048,
        }
    }
}

/// Statements prepared on one connection, keyed by SQL text and parameter
/// types. The oldest entry is evicted once the cache is full.
#[derive(Debug)]
pub(crate) struct StatementCache {
    config: StatementCacheConfig,
    entries: IndexMap<CacheKey, Statement>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    sql: String,
    types: Vec<Type>,
}

/// Lookup form of [`CacheKey`]; must hash identically.
#[derive(Hash)]
struct CacheKeyRef<'a> {
    sql: &'a str,
    types: &'a [Type],
}

impl Equivalent<CacheKey> for CacheKeyRef<'_> {
    fn equivalent(&self, key: &CacheKey) -> bool {
        self.sql == key.sql && self.types == key.types.as_slice()
    }
}

impl StatementCache {
    pub(crate) fn new(config: StatementCacheConfig) -> StatementCache {
        StatementCache {
            config,
            entries: IndexMap::new(),
        }
    }

    /// Returns the cached statement for `sql` or prepares it on `client`.
    pub(crate) async fn prepare(
        &mut self,
        client: &Client,
        sql: &str,
        types: &[Type],
    ) -> Result<Statement, Error> {
        if let Some(statement) = self.entries.get(&CacheKeyRef { sql, types }) {
            return Ok(statement.clone());
        }

        let statement = client.prepare_typed(sql, types).await?;

        if self.admits(sql) {
            if self.entries.len() >= self.config.size {
                self.entries.shift_remove_index(0);
            }

            self.entries.insert(
                CacheKey {
                    sql: sql.to_string(),
                    types: types.to_vec(),
                },
                statement.clone(),
            );
        }

        Ok(statement)
    }

    fn admits(&self, sql: &str) -> bool {
        self.config.enabled && self.config.size > 0 && sql.len() <= self.config.sql_limit
    }
}
