use crate::{
    driver::{Connection, Driver},
    err, Error, Result,
};

use deadpool::managed::{self, Metrics, RecycleError, RecycleResult};
use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

pub use deadpool::managed::Timeouts;

/// Sizing and timeouts of a store's connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Upper bound on open connections. Defaults to twice the number of
    /// logical cores; a driver may lower it further.
    pub max_size: usize,

    pub timeouts: Timeouts,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_size: managed::PoolConfig::default().max_size,
            timeouts: Timeouts::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Pool {
    inner: managed::Pool<Manager>,
}

/// A checked-out connection, handed back to the pool on drop.
pub(crate) struct PoolConnection(managed::Object<Manager>);

impl Pool {
    /// Builds the pool and checks one connection out, so an unreachable
    /// database fails here rather than on first use.
    pub(crate) async fn new(driver: Arc<dyn Driver>, config: &PoolConfig) -> Result<Pool> {
        let max_size = driver
            .max_connections()
            .map_or(config.max_size, |limit| limit.min(config.max_size));

        let inner = managed::Pool::builder(Manager { driver })
            .runtime(deadpool::Runtime::Tokio1)
            .max_size(max_size)
            .timeouts(config.timeouts)
            .build()
            .map_err(Error::connection_pool)?;

        let pool = Pool { inner };
        drop(pool.get().await?);
        Ok(pool)
    }

    pub(crate) async fn get(&self) -> Result<PoolConnection> {
        self.inner
            .get()
            .await
            .map(PoolConnection)
            .map_err(Error::connection_pool)
    }

    /// Drops idle connections; later checkouts fail.
    pub(crate) fn close(&self) {
        self.inner.close();
    }
}

#[derive(Debug)]
struct Manager {
    driver: Arc<dyn Driver>,
}

impl managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }

    async fn recycle(&self, conn: &mut Box<dyn Connection>, _: &Metrics) -> RecycleResult<Error> {
        if conn.is_closed() {
            return Err(RecycleError::Backend(err!("connection closed by the server")));
        }

        Ok(())
    }
}

impl Deref for PoolConnection {
    type Target = dyn Connection;

    fn deref(&self) -> &Self::Target {
        &**self.0
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut **self.0
    }
}
