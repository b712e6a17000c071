mod pool;
use pool::Pool;
pub use pool::{PoolConfig, Timeouts};

mod registry;
use registry::Registry;

use crate::{
    driver::{Driver, Response, Row},
    mapper::{AsyncMapper, Mapper},
    stmt::{Raw, Statement, Value},
    Document, Error, Result, StoreConfig,
};

use pgorm_core::Schema;
use std::{
    any::TypeId,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Shared state between all `Store` clones.
struct Shared {
    driver: Arc<dyn Driver>,
    pool_config: PoolConfig,
    pool: Mutex<Option<Pool>>,
    registry: Registry,

    /// Handle to `runtime`, which drives connection I/O and async mapper
    /// tasks.
    handle: Handle,

    /// Only `None` while the store is being dropped.
    runtime: Option<Runtime>,
}

/// Owns the connection pool, the worker runtime and the mapper registry.
///
/// Cloning is cheap; clones share all state.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

impl Store {
    /// Creates a PostgreSQL-backed store. Call [`connect`](Self::connect)
    /// before mapping types.
    pub fn new(config: StoreConfig) -> Result<Store> {
        let driver = config.driver()?;
        Store::build(Arc::new(driver), config.pool, config.worker_threads)
    }

    /// Creates a store configured from `POSTGRES_URL`, `POSTGRES_USERNAME` and
    /// `POSTGRES_PASSWORD`.
    pub fn from_env() -> Result<Store> {
        Store::new(StoreConfig::from_env()?)
    }

    /// Creates a store over any [`Driver`].
    pub fn with_driver(driver: impl Driver, pool: PoolConfig) -> Result<Store> {
        Store::build(Arc::new(driver), pool, None)
    }

    fn build(
        driver: Arc<dyn Driver>,
        pool_config: PoolConfig,
        worker_threads: Option<usize>,
    ) -> Result<Store> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_all().thread_name("pgorm-worker");

        if let Some(worker_threads) = worker_threads {
            if worker_threads == 0 {
                return Err(Error::invalid_configuration(
                    "worker_threads must be greater than zero",
                ));
            }
            builder.worker_threads(worker_threads);
        }

        let runtime = builder
            .build()
            .map_err(|err| Error::from(err).context("failed to start the worker runtime"))?;

        Ok(Store {
            shared: Arc::new(Shared {
                driver,
                pool_config,
                pool: Mutex::new(None),
                registry: Registry::default(),
                handle: runtime.handle().clone(),
                runtime: Some(runtime),
            }),
        })
    }

    /// Opens the connection pool. Does nothing if it is already open.
    ///
    /// The pool is built without holding the store's lock. When two callers
    /// race, the first pool installed wins and the other is closed.
    pub fn connect(&self) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }

        let driver = self.shared.driver.clone();
        let config = self.shared.pool_config.clone();
        let opened = self.block_on(async move { Pool::new(driver, &config).await })?;

        let mut pool = self.lock_pool();
        if pool.is_some() {
            drop(pool);
            opened.close();
            return Ok(());
        }

        *pool = Some(opened);
        drop(pool);

        tracing::info!("connection pool opened");
        Ok(())
    }

    /// Closes the connection pool. Does nothing if it is not open.
    pub fn disconnect(&self) {
        if let Some(pool) = self.lock_pool().take() {
            pool.close();
            tracing::info!("connection pool closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.lock_pool().is_some()
    }

    /// The synchronous mapper for `T`, creating its table and indexes on
    /// first request.
    pub fn map_sync<T: Document>(&self) -> Result<Mapper<T>> {
        self.block_on(self.mapper::<T>())
    }

    /// The asynchronous mapper for `T`, creating its table and indexes on
    /// first request.
    pub fn map_async<T: Document>(&self) -> Result<AsyncMapper<T>> {
        Ok(self.map_sync::<T>()?.into_async())
    }

    /// Executes raw SQL with no parameters.
    pub fn execute(&self, sql: &str) -> Result<()> {
        self.execute_with(sql, vec![])
    }

    /// Executes raw SQL with positional (`$n`) parameters.
    pub fn execute_with(&self, sql: &str, params: Vec<Value>) -> Result<()> {
        let stmt = Raw::with_params(sql, params).into();
        self.block_on(async { self.exec(&stmt).await.map(|_| ()) })
    }

    /// Executes raw SQL and returns the resulting rows.
    pub fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
        let stmt = Raw::with_params(sql, params).into();
        self.block_on(async { Ok(self.exec(&stmt).await?.into_rows()) })
    }

    /// Number of types bootstrapped through this store.
    pub fn mapped_types(&self) -> usize {
        self.shared.registry.len()
    }

    pub(crate) async fn mapper<T: Document>(&self) -> Result<Mapper<T>> {
        let entry = self.shared.registry.entry(TypeId::of::<T>());

        let schema = entry
            .get_or_try_init(|| async {
                let schema = Schema::from_model(&T::model())?;
                self.bootstrap(&schema).await?;
                Ok::<_, Error>(Arc::new(schema))
            })
            .await?;

        Ok(Mapper::new(schema.clone(), self.clone()))
    }

    /// Issues the table and index DDL for `schema`.
    async fn bootstrap(&self, schema: &Schema) -> Result<()> {
        for stmt in Statement::bootstrap(schema) {
            self.exec(&stmt).await?;

            match &stmt {
                Statement::CreateTable(table) => {
                    tracing::info!(table = %table.name, model = %schema.model, "created table");
                }
                Statement::CreateIndex(index) => {
                    tracing::info!(
                        table = %index.on,
                        index = %index.name,
                        model = %schema.model,
                        "created index"
                    );
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Runs one statement on a pooled connection.
    pub(crate) async fn exec(&self, stmt: &Statement) -> Result<Response> {
        let pool = self.lock_pool().clone().ok_or_else(Error::not_connected)?;

        let mut connection = pool.get().await.inspect_err(|error| {
            tracing::error!(%error, "connection checkout failed");
        })?;

        connection.exec(stmt).await.inspect_err(|error| {
            tracing::error!(%error, "statement failed");
        })
    }

    /// Spawns `future` on the store's runtime.
    pub(crate) fn spawn<F>(&self, future: F) -> tokio::task::JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.shared.handle.spawn(future)
    }

    /// Drives `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded tokio runtime the calling worker is handed
    /// over with `block_in_place`. A current-thread runtime cannot be blocked
    /// this way, so the call fails there instead of deadlocking.
    pub(crate) fn block_on<T>(&self, future: impl Future<Output = Result<T>>) -> Result<T> {
        let runtime = &self.shared.handle;

        match Handle::try_current() {
            Err(_) => runtime.block_on(future),
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => {
                Err(Error::invalid_configuration(
                    "synchronous calls cannot block a current-thread tokio runtime; \
                     use the async mapper instead",
                ))
            }
            Ok(_) => tokio::task::block_in_place(|| runtime.block_on(future)),
        }
    }

    fn lock_pool(&self) -> std::sync::MutexGuard<'_, Option<Pool>> {
        self.shared
            .pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for Store {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("driver", &self.shared.driver)
            .field("connected", &self.is_connected())
            .field("mapped_types", &self.mapped_types())
            .finish()
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.get_mut().ok().and_then(Option::take) {
            pool.close();
        }

        // Dropping a runtime blocks, which panics inside async code.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
