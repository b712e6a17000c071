mod async_mapper;
pub use async_mapper::AsyncMapper;

mod pending;
pub use pending::Pending;

use crate::{
    driver::Row,
    schema::{Schema, DOCUMENT_COLUMN},
    stmt::{Select, Upsert, Value},
    Document, Error, QueryBuilder, Result, Store,
};

use std::{marker::PhantomData, sync::Arc};

/// Synchronous save and load for one document type.
///
/// Obtained from [`Store::map_sync`]. Every call blocks the current thread
/// until the database answers.
pub struct Mapper<T> {
    schema: Arc<Schema>,
    store: Store,
    _p: PhantomData<fn() -> T>,
}

impl<T: Document> Mapper<T> {
    pub(crate) fn new(schema: Arc<Schema>, store: Store) -> Mapper<T> {
        Mapper {
            schema,
            store,
            _p: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Inserts `value`, replacing any stored document with the same key.
    pub fn save(&self, value: &T) -> Result<()> {
        self.store.block_on(self.save_document(value))
    }

    /// Reads the document stored under `key`.
    ///
    /// Returns `Ok(None)` when no row has that key. A stored document that no
    /// longer deserializes into `T` is a decode error, not `None`.
    pub fn load(&self, key: impl Into<Value>) -> Result<Option<T>> {
        self.store.block_on(self.load_document(key.into()))
    }

    /// Like [`load`](Self::load), but a missing row is an error.
    pub fn get(&self, key: impl Into<Value>) -> Result<T> {
        self.store.block_on(self.get_document(key.into()))
    }

    /// Starts a raw query over this type's table.
    ///
    /// See [`QueryBuilder`] for the caveats.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(&self.schema.table)
    }

    /// Runs `query` and decodes the `data` column of every row.
    pub fn select(&self, query: QueryBuilder) -> Result<Vec<T>> {
        self.store.block_on(self.select_documents(query))
    }

    /// The asynchronous counterpart sharing this mapper's schema.
    pub fn into_async(self) -> AsyncMapper<T> {
        AsyncMapper::new(self)
    }

    pub(crate) async fn save_document(&self, value: &T) -> Result<()> {
        let document = serde_json::to_value(value)
            .map_err(|err| Error::encode(std::any::type_name::<T>(), err))?;

        let key = match value.key() {
            Some(key) => self.schema.primary_key.coerce(key)?,
            None => self.schema.primary_key.extract(&document)?,
        };
        let stmt = Upsert::new(&self.schema, key, document.to_string());

        self.store.exec(&stmt.into()).await?;
        Ok(())
    }

    pub(crate) async fn load_document(&self, key: Value) -> Result<Option<T>> {
        let key = self.schema.primary_key.coerce(key)?;
        let stmt = Select::by_key(&self.schema, key.clone());

        let rows = self.store.exec(&stmt.into()).await?.into_rows();

        match rows.into_iter().next() {
            Some(row) => self.decode(row, &key).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) async fn get_document(&self, key: Value) -> Result<T> {
        match self.load_document(key.clone()).await? {
            Some(value) => Ok(value),
            None => Err(Error::record_not_found(format!(
                "table={} key={key}",
                self.schema.table
            ))),
        }
    }

    pub(crate) async fn select_documents(&self, query: QueryBuilder) -> Result<Vec<T>> {
        let rows = self.store.exec(&query.into_statement()).await?.into_rows();

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| self.decode(row, &format!("row {index}")))
            .collect()
    }

    /// Deserializes the document column of `row`, or its only column when
    /// the query selected something else.
    fn decode(&self, mut row: Row, key: &dyn core::fmt::Display) -> Result<T> {
        let value = match row.take(DOCUMENT_COLUMN) {
            Some(value) => value,
            None if row.len() == 1 => row.first().cloned().unwrap_or_default(),
            None => {
                return Err(Error::invalid_configuration(format!(
                    "query on `{}` returned no `{DOCUMENT_COLUMN}` column",
                    self.schema.table
                )))
            }
        };

        value
            .into_json()
            .and_then(serde_json::from_value)
            .map_err(|err| Error::decode(&self.schema.table, key, err))
    }
}

impl<T> Clone for Mapper<T> {
    fn clone(&self) -> Self {
        Mapper {
            schema: self.schema.clone(),
            store: self.store.clone(),
            _p: PhantomData,
        }
    }
}

impl<T> core::fmt::Debug for Mapper<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mapper")
            .field("model", &self.schema.model)
            .field("table", &self.schema.table)
            .finish()
    }
}
