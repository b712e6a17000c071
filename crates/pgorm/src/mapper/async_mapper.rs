use super::{Mapper, Pending};
use crate::{schema::Schema, stmt::Value, Document, QueryBuilder};

/// Save and load for one document type, run on the store's worker runtime.
///
/// Each call returns immediately with a [`Pending`] handle. Operations
/// submitted concurrently may complete in any order.
pub struct AsyncMapper<T> {
    mapper: Mapper<T>,
}

impl<T: Document> AsyncMapper<T> {
    pub(crate) fn new(mapper: Mapper<T>) -> AsyncMapper<T> {
        AsyncMapper { mapper }
    }

    /// The synchronous mapper this one dispatches to.
    pub fn mapper(&self) -> &Mapper<T> {
        &self.mapper
    }

    pub fn schema(&self) -> &Schema {
        self.mapper.schema()
    }

    pub fn save(&self, value: T) -> Pending<()> {
        let mapper = self.mapper.clone();
        Pending::spawn(self.mapper.store(), async move {
            mapper.save_document(&value).await
        })
    }

    pub fn load(&self, key: impl Into<Value>) -> Pending<Option<T>> {
        let mapper = self.mapper.clone();
        let key = key.into();
        Pending::spawn(self.mapper.store(), async move {
            mapper.load_document(key).await
        })
    }

    pub fn get(&self, key: impl Into<Value>) -> Pending<T> {
        let mapper = self.mapper.clone();
        let key = key.into();
        Pending::spawn(self.mapper.store(), async move {
            mapper.get_document(key).await
        })
    }

    pub fn query(&self) -> QueryBuilder {
        self.mapper.query()
    }

    pub fn select(&self, query: QueryBuilder) -> Pending<Vec<T>> {
        let mapper = self.mapper.clone();
        Pending::spawn(self.mapper.store(), async move {
            mapper.select_documents(query).await
        })
    }
}

impl<T> Clone for AsyncMapper<T> {
    fn clone(&self) -> Self {
        AsyncMapper {
            mapper: self.mapper.clone(),
        }
    }
}

impl<T> core::fmt::Debug for AsyncMapper<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AsyncMapper")
            .field("mapper", &self.mapper)
            .finish()
    }
}
