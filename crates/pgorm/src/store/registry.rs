use pgorm_core::Schema;

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::OnceCell;

/// Bootstrapped schemas, one per mapped type.
///
/// Entries are created on first request and never evicted. Each entry is
/// initialized at most once; concurrent first requests for the same type wait
/// on the same initialization.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: Mutex<HashMap<TypeId, Arc<OnceCell<Arc<Schema>>>>>,
}

impl Registry {
    pub(crate) fn entry(&self, ty: TypeId) -> Arc<OnceCell<Arc<Schema>>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.entry(ty).or_default().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }
}
