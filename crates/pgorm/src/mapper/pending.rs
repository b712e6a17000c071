use crate::{Error, Result, Store};

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::task::JoinHandle;

/// Handle to an operation running on the store's worker runtime.
///
/// Await it from async code, or call [`wait`](Self::wait) to block. Dropping
/// the handle does not cancel the operation; use [`abort`](Self::abort).
#[must_use = "the result of the operation is only observable through the handle"]
pub struct Pending<T> {
    handle: JoinHandle<Result<T>>,
    store: Store,
}

impl<T: Send + 'static> Pending<T> {
    pub(crate) fn spawn<F>(store: &Store, future: F) -> Pending<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Pending {
            handle: store.spawn(future),
            store: store.clone(),
        }
    }

    /// Blocks the current thread until the operation completes.
    pub fn wait(self) -> Result<T> {
        let store = self.store.clone();
        store.block_on(self)
    }

    /// Cancels the operation. Awaiting the handle afterwards yields a
    /// cancelled [`TaskFailed`](Error::is_task_failed) error, unless the
    /// operation had already completed.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|res| match res {
            Ok(res) => res,
            Err(err) => Err(Error::task_failed(err.to_string(), err.is_cancelled())),
        })
    }
}

impl<T> core::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pending")
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}
