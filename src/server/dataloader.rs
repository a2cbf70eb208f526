//! Request-scoped batching of keyed lookups.
//!
//! Every [`DataLoader::load`] call joins the currently open batch. The batch is
//! dispatched, as a single [`BatchLoader::load_batch`] call over its distinct
//! keys, the next time the future driven by [`DataLoader::wrap`] yields to the
//! scheduler. Results are never cached: a key requested again after its batch
//! was dispatched is fetched again.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::future::poll_fn;
use std::hash::Hash;
use std::pin::pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{self, Poll};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tokio::sync::oneshot;
use uuid::Uuid;

pub trait BatchKey: Hash + Eq + Clone + Debug + Send + Sync + 'static {
    /// Blank keys resolve to `None` without joining a batch.
    fn is_blank(&self) -> bool {
        false
    }
}

impl BatchKey for &'static str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl BatchKey for Uuid {
    fn is_blank(&self) -> bool {
        self.is_nil()
    }
}

pub trait BatchLoader: Send + Sync + 'static {
    type K: BatchKey;
    type V: Clone + Send + 'static;
    type Error: Clone + Send + 'static;

    /// Fetches the records for `keys`, which are distinct. Keys missing from
    /// the returned map resolve to `None`.
    fn load_batch(
        &self,
        keys: &[Self::K],
    ) -> impl Future<Output = Result<HashMap<Self::K, Self::V>, Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError<E> {
    #[error("batch fetch failed: {0}")]
    Fetch(E),

    #[error("loader dropped before the batch was dispatched")]
    Abandoned,
}

pub type LoadResult<B> =
    Result<Option<<B as BatchLoader>::V>, LoadError<<B as BatchLoader>::Error>>;

struct PendingRequest<B: BatchLoader> {
    key: B::K,
    reply: oneshot::Sender<LoadResult<B>>,
}

pub struct DataLoader<B: BatchLoader> {
    open: Arc<Mutex<Vec<PendingRequest<B>>>>,
    batch_fn: Arc<B>,
}

impl<B: BatchLoader> Clone for DataLoader<B> {
    fn clone(&self) -> Self {
        Self {
            open: self.open.clone(),
            batch_fn: self.batch_fn.clone(),
        }
    }
}

impl<B: BatchLoader> DataLoader<B> {
    pub fn new(batch_fn: B) -> Self {
        Self {
            open: Default::default(),
            batch_fn: Arc::new(batch_fn),
        }
    }

    /// Enqueues `key` into the open batch and returns its deferred result.
    ///
    /// The request is registered immediately, not on first poll, so loads
    /// issued back to back always share a batch.
    pub fn load(&self, key: B::K) -> impl Future<Output = LoadResult<B>> + Send + use<B> {
        let reply = (!key.is_blank()).then(|| {
            let (reply, receiver) = oneshot::channel();
            self.open_batch().push(PendingRequest { key, reply });
            receiver
        });

        async move {
            match reply {
                Some(receiver) => receiver.await.unwrap_or(Err(LoadError::Abandoned)),
                None => Ok(None),
            }
        }
    }

    /// Drives `fut`, dispatching the open batch whenever `fut` yields.
    ///
    /// Loads are only ever dispatched from inside `wrap`, so the future that
    /// awaits them has to run under it. Nest calls to drive several loaders.
    pub async fn wrap<O>(&self, fut: impl Future<Output = O>) -> O {
        let mut in_flight: FuturesUnordered<BoxFuture<'static, ()>> = FuturesUnordered::new();

        let mut fut = pin!(fut);
        poll_fn(move |cx| {
            drive(&mut in_flight, cx);

            let res = fut.as_mut().poll(cx);
            if res.is_pending() {
                // `fut` is parked; whatever it requested so far forms the batch.
                let batch = std::mem::take(&mut *self.open_batch());
                if !batch.is_empty() {
                    in_flight.push(self.dispatch(batch));
                    drive(&mut in_flight, cx);
                }
            }
            res
        })
        .await
    }

    fn dispatch(&self, batch: Vec<PendingRequest<B>>) -> BoxFuture<'static, ()> {
        let batch_fn = self.batch_fn.clone();
        Box::pin(async move {
            let keys = distinct_keys(batch.iter().map(|request| &request.key));
            let fetched = batch_fn.load_batch(&keys).await;

            for request in batch {
                let result = match &fetched {
                    Ok(records) => Ok(records.get(&request.key).cloned()),
                    Err(err) => Err(LoadError::Fetch(err.clone())),
                };
                // The caller may have stopped waiting.
                let _ = request.reply.send(result);
            }
        })
    }

    fn open_batch(&self) -> MutexGuard<'_, Vec<PendingRequest<B>>> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Polls every in-flight fetch once; completed ones wake their callers.
fn drive(in_flight: &mut FuturesUnordered<BoxFuture<'static, ()>>, cx: &mut task::Context<'_>) {
    while let Poll::Ready(Some(())) = in_flight.poll_next_unpin(cx) {}
}

/// Deduplicates keys, keeping first-seen order.
fn distinct_keys<'a, K: BatchKey>(keys: impl Iterator<Item = &'a K>) -> Vec<K> {
    let mut seen = HashSet::new();
    keys.filter(|key| seen.insert(*key)).cloned().collect()
}
