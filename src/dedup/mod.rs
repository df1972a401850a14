use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::debug;
use std::future::Future;
use std::sync::Arc;

use crate::errors::CatalogError;

type InFlight<T> = Shared<BoxFuture<'static, Result<T, CatalogError>>>;

/// Collapses concurrent requests for the same key into one execution.
///
/// The shared execution is spawned onto the runtime, so it settles (and its
/// entry is removed) even if every caller stops waiting.
pub struct Deduplicator<T> {
    pending: Arc<DashMap<String, InFlight<T>>>,
}

impl<T> Deduplicator<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Join the in-flight call for `key`, or start one with `fetch`
    pub async fn run<F, Fut>(&self, key: &str, fetch: F) -> Result<T, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        let in_flight = match self.pending.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                debug!("Joining in-flight request: {}", key);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let shared = self.settle_then_remove(key.to_string(), fetch());
                entry.insert(shared.clone());
                tokio::spawn(shared.clone());
                shared
            }
        };

        in_flight.await
    }

    /// Number of keys currently in flight
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    fn settle_then_remove<Fut>(&self, key: String, fetch: Fut) -> InFlight<T>
    where
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        let pending = Arc::clone(&self.pending);
        async move {
            let result = fetch.await;
            pending.remove(&key);
            result
        }
        .boxed()
        .shared()
    }
}

impl<T> Default for Deduplicator<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
