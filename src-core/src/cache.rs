//! Record cache keyed by document id.
//!
//! Enrichment used to lean on an ad-hoc module-level map; here the cache is an
//! explicit object the caller owns and passes into the service, with explicit
//! invalidation.

use std::time::Duration;

use moka::sync::Cache;

pub struct RecordCache<V: Clone + Send + Sync + 'static> {
    inner: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> RecordCache<V> {
    pub fn new(time_to_live: Duration, max_capacity: u64) -> Self {
        RecordCache {
            inner: Cache::builder()
                .time_to_live(time_to_live)
                .max_capacity(max_capacity)
                .build(),
        }
    }

    pub fn get(&self, id: &str) -> Option<V> {
        self.inner.get(id)
    }

    pub fn insert(&self, id: String, value: V) {
        self.inner.insert(id, value);
    }

    pub fn invalidate(&self, id: &str) {
        self.inner.invalidate(id);
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
