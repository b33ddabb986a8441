//! Memory tier of the response cache
//!
//! One `MemoryCache` per namespace, backed by moka and bounded by item count.
//! Values are the serialized cache envelopes, so the tier is independent of
//! the decoded type.

use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::entry::CacheKey;

/// Bounded in-memory store for one namespace
pub struct MemoryCache {
    cache: moka::future::Cache<CacheKey, Bytes>,
    evictions: Arc<AtomicU64>,
}

impl MemoryCache {
    /// Create a memory tier holding at most `max_items` entries
    pub fn new(max_items: u64) -> Self {
        let evictions = Arc::new(AtomicU64::new(0));
        let evictions_clone = evictions.clone();

        let cache = moka::future::Cache::builder()
            .max_capacity(max_items)
            .eviction_listener(move |_key, _value, cause| {
                // Explicit invalidation is not an eviction
                if cause == moka::notification::RemovalCause::Size {
                    evictions_clone.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();

        Self { cache, evictions }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<Bytes> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: CacheKey, envelope: Bytes) {
        self.cache.insert(key, envelope).await;
    }

    /// Drop every entry and wait for moka to finish the invalidation
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Process pending evictions so counts are exact
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Current entry count (approximate until pending tasks run)
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Entries dropped because the item ceiling was reached
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }
}
