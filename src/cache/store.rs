//! Two-tier response cache partitioned by namespace
//!
//! Lookups go memory first, then disk; a disk hit is promoted to memory.
//! Writes go memory first, then disk. Each namespace is created lazily the
//! first time it is touched, with the ceilings of the endpoint that touched
//! it unless configuration overrides them.

use bytes::Bytes;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::config::{CacheConfig, CacheLimits};
use super::disk::{DiskBackend, DiskCache, TokioFsBackend};
use super::entry::{CacheEntry, CacheKey};
use super::error::CacheError;
use super::memory::MemoryCache;
use super::stats::{CacheStats, CacheStatsTracker};

struct Namespace {
    memory: Option<MemoryCache>,
    disk: Option<DiskCache>,
}

/// Response cache shared by every fetch of a client
pub struct CacheStore {
    config: CacheConfig,
    backend: Arc<dyn DiskBackend>,
    namespaces: RwLock<HashMap<String, Arc<Namespace>>>,
    stats: CacheStatsTracker,
}

impl CacheStore {
    /// Create a store using the real filesystem for the disk tier
    pub fn new(config: CacheConfig) -> Self {
        Self::with_backend(config, Arc::new(TokioFsBackend::new()))
    }

    pub fn with_backend(config: CacheConfig, backend: Arc<dyn DiskBackend>) -> Self {
        Self {
            config,
            backend,
            namespaces: RwLock::new(HashMap::new()),
            stats: CacheStatsTracker::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn namespace(&self, name: &str, default_limits: CacheLimits) -> Arc<Namespace> {
        if let Some(ns) = self.namespaces.read().get(name) {
            return ns.clone();
        }

        let mut namespaces = self.namespaces.write();
        namespaces
            .entry(name.to_string())
            .or_insert_with(|| {
                let limits = self.config.limits_for(name, default_limits);
                tracing::debug!(
                    namespace = name,
                    disk_max_bytes = limits.disk_max_bytes,
                    memory_max_items = limits.memory_max_items,
                    "Opening cache namespace"
                );
                Arc::new(Namespace {
                    memory: self
                        .config
                        .memory_enabled
                        .then(|| MemoryCache::new(limits.memory_max_items)),
                    disk: self.config.disk_root().map(|root| {
                        DiskCache::new(root.join(name), limits.disk_max_bytes, self.backend.clone())
                    }),
                })
            })
            .clone()
    }

    /// Look up `key`, returning `None` on a miss or an unreadable envelope
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
        limits: CacheLimits,
    ) -> Option<CacheEntry<T>> {
        if !self.is_enabled() {
            return None;
        }
        let ns = self.namespace(key.namespace(), limits);

        if let Some(memory) = &ns.memory {
            if let Some(envelope) = memory.get(key).await {
                if let Some(entry) = decode_envelope(key, &envelope) {
                    self.stats.record_memory_hit();
                    return Some(entry);
                }
            }
        }

        if let Some(disk) = &ns.disk {
            match disk.get(key).await {
                Ok(Some(envelope)) => {
                    if let Some(entry) = decode_envelope(key, &envelope) {
                        if let Some(memory) = &ns.memory {
                            memory.insert(key.clone(), envelope).await;
                        }
                        self.stats.record_disk_hit();
                        return Some(entry);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Disk cache read failed");
                }
            }
        }

        self.stats.record_miss();
        None
    }

    /// Store `entry` under `key` in every active tier
    ///
    /// The memory tier is written before the disk tier, so a disk failure
    /// still leaves the entry readable from memory.
    pub async fn put<T: Serialize>(
        &self,
        key: &CacheKey,
        entry: &CacheEntry<T>,
        limits: CacheLimits,
    ) -> Result<(), CacheError> {
        if !self.is_enabled() {
            return Ok(());
        }
        let envelope = Bytes::from(serde_json::to_vec(entry)?);
        let ns = self.namespace(key.namespace(), limits);

        if let Some(memory) = &ns.memory {
            memory.insert(key.clone(), envelope.clone()).await;
        }

        if let Some(disk) = &ns.disk {
            match disk.put(key, envelope).await {
                Ok(evicted) => self.stats.record_evictions(evicted),
                Err(e) => {
                    self.stats.record_write_failure();
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Empty every namespace in both tiers
    ///
    /// Namespace directories left behind by earlier processes are removed
    /// too, even if this process never opened them.
    pub async fn clear(&self) -> Result<(), CacheError> {
        let namespaces: Vec<Arc<Namespace>> = self.namespaces.read().values().cloned().collect();

        for ns in &namespaces {
            if let Some(memory) = &ns.memory {
                memory.clear().await;
            }
            if let Some(disk) = &ns.disk {
                disk.clear().await?;
            }
        }

        if let Some(root) = self.config.root_dir.as_deref() {
            let children = match self.backend.read_dir(root).await {
                Ok(children) => children,
                Err(e) if e.is_not_found() => Vec::new(),
                Err(e) => return Err(e.into()),
            };
            for child in children {
                // Open namespaces were emptied above under their own write lock
                let open = child
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map_or(false, |name| self.namespaces.read().contains_key(name));
                if open {
                    continue;
                }
                if self.backend.is_dir(&child).await {
                    self.backend.remove_dir_all(&child).await?;
                } else {
                    self.backend.delete_file(&child).await?;
                }
            }
        }

        tracing::info!(namespaces = namespaces.len(), "Cleared response cache");
        Ok(())
    }

    /// Bytes used under the cache root; 0 when it cannot be enumerated
    pub async fn total_disk_size(&self) -> u64 {
        match self.config.root_dir.as_deref() {
            Some(root) => self.directory_size(root).await,
            None => 0,
        }
    }

    async fn directory_size(&self, root: &Path) -> u64 {
        let Ok(children) = self.backend.read_dir(root).await else {
            return 0;
        };

        let mut total = 0;
        for child in children {
            if self.backend.is_dir(&child).await {
                let Ok(files) = self.backend.read_dir(&child).await else {
                    continue;
                };
                for file in files {
                    total += self.backend.file_size(&file).await.unwrap_or(0);
                }
            } else {
                total += self.backend.file_size(&child).await.unwrap_or(0);
            }
        }
        total
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.snapshot();
        stats.memory_evictions = self
            .namespaces
            .read()
            .values()
            .filter_map(|ns| ns.memory.as_ref())
            .map(MemoryCache::evictions)
            .sum();
        stats
    }
}

fn decode_envelope<T: DeserializeOwned>(key: &CacheKey, envelope: &[u8]) -> Option<CacheEntry<T>> {
    match serde_json::from_slice(envelope) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::debug!(key = %key, error = %e, "Ignoring undecodable cache envelope");
            None
        }
    }
}
