//! Cache index management
//!
//! One index per namespace directory, persisted as `index.json` next to the
//! entry files. The index is the source of truth for the namespace's size;
//! `validate_and_repair` reconciles it with what is actually on disk.

use super::backend::DiskBackend;
use super::error::DiskCacheError;
use super::types::EntryMetadata;
use super::utils::entry_path;
use crate::cache::CacheKey;
use bytes::Bytes;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

const INDEX_VERSION: u32 = 1;

/// Thread-safe in-memory index of cached entries
#[derive(Debug, Default)]
pub struct CacheIndex {
    entries: RwLock<HashMap<CacheKey, EntryMetadata>>,
    total_size: AtomicU64,
    clock: AtomicU64,
}

impl CacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<EntryMetadata> {
        self.entries.read().get(key).cloned()
    }

    /// Insert or replace an entry, keeping the total size exact
    pub fn insert(&self, key: CacheKey, metadata: EntryMetadata) {
        let size = metadata.size_bytes;
        let previous = self.entries.write().insert(key, metadata);
        if let Some(previous) = previous {
            self.total_size
                .fetch_sub(previous.size_bytes, Ordering::SeqCst);
        }
        self.total_size.fetch_add(size, Ordering::SeqCst);
    }

    pub fn remove(&self, key: &CacheKey) -> Option<EntryMetadata> {
        let removed = self.entries.write().remove(key);
        if let Some(ref metadata) = removed {
            self.total_size
                .fetch_sub(metadata.size_bytes, Ordering::SeqCst);
        }
        removed
    }

    /// Mark an entry as just used
    pub fn touch(&self, key: &CacheKey) {
        let tick = self.next_tick();
        if let Some(metadata) = self.entries.write().get_mut(key) {
            metadata.last_access = tick;
        }
    }

    /// Advance the access clock and return the new value
    pub fn next_tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn total_size(&self) -> u64 {
        self.total_size.load(Ordering::SeqCst)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        self.total_size.store(0, Ordering::SeqCst);
    }

    /// Find the least recently accessed entry other than `keep`
    pub fn find_lru_entry(&self, keep: &CacheKey) -> Option<(CacheKey, EntryMetadata)> {
        let entries = self.entries.read();
        entries
            .iter()
            .filter(|(k, _)| *k != keep)
            .min_by_key(|(_, meta)| meta.last_access)
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Save index to JSON file
    pub async fn save_to_file<B: DiskBackend + ?Sized>(
        &self,
        path: &Path,
        backend: &B,
    ) -> Result<(), DiskCacheError> {
        let entries: Vec<EntryMetadata> = self.entries.read().values().cloned().collect();
        let snapshot = IndexSnapshot {
            version: INDEX_VERSION,
            entries,
        };

        let json = serde_json::to_vec_pretty(&snapshot)?;
        backend.write_file_atomic(path, Bytes::from(json)).await
    }

    /// Load index from JSON file
    ///
    /// A missing file yields an empty index. So does an unreadable one: the
    /// entry files it described are then orphans and get removed by repair.
    pub async fn load_from_file<B: DiskBackend + ?Sized>(
        path: &Path,
        backend: &B,
    ) -> Result<Self, DiskCacheError> {
        let data = match backend.read_file(path).await {
            Ok(d) => d,
            Err(e) if e.is_not_found() => return Ok(Self::new()),
            Err(e) => return Err(e),
        };

        let snapshot = match serde_json::from_slice::<IndexSnapshot>(&data) {
            Ok(s) if s.version == INDEX_VERSION => s,
            Ok(s) => {
                tracing::warn!(
                    path = %path.display(),
                    version = s.version,
                    "Unknown disk index version, starting with empty index"
                );
                return Ok(Self::new());
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse disk index, starting with empty index"
                );
                return Ok(Self::new());
            }
        };

        let mut entries_map = HashMap::new();
        let mut total_size: u64 = 0;
        let mut clock: u64 = 0;

        for metadata in snapshot.entries {
            total_size += metadata.size_bytes;
            clock = clock.max(metadata.last_access);
            if let Some(previous) = entries_map.insert(metadata.cache_key.clone(), metadata) {
                total_size -= previous.size_bytes;
            }
        }

        Ok(Self {
            entries: RwLock::new(entries_map),
            total_size: AtomicU64::new(total_size),
            clock: AtomicU64::new(clock),
        })
    }

    /// Reconcile the index with the namespace directory
    ///
    /// - entries whose file is gone are dropped
    /// - sizes are re-read from the files
    /// - files the index does not know about (including leftover temp
    ///   files) are deleted
    pub async fn validate_and_repair<B: DiskBackend + ?Sized>(
        &self,
        namespace_dir: &Path,
        index_file_name: &str,
        backend: &B,
    ) -> Result<(), DiskCacheError> {
        let files = match backend.read_dir(namespace_dir).await {
            Ok(f) => f,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        };

        let on_disk: HashSet<String> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect();

        let snapshot: Vec<EntryMetadata> = self.entries.read().values().cloned().collect();
        let known: HashSet<&str> = snapshot.iter().map(|m| m.file_name.as_str()).collect();

        for name in &on_disk {
            if name != index_file_name && !known.contains(name.as_str()) {
                backend
                    .delete_file(&entry_path(namespace_dir, name))
                    .await?;
            }
        }

        let mut repaired = HashMap::new();
        let mut new_total_size = 0u64;

        for mut metadata in snapshot {
            if !on_disk.contains(&metadata.file_name) {
                continue;
            }
            match backend
                .file_size(&entry_path(namespace_dir, &metadata.file_name))
                .await
            {
                Ok(actual_size) => {
                    metadata.size_bytes = actual_size;
                    new_total_size += actual_size;
                    repaired.insert(metadata.cache_key.clone(), metadata);
                }
                Err(_) => continue,
            }
        }

        let dropped = self.entry_count().saturating_sub(repaired.len());
        if dropped > 0 {
            tracing::debug!(
                dir = %namespace_dir.display(),
                dropped,
                "Dropped disk index entries without a backing file"
            );
        }

        *self.entries.write() = repaired;
        self.total_size.store(new_total_size, Ordering::SeqCst);

        Ok(())
    }
}

/// Serializable snapshot of the cache index
#[derive(Serialize, Deserialize)]
struct IndexSnapshot {
    version: u32,
    entries: Vec<EntryMetadata>,
}
