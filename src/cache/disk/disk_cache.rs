//! Disk tier for a single namespace

use super::backend::DiskBackend;
use super::error::DiskCacheError;
use super::index::CacheIndex;
use super::types::EntryMetadata;
use super::utils::{entry_file_name, entry_path};
use crate::cache::CacheKey;
use crate::constants::DISK_INDEX_FILE;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Persistent, size-bounded store for one namespace directory
///
/// The index is loaded (and repaired) on first use. Writes, evictions and
/// clears are serialized; reads only take the index lock briefly.
pub struct DiskCache {
    dir: PathBuf,
    max_bytes: u64,
    backend: Arc<dyn DiskBackend>,
    index: OnceCell<CacheIndex>,
    write_lock: Mutex<()>,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: u64, backend: Arc<dyn DiskBackend>) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
            backend,
            index: OnceCell::new(),
            write_lock: Mutex::new(()),
        }
    }

    async fn index(&self) -> Result<&CacheIndex, DiskCacheError> {
        self.index
            .get_or_try_init(|| async {
                let index =
                    CacheIndex::load_from_file(&self.index_path(), self.backend.as_ref()).await?;
                index
                    .validate_and_repair(&self.dir, DISK_INDEX_FILE, self.backend.as_ref())
                    .await?;
                tracing::debug!(
                    dir = %self.dir.display(),
                    entries = index.entry_count(),
                    size_bytes = index.total_size(),
                    "Loaded disk cache index"
                );
                Ok(index)
            })
            .await
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(DISK_INDEX_FILE)
    }

    /// Read the stored envelope for `key`
    pub async fn get(&self, key: &CacheKey) -> Result<Option<Bytes>, DiskCacheError> {
        let index = self.index().await?;
        let Some(metadata) = index.get(key) else {
            return Ok(None);
        };

        match self
            .backend
            .read_file(&entry_path(&self.dir, &metadata.file_name))
            .await
        {
            Ok(data) => {
                index.touch(key);
                Ok(Some(data))
            }
            Err(e) if e.is_not_found() => {
                // A put may have replaced the file since the index was read
                let _guard = self.write_lock.lock().await;
                if index.get(key).as_ref() == Some(&metadata) {
                    index.remove(key);
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Store an envelope, then evict least recently used entries until the
    /// namespace fits its ceiling again. Returns the number of evictions.
    pub async fn put(&self, key: &CacheKey, data: Bytes) -> Result<u64, DiskCacheError> {
        let size = data.len() as u64;
        if size > self.max_bytes {
            return Err(DiskCacheError::StorageFull {
                size,
                limit: self.max_bytes,
            });
        }

        let _guard = self.write_lock.lock().await;
        let index = self.index().await?;

        let file_name = entry_file_name(key);
        self.backend
            .write_file_atomic(&entry_path(&self.dir, &file_name), data)
            .await?;
        index.insert(
            key.clone(),
            EntryMetadata::new(key.clone(), file_name, size, index.next_tick()),
        );

        let evicted = self.evict_to_fit(index, key).await?;
        index
            .save_to_file(&self.index_path(), self.backend.as_ref())
            .await?;

        Ok(evicted)
    }

    async fn evict_to_fit(&self, index: &CacheIndex, keep: &CacheKey) -> Result<u64, DiskCacheError> {
        let mut evicted = 0;
        while index.total_size() > self.max_bytes {
            let Some((victim, metadata)) = index.find_lru_entry(keep) else {
                break;
            };
            self.backend
                .delete_file(&entry_path(&self.dir, &metadata.file_name))
                .await?;
            index.remove(&victim);
            evicted += 1;
            tracing::debug!(key = %victim, size_bytes = metadata.size_bytes, "Evicted disk cache entry");
        }
        Ok(evicted)
    }

    /// Remove the namespace directory and forget every entry
    pub async fn clear(&self) -> Result<(), DiskCacheError> {
        let _guard = self.write_lock.lock().await;
        self.backend.remove_dir_all(&self.dir).await?;
        if let Some(index) = self.index.get() {
            index.clear();
        }
        Ok(())
    }

    /// Bytes currently accounted to this namespace
    pub async fn size_bytes(&self) -> Result<u64, DiskCacheError> {
        Ok(self.index().await?.total_size())
    }
}
