//! Mock disk backend for testing (in-memory HashMap storage)

use super::backend::DiskBackend;
use super::error::DiskCacheError;
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Mock backend that stores files in memory
#[derive(Clone, Default)]
pub struct MockDiskBackend {
    files: Arc<RwLock<HashMap<PathBuf, Bytes>>>,
    directories: Arc<RwLock<HashSet<PathBuf>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockDiskBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write or delete fail with a permission error
    pub fn set_fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn check_writable(&self) -> Result<(), DiskCacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DiskCacheError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Simulated permission denied",
            )));
        }
        Ok(())
    }

    fn not_found() -> DiskCacheError {
        DiskCacheError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ))
    }
}

#[async_trait]
impl DiskBackend for MockDiskBackend {
    async fn read_file(&self, path: &Path) -> Result<Bytes, DiskCacheError> {
        self.files.read().get(path).cloned().ok_or_else(Self::not_found)
    }

    async fn write_file_atomic(&self, path: &Path, data: Bytes) -> Result<(), DiskCacheError> {
        self.check_writable()?;
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).await?;
        }
        self.files.write().insert(path.to_path_buf(), data);
        Ok(())
    }

    async fn delete_file(&self, path: &Path) -> Result<(), DiskCacheError> {
        self.check_writable()?;
        self.files.write().remove(path);
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), DiskCacheError> {
        self.check_writable()?;
        let mut dirs = self.directories.write();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<(), DiskCacheError> {
        self.check_writable()?;
        self.files.write().retain(|p, _| !p.starts_with(path));
        self.directories.write().retain(|p| !p.starts_with(path));
        Ok(())
    }

    async fn file_size(&self, path: &Path) -> Result<u64, DiskCacheError> {
        self.files
            .read()
            .get(path)
            .map(|data| data.len() as u64)
            .ok_or_else(Self::not_found)
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, DiskCacheError> {
        if !self.directories.read().contains(path) {
            return Err(Self::not_found());
        }

        let mut entries: Vec<PathBuf> = self
            .files
            .read()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.extend(
            self.directories
                .read()
                .iter()
                .filter(|p| p.parent() == Some(path))
                .cloned(),
        );
        Ok(entries)
    }

    async fn is_dir(&self, path: &Path) -> bool {
        self.directories.read().contains(path)
    }
}
