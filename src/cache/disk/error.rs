//! Error types for disk cache operations

use crate::cache::CacheError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiskCacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage full: entry of {size} bytes exceeds the {limit} byte ceiling")]
    StorageFull { size: u64, limit: u64 },

    #[error("Index corrupted: {0}")]
    IndexCorrupted(String),
}

impl DiskCacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiskCacheError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<DiskCacheError> for CacheError {
    fn from(err: DiskCacheError) -> Self {
        match err {
            DiskCacheError::Io(e) => CacheError::Io(e),
            DiskCacheError::Serialization(e) => CacheError::Serialization(e),
            DiskCacheError::StorageFull { .. } => CacheError::StorageFull,
            DiskCacheError::IndexCorrupted(msg) => CacheError::IndexCorrupted(msg),
        }
    }
}
