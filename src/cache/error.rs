//! Cache error types
//!
//! Cache failures never fail a fetch: the orchestrator logs them and hands
//! the caller the freshly decoded value anyway.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// The entry is larger than its namespace's disk ceiling
    #[error("Cache storage is full")]
    StorageFull,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Disk index corrupted: {0}")]
    IndexCorrupted(String),
}
