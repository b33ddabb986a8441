//! Type definitions for disk cache

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheKey;

/// Metadata for a cached entry on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub cache_key: CacheKey,
    /// File name relative to the namespace directory
    pub file_name: String,
    pub size_bytes: u64,
    #[serde(with = "crate::codec::date")]
    pub stored_at: DateTime<Utc>,
    /// Logical access clock; lower means less recently used
    pub last_access: u64,
}

impl EntryMetadata {
    pub fn new(cache_key: CacheKey, file_name: String, size_bytes: u64, last_access: u64) -> Self {
        Self {
            cache_key,
            file_name,
            size_bytes,
            // millisecond precision, as persisted
            stored_at: Utc::now().trunc_subsecs(3),
            last_access,
        }
    }
}
