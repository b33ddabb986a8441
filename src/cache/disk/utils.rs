//! Utility functions for disk cache

use crate::cache::CacheKey;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Extension of entry files
pub const ENTRY_EXTENSION: &str = "json";

/// SHA-256 of the key's full `namespace/key` form, hex encoded
pub fn key_to_hash(key: &CacheKey) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// File name an entry is stored under
pub fn entry_file_name(key: &CacheKey) -> String {
    format!("{}.{}", key_to_hash(key), ENTRY_EXTENSION)
}

pub fn entry_path(namespace_dir: &Path, file_name: &str) -> PathBuf {
    namespace_dir.join(file_name)
}
