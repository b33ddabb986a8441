//! Disk tier of the response cache
//!
//! Each namespace owns a directory under the cache root holding one JSON
//! envelope per entry (named by the SHA-256 of the key) and an `index.json`
//! that tracks sizes and access order for LRU eviction.

pub use self::backend::DiskBackend;
pub use self::disk_cache::DiskCache;
pub use self::error::DiskCacheError;
pub use self::tokio_backend::TokioFsBackend;

pub mod backend;
mod disk_cache;
mod error;
mod index;
pub mod tokio_backend;
mod types;
mod utils;

#[cfg(test)]
pub(crate) mod mock_backend;
