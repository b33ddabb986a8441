//! Response cache
//!
//! Decoded responses are stored as JSON envelopes (`CacheEntry<T>`) keyed
//! by `CacheKey`. Each namespace has a bounded memory tier and, when a root
//! directory is configured, a bounded disk tier.

pub mod config;
pub mod control;
pub mod disk;
pub mod entry;
pub mod error;
pub mod memory;
pub mod stats;
pub mod store;

pub use config::{CacheConfig, CacheLimits};
pub use control::{parse_max_age, parse_pagination, HttpResponseHeaders, PaginationData};
pub use entry::{CacheEntry, CacheKey};
pub use error::CacheError;
pub use stats::CacheStats;
pub use store::CacheStore;
