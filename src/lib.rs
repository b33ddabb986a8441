// TraktKit: typed, caching client for the Trakt API

pub mod cache;
pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod request_coalescing; // Concurrent misses share one request
pub mod transport;

pub use cache::{CacheConfig, CacheStats};
pub use client::{MoviesApi, SyncApi, Trakt, UsersApi};
pub use config::ClientConfig;
pub use error::TraktError;
pub use fetch::Paginated;
pub use transport::{CancelHandle, CancelToken, Transport};
