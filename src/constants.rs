// Constants module - centralized default values for configuration
//
// Defaults for the client, the HTTP layer and the response cache live here
// so that configuration, endpoint tables and tests agree on them.

// =============================================================================
// API defaults
// =============================================================================

/// Production Trakt API root
pub const DEFAULT_BASE_URL: &str = "https://api.trakt.tv";

/// Value sent in the `trakt-api-version` header
pub const API_VERSION: &str = "2";

/// Header carrying the application's client id
pub const API_KEY_HEADER: &str = "trakt-api-key";

/// Header carrying the API version
pub const API_VERSION_HEADER: &str = "trakt-api-version";

/// Results per page when the caller does not choose
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;

// =============================================================================
// HTTP defaults
// =============================================================================

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent for outgoing requests
pub const DEFAULT_USER_AGENT: &str = concat!("traktkit/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Cache defaults
// =============================================================================

/// One mebibyte, the unit of the disk ceilings below
pub const MB: u64 = 1024 * 1024;

/// Disk ceiling for per-item endpoints (details, comments, collections)
pub const LARGE_NAMESPACE_DISK_BYTES: u64 = 50 * MB;

/// Disk ceiling for chart endpoints (trending, popular, ...)
pub const CHART_NAMESPACE_DISK_BYTES: u64 = 5 * MB;

/// Disk ceiling for single-document endpoints (box office, last activities)
pub const SMALL_NAMESPACE_DISK_BYTES: u64 = MB;

/// Memory item ceiling for per-item endpoints
pub const LARGE_NAMESPACE_MEMORY_ITEMS: u64 = 500;

/// Memory item ceiling for chart endpoints
pub const CHART_NAMESPACE_MEMORY_ITEMS: u64 = 50;

/// Memory item ceiling for single-document endpoints
pub const SMALL_NAMESPACE_MEMORY_ITEMS: u64 = 1;

/// File name of the per-namespace disk index
pub const DISK_INDEX_FILE: &str = "index.json";
