//! Response header parsing for cache metadata.
//!
//! Extracts the three pieces of metadata the fetch layer needs from a
//! Trakt response:
//! - `ETag`: validator sent back as `If-None-Match` on revalidation
//! - `Cache-Control: max-age`: freshness lifetime in seconds
//! - `X-Pagination-*`: page bookkeeping for list endpoints
//!
//! Only `max-age` is honoured; every other Cache-Control directive is ignored.
//!
//! # Example
//!
//! ```rust
//! use traktkit::cache::control::parse_max_age;
//!
//! assert_eq!(parse_max_age(Some("max-age=60, no-cache, no-store, must-revalidate")), Some(60));
//! assert_eq!(parse_max_age(Some("no-cache")), None);
//! ```

use http::header::{CACHE_CONTROL, ETAG};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

pub const PAGINATION_ITEM_COUNT: &str = "x-pagination-item-count";
pub const PAGINATION_LIMIT: &str = "x-pagination-limit";
pub const PAGINATION_PAGE: &str = "x-pagination-page";
pub const PAGINATION_PAGE_COUNT: &str = "x-pagination-page-count";

/// Page bookkeeping reported by paginated endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationData {
    pub item_count: u64,
    pub limit: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

/// Cache metadata parsed once per response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponseHeaders {
    pub etag: Option<String>,
    /// Seconds; negative means the response is already stale
    pub max_age: Option<i64>,
    pub pagination: Option<PaginationData>,
}

impl HttpResponseHeaders {
    /// Build from a response header map. Header names are case-insensitive.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let etag = headers
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let cache_control = headers.get(CACHE_CONTROL).and_then(|v| v.to_str().ok());

        Self {
            etag,
            max_age: parse_max_age(cache_control),
            pagination: parse_pagination(headers),
        }
    }
}

/// Parse the `max-age` directive out of a Cache-Control header value.
///
/// Directives are split on commas and trimmed. Only the first directive
/// named `max-age` (case-insensitive) is considered: its value must be a bare
/// integer written directly after `=`, otherwise the result is `None`.
/// Negative values are returned as-is.
///
/// Returns `None` when the header is absent or carries no `max-age`.
pub fn parse_max_age(header_value: Option<&str>) -> Option<i64> {
    const NAME: &str = "max-age";

    let directive = header_value?.split(',').map(str::trim).find(|directive| {
        let name = directive.split_once('=').map_or(*directive, |(name, _)| name);
        name.trim_end().eq_ignore_ascii_case(NAME)
    })?;

    directive.get(NAME.len()..)?.strip_prefix('=')?.parse::<i64>().ok()
}

/// Parse the four `x-pagination-*` headers.
///
/// All four must be present and numeric, otherwise there is no pagination.
pub fn parse_pagination(headers: &HeaderMap) -> Option<PaginationData> {
    let read = |name: &str| -> Option<u64> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    Some(PaginationData {
        item_count: read(PAGINATION_ITEM_COUNT)?,
        limit: read(PAGINATION_LIMIT)?,
        current_page: read(PAGINATION_PAGE)?,
        total_pages: read(PAGINATION_PAGE_COUNT)?,
    })
}
