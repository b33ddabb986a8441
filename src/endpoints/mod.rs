//! Endpoint families
//!
//! Each family is an enum with one variant per API operation. A variant
//! knows how to describe its HTTP request, whether and under which key its
//! response may be cached, and whether it needs a logged-in user.

use reqwest::Url;
use std::fmt;

use crate::cache::{CacheKey, CacheLimits};
use crate::error::TraktError;
use crate::transport::RequestDescriptor;

pub mod authentication;
pub mod checkin;
pub mod movies;
pub mod params;
pub mod sync;
pub mod users;

pub use authentication::Authentication;
pub use checkin::Checkin;
pub use movies::Movies;
pub use params::{
    CollectableType, CommentSort, ContentType, InfoLevel, ListSort, ListType, TimePeriod,
    WatchedType,
};
pub use sync::Sync;
pub use users::Users;

/// A single API operation
pub trait Endpoint: Send + std::marker::Sync {
    /// Resolve the request against `base_url`
    fn descriptor(&self, base_url: &str) -> Result<RequestDescriptor, TraktError>;

    /// Cache key of the response; `None` for operations that must not be cached
    fn cache_key(&self) -> Option<CacheKey>;

    /// Ceilings of the namespace the response is cached in
    fn cache_limits(&self) -> CacheLimits {
        CacheLimits::LARGE
    }

    /// Whether the operation needs an access token
    fn requires_auth(&self) -> bool {
        false
    }
}

/// Appends path segments and query pairs to a base URL
pub(crate) struct UrlBuilder {
    url: Url,
}

impl UrlBuilder {
    pub fn new(base_url: &str) -> Result<Self, TraktError> {
        let url =
            Url::parse(base_url).map_err(|e| TraktError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(TraktError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { url })
    }

    /// Append one path segment; empty segments are skipped
    pub fn segment(mut self, segment: impl fmt::Display) -> Self {
        let segment = segment.to_string();
        if !segment.is_empty() {
            if let Ok(mut segments) = self.url.path_segments_mut() {
                segments.pop_if_empty().push(&segment);
            }
        }
        self
    }

    /// Append every `/`-separated segment of `path`
    pub fn path(self, path: &str) -> Self {
        path.split('/').fold(self, |builder, s| builder.segment(s))
    }

    pub fn segment_opt<T: fmt::Display>(self, segment: Option<T>) -> Self {
        match segment {
            Some(s) => self.segment(s),
            None => self,
        }
    }

    pub fn query(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair(name, &value.to_string());
        self
    }

    pub fn query_opt<T: fmt::Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    pub fn pagination(self, page: u32, limit: u32) -> Self {
        self.query("page", page).query("limit", limit)
    }

    pub fn info(self, info: Option<InfoLevel>) -> Self {
        self.query_opt("extended", info)
    }

    pub fn build(self) -> String {
        self.url.into()
    }
}
