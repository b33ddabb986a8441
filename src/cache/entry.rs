//! Cache key and entry types
//!
//! This module defines the core cache entry structures:
//! - `CacheKey`: namespace plus the semantically significant request parameters
//! - `CacheEntry`: a decoded value with its freshness and pagination metadata

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::control::PaginationData;

/// Marker written for an absent optional component. Percent-encoding never
/// produces `*`, so it cannot collide with a present value.
const ABSENT_COMPONENT: &str = "*";

/// Cache key for identifying cached responses
///
/// The namespace is the endpoint name and selects the storage partition
/// (and its size ceilings). The key joins every parameter that changes the
/// response, each one percent-encoded, separated by `:`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    namespace: String,
    key: String,
}

impl CacheKey {
    /// Start a key in the given namespace with no parameters
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: String::new(),
        }
    }

    /// Append a parameter
    pub fn with(mut self, component: impl fmt::Display) -> Self {
        let encoded = urlencoding::encode(&component.to_string()).into_owned();
        self.push(&encoded);
        self
    }

    /// Append an optional parameter; `None` is distinct from every value
    pub fn with_opt<T: fmt::Display>(mut self, component: Option<T>) -> Self {
        match component {
            Some(value) => self.with(value),
            None => {
                self.push(ABSENT_COMPONENT);
                self
            }
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn push(&mut self, encoded: &str) {
        if !self.key.is_empty() {
            self.key.push(':');
        }
        self.key.push_str(encoded);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.key)
    }
}

/// Cached decoded value plus the metadata of the response it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub etag: Option<String>,
    /// `None` means no TTL was given: revalidate on every access
    #[serde(with = "crate::codec::date::option")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub pagination: Option<PaginationData>,
}

impl<T> CacheEntry<T> {
    /// Create an entry stamped at the current time
    pub fn new(
        value: T,
        max_age: Option<i64>,
        etag: Option<String>,
        pagination: Option<PaginationData>,
    ) -> Self {
        Self::created_at(Utc::now(), value, max_age, etag, pagination)
    }

    /// Create an entry as if fetched at `now`
    pub fn created_at(
        now: DateTime<Utc>,
        value: T,
        max_age: Option<i64>,
        etag: Option<String>,
        pagination: Option<PaginationData>,
    ) -> Self {
        // Envelopes store milliseconds; truncate so a round-trip is lossless
        let now = now.trunc_subsecs(3);
        let expiration_date = max_age.and_then(|secs| {
            Duration::try_seconds(secs).and_then(|ttl| now.checked_add_signed(ttl))
        });

        Self {
            value,
            etag,
            expiration_date,
            pagination,
        }
    }

    /// True while `now` is strictly before the expiration date
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.map_or(false, |expires| now < expires)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}
