//! Fetch orchestration
//!
//! One logical fetch walks this state machine:
//!
//! ```text
//! lookup -> fresh hit ------------------------------------------> deliver
//!        -> stale / miss -> network -> 2xx -> decode -> write ---> deliver
//!                                   -> 304 + stale entry --------> deliver stale
//!                                   -> 204 ----------------------> EmptyContent
//!                                   -> anything else ------------> error
//! ```
//!
//! Only two failures are absorbed: a 304 answered from a stale entry and a
//! failed cache write.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheKey, CacheLimits, CacheStore, PaginationData};
use crate::codec;
use crate::endpoints::Endpoint;
use crate::error::TraktError;
use crate::request_coalescing::{CoalescingSlot, LeaderGuard, RequestCoalescer};
use crate::transport::{NetworkResponse, RequestContext, RequestDescriptor, Transport, TransportError};

pub const IF_NONE_MATCH: &str = "If-None-Match";

const HTTP_NO_CONTENT: u16 = 204;
const HTTP_NOT_MODIFIED: u16 = 304;

/// A decoded value plus the pagination headers of the response it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub value: T,
    pub pagination: Option<PaginationData>,
}

impl<T> From<CacheEntry<T>> for Paginated<T> {
    fn from(entry: CacheEntry<T>) -> Self {
        Self {
            value: entry.value,
            pagination: entry.pagination,
        }
    }
}

/// Runs endpoints through the cache and the transport
pub struct Fetcher {
    base_url: String,
    transport: Arc<dyn Transport>,
    cache: Arc<CacheStore>,
    coalescer: Option<RequestCoalescer>,
}

impl Fetcher {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        cache: Arc<CacheStore>,
        coalesce_requests: bool,
    ) -> Self {
        // Followers can only reuse a leader's answer through the cache
        let coalescer = (coalesce_requests && cache.is_enabled()).then(RequestCoalescer::new);
        Self {
            base_url: base_url.into(),
            transport,
            cache,
            coalescer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Fetch and decode `endpoint`, serving from cache when fresh
    pub async fn fetch<T, E>(
        &self,
        endpoint: &E,
        context: RequestContext,
    ) -> Result<Paginated<T>, TraktError>
    where
        T: Serialize + DeserializeOwned + Send,
        E: Endpoint + ?Sized,
    {
        let descriptor = endpoint.descriptor(&self.base_url)?;

        let Some(key) = endpoint.cache_key() else {
            let response = self.send(&descriptor, &context).await?;
            return decode_response(&response).map(|value| Paginated {
                value,
                pagination: response.headers.pagination,
            });
        };
        let limits = endpoint.cache_limits();

        let cached = match self.cache.get::<T>(&key, limits).await {
            Some(entry) if entry.is_fresh() => {
                debug!(key = %key, "Cache hit");
                return Ok(entry.into());
            }
            other => other,
        };

        // Held until this function returns so followers wait for the cache write
        let mut leader: Option<LeaderGuard> = None;
        let cached = match &self.coalescer {
            Some(coalescer) => match coalescer.acquire(&key, context.cancel.as_ref()).await {
                CoalescingSlot::Leader(guard) => {
                    leader = Some(guard);
                    cached
                }
                CoalescingSlot::Follower { leader_stored } => {
                    match self.cache.get::<T>(&key, limits).await {
                        Some(entry) if leader_stored || entry.is_fresh() => {
                            debug!(key = %key, "Serving coalesced fetch from cache");
                            return Ok(entry.into());
                        }
                        reread => reread.or(cached),
                    }
                }
                CoalescingSlot::Cancelled => return Err(TraktError::Cancelled),
            },
            None => cached,
        };

        debug!(key = %key, stale = cached.is_some(), "Cache miss");
        self.revalidate(&key, limits, &descriptor, context, cached, leader.as_mut())
            .await
    }

    async fn revalidate<T>(
        &self,
        key: &CacheKey,
        limits: CacheLimits,
        descriptor: &RequestDescriptor,
        mut context: RequestContext,
        cached: Option<CacheEntry<T>>,
        leader: Option<&mut LeaderGuard>,
    ) -> Result<Paginated<T>, TraktError>
    where
        T: Serialize + DeserializeOwned + Send,
    {
        if let Some(etag) = cached.as_ref().and_then(|entry| entry.etag.as_deref()) {
            context.headers.insert(IF_NONE_MATCH.to_string(), etag.to_string());
        }

        let response = match self.transport.execute(descriptor, &context).await {
            Ok(response) => response,
            Err(TransportError::Http {
                status: HTTP_NOT_MODIFIED,
            }) => {
                return match cached {
                    Some(entry) => {
                        debug!(key = %key, "Not modified, serving cached entry");
                        if let Some(guard) = leader {
                            guard.mark_stored();
                        }
                        Ok(entry.into())
                    }
                    None => Err(TraktError::Http {
                        status: HTTP_NOT_MODIFIED,
                    }),
                };
            }
            Err(e) => return Err(e.into()),
        };

        let value = decode_response::<T>(&response)?;
        let headers = response.headers;
        let entry = CacheEntry::new(value, headers.max_age, headers.etag, headers.pagination);

        match self.cache.put(key, &entry, limits).await {
            Ok(()) => {
                if let Some(guard) = leader {
                    guard.mark_stored();
                }
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to write response to cache"),
        }

        Ok(entry.into())
    }

    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        context: &RequestContext,
    ) -> Result<NetworkResponse, TraktError> {
        self.transport
            .execute(descriptor, context)
            .await
            .map_err(TraktError::from)
    }
}

/// Decode a 2xx body; 204 never reaches the decoder
pub fn decode_response<T: DeserializeOwned>(response: &NetworkResponse) -> Result<T, TraktError> {
    if response.status == HTTP_NO_CONTENT {
        return Err(TraktError::EmptyContent);
    }
    Ok(codec::decode(&response.body)?)
}
