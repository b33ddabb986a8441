// Shared fixtures: a scripted transport that replays canned responses and
// records every request it was asked to send

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use traktkit::cache::{CacheConfig, CacheStore, HttpResponseHeaders, PaginationData};
use traktkit::transport::{
    NetworkResponse, RequestContext, RequestDescriptor, Transport, TransportError,
};
use traktkit::{ClientConfig, Trakt};

pub type Scripted = Result<NetworkResponse, TransportError>;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub descriptor: RequestDescriptor,
    pub context: RequestContext,
}

impl RecordedRequest {
    /// Header as sent on the wire, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<String> {
        self.descriptor
            .merged_headers(&self.context.headers)
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        })
    }

    pub fn with_delay(script: Vec<Scripted>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn push(&self, response: Scripted) {
        self.script.lock().push_back(response);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        context: &RequestContext,
    ) -> Result<NetworkResponse, TransportError> {
        self.requests.lock().push(RecordedRequest {
            descriptor: request.clone(),
            context: context.clone(),
        });
        if let Some(delay) = self.delay {
            match &context.cancel {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => return Err(TransportError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                None => tokio::time::sleep(delay).await,
            }
        }
        self.script
            .lock()
            .pop_front()
            .unwrap_or(Err(TransportError::Network("script exhausted".to_string())))
    }
}

pub fn ok(body: &str) -> Scripted {
    respond(200, body, HttpResponseHeaders::default())
}

pub fn ok_with(body: &str, max_age: Option<i64>, etag: Option<&str>) -> Scripted {
    respond(
        200,
        body,
        HttpResponseHeaders {
            etag: etag.map(str::to_string),
            max_age,
            pagination: None,
        },
    )
}

pub fn ok_paginated(body: &str, max_age: i64, pagination: PaginationData) -> Scripted {
    respond(
        200,
        body,
        HttpResponseHeaders {
            etag: None,
            max_age: Some(max_age),
            pagination: Some(pagination),
        },
    )
}

pub fn respond(status: u16, body: &str, headers: HttpResponseHeaders) -> Scripted {
    Ok(NetworkResponse {
        status,
        headers,
        body: Bytes::from(body.to_string()),
    })
}

pub fn no_content() -> Scripted {
    respond(204, "", HttpResponseHeaders::default())
}

pub fn status(status: u16) -> Scripted {
    Err(TransportError::Http { status })
}

pub fn config() -> ClientConfig {
    ClientConfig::new("test-client")
}

/// Client with a memory-only cache in front of `transport`
pub fn client(transport: Arc<ScriptedTransport>) -> Trakt {
    Trakt::with_transport(config(), transport)
}

pub fn client_with_cache(transport: Arc<ScriptedTransport>, cache: CacheConfig) -> Trakt {
    let cache = Arc::new(CacheStore::new(cache));
    Trakt::with_parts(config(), transport, cache)
}

pub const TRON_JSON: &str = r#"{"title":"TRON: Legacy","year":2010,"ids":{"trakt":1,"slug":"tron-legacy-2010","imdb":"tt1104001","tmdb":20526}}"#;

pub fn trending_json() -> String {
    format!(r#"[{{"watchers":21,"movie":{}}}]"#, TRON_JSON)
}
