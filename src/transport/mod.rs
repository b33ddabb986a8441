//! HTTP transport
//!
//! The `Transport` trait is the single seam between the fetch orchestrator
//! and the network. `ReqwestTransport` is the production implementation;
//! tests substitute scripted transports.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::cache::HttpResponseHeaders;
use crate::error::TraktError;

pub mod cancel;
pub mod logging;
pub mod reqwest_transport;
pub mod request;

pub use cancel::{CancelHandle, CancelToken};
pub use reqwest_transport::ReqwestTransport;
pub use request::RequestDescriptor;

/// Per-call inputs that are not part of the endpoint's identity
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// API, auth and conditional headers; descriptor headers override these
    pub headers: BTreeMap<String, String>,
    pub cancel: Option<CancelToken>,
}

impl RequestContext {
    pub fn new(headers: BTreeMap<String, String>) -> Self {
        Self {
            headers,
            cancel: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// A successful (2xx) HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResponse {
    pub status: u16,
    pub headers: HttpResponseHeaders,
    pub body: Bytes,
}

/// Classified transport outcome
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Response body could not be read")]
    EmptyDataReceived,

    #[error("Not an HTTP exchange")]
    NonHttpResponse,

    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<TransportError> for TraktError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => TraktError::Network(msg),
            TransportError::EmptyDataReceived => TraktError::EmptyDataReceived,
            TransportError::NonHttpResponse => TraktError::NonHttpResponse,
            TransportError::Http { status } => TraktError::Http { status },
            TransportError::Cancelled => TraktError::Cancelled,
            TransportError::InvalidUrl(url) => TraktError::InvalidUrl(url),
        }
    }
}

/// Issues a request exactly once and classifies the outcome
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        context: &RequestContext,
    ) -> Result<NetworkResponse, TransportError>;
}
