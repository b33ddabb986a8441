//! Production transport backed by reqwest

use async_trait::async_trait;
use std::time::{Duration, Instant};

use super::logging::RequestLogger;
use super::{NetworkResponse, RequestContext, RequestDescriptor, Transport, TransportError};
use crate::cache::HttpResponseHeaders;
use crate::config::HttpConfig;
use crate::error::TraktError;

pub struct ReqwestTransport {
    client: reqwest::Client,
    logger: RequestLogger,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TraktError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TraktError::Network(e.to_string()))?;

        Ok(Self::with_client(client, RequestLogger::new(config)))
    }

    pub fn with_client(client: reqwest::Client, logger: RequestLogger) -> Self {
        Self { client, logger }
    }

    async fn send(
        &self,
        url: reqwest::Url,
        request: &RequestDescriptor,
        context: &RequestContext,
    ) -> Result<NetworkResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let mut builder = self.client.request(method, url);
        for (name, value) in request.merged_headers(&context.headers) {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(TransportError::Http { status });
        }

        let headers = HttpResponseHeaders::from_header_map(&convert_headers(response.headers()));
        let body = response
            .bytes()
            .await
            .map_err(|_| TransportError::EmptyDataReceived)?;

        Ok(NetworkResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        context: &RequestContext,
    ) -> Result<NetworkResponse, TransportError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", request.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::NonHttpResponse);
        }

        let correlation_id = uuid::Uuid::new_v4().to_string();
        let method = request.method.as_str();
        self.logger.log_request(
            method,
            &request.url,
            &request.merged_headers(&context.headers),
            &correlation_id,
        );

        let start = Instant::now();
        let exchange = self.send(url, request, context);
        let result = match &context.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(TransportError::Cancelled),
                    result = exchange => result,
                }
            }
            None => exchange.await,
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => self.logger.log_response(
                method,
                &request.url,
                response.status,
                Some(&response.body),
                latency_ms,
                &correlation_id,
            ),
            Err(TransportError::Http { status }) => self.logger.log_response(
                method,
                &request.url,
                *status,
                None,
                latency_ms,
                &correlation_id,
            ),
            Err(e) => self
                .logger
                .log_failure(method, &request.url, e, latency_ms, &correlation_id),
        }

        result
    }
}

/// reqwest and the `http` crate used by the cache parser carry different
/// major versions of the header types
fn convert_headers(headers: &reqwest::header::HeaderMap) -> http::HeaderMap {
    let mut converted = http::HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if let (Ok(name), Ok(value)) = (
            http::HeaderName::from_bytes(name.as_str().as_bytes()),
            http::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            converted.append(name, value);
        }
    }
    converted
}
