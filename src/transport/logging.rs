//! Request/response logging with header redaction

use std::collections::{BTreeMap, HashSet};

use crate::config::HttpConfig;

const REDACTED: &str = "[REDACTED]";

/// Emits one start and one completion event per request
#[derive(Debug, Clone)]
pub struct RequestLogger {
    redact_headers_lower: HashSet<String>,
    log_response_body: bool,
    max_body_size: usize,
}

impl RequestLogger {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            redact_headers_lower: config
                .redact_headers
                .iter()
                .map(|h| h.to_lowercase())
                .collect(),
            log_response_body: config.log_response_body,
            max_body_size: config.max_logged_body_bytes,
        }
    }

    pub fn should_redact_header(&self, header_name: &str) -> bool {
        self.redact_headers_lower
            .contains(&header_name.to_lowercase())
    }

    /// Header list suitable for logging
    pub fn redacted_headers(&self, headers: &BTreeMap<String, String>) -> Vec<String> {
        headers
            .iter()
            .map(|(name, value)| {
                if self.should_redact_header(name) {
                    format!("{}: {}", name, REDACTED)
                } else {
                    format!("{}: {}", name, value)
                }
            })
            .collect()
    }

    /// Truncate body to max size
    pub fn truncate_body(&self, body: &[u8]) -> String {
        if body.len() <= self.max_body_size {
            String::from_utf8_lossy(body).to_string()
        } else {
            let truncated = String::from_utf8_lossy(&body[..self.max_body_size]);
            format!("{}... [truncated, {} bytes total]", truncated, body.len())
        }
    }

    pub fn log_request(
        &self,
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        correlation_id: &str,
    ) {
        tracing::debug!(
            correlation_id = %correlation_id,
            method = %method,
            url = %url,
            headers = ?self.redacted_headers(headers),
            "Sending request"
        );
    }

    pub fn log_response(
        &self,
        method: &str,
        url: &str,
        status: u16,
        body: Option<&[u8]>,
        latency_ms: u64,
        correlation_id: &str,
    ) {
        let body_str = if self.log_response_body {
            body.map(|b| self.truncate_body(b))
        } else {
            None
        };

        tracing::info!(
            correlation_id = %correlation_id,
            method = %method,
            url = %url,
            status = status,
            latency_ms = latency_ms,
            body = ?body_str,
            "Request completed"
        );
    }

    pub fn log_failure(
        &self,
        method: &str,
        url: &str,
        error: &dyn std::fmt::Display,
        latency_ms: u64,
        correlation_id: &str,
    ) {
        tracing::warn!(
            correlation_id = %correlation_id,
            method = %method,
            url = %url,
            latency_ms = latency_ms,
            error = %error,
            "Request failed"
        );
    }
}
