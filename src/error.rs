// Error types module

use thiserror::Error;

use crate::codec::DecodingError;

/// Error returned by every fallible client operation.
///
/// Network and HTTP failures are never retried; they reach the caller
/// exactly as the transport classified them. The only failures the client
/// absorbs are a 304 answered from a stale cache entry and a failed cache
/// write, neither of which shows up here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TraktError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The response carried no readable body
    #[error("Empty data received")]
    EmptyDataReceived,

    /// The exchange did not produce an HTTP response
    #[error("Response is not an HTTP response")]
    NonHttpResponse,

    /// Status code outside 200..300
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// HTTP 204: the server answered without content
    #[error("Response has no content")]
    EmptyContent,

    /// The body did not match the expected type
    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodingError),

    /// A request payload could not be serialized
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The in-flight request was cancelled by the caller
    #[error("Request cancelled")]
    Cancelled,

    /// Token exchange attempted without a client secret
    #[error("Client secret is missing")]
    ClientSecretMissing,

    /// The OAuth callback URL had no `code` query parameter
    #[error("OAuth callback is missing the code parameter")]
    OAuthCallbackCodeMissing,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TraktError {
    /// HTTP status code for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TraktError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecodingErrorKind;

    #[test]
    fn test_http_error_display_includes_status() {
        let err = TraktError::Http { status: 404 };
        assert_eq!(err.to_string(), "HTTP error: status 404");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(TraktError::EmptyContent.status(), None);
        assert_eq!(TraktError::Cancelled.status(), None);
    }

    #[test]
    fn test_decoding_error_converts_into_trakt_error() {
        let decoding = DecodingError::new(DecodingErrorKind::KeyNotFound, "missing field `title`");
        let err: TraktError = decoding.clone().into();
        assert_eq!(err, TraktError::Decoding(decoding));
        assert!(err.to_string().contains("missing field"));
    }
}
