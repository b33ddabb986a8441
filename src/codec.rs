//! JSON wire format shared by requests, responses and cache envelopes.
//!
//! Trakt speaks snake_case JSON, which matches Rust field names directly, and
//! timestamps in ISO-8601 with millisecond precision (`2019-01-30T10:10:12.000Z`).
//! Dates are always written in that exact form so encoding stays byte-stable.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use std::fmt;

use crate::error::TraktError;

/// Classification of a failed decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingErrorKind {
    /// Not valid JSON, or truncated input
    DataCorrupted,
    /// A required field was absent
    KeyNotFound,
    /// A field had the wrong JSON type or an unexpected value
    TypeMismatch,
    /// A required field was present but `null`
    ValueNotFound,
}

impl fmt::Display for DecodingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodingErrorKind::DataCorrupted => "data corrupted",
            DecodingErrorKind::KeyNotFound => "key not found",
            DecodingErrorKind::TypeMismatch => "type mismatch",
            DecodingErrorKind::ValueNotFound => "value not found",
        };
        f.write_str(name)
    }
}

/// Decode failure with its kind and the underlying parser message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingError {
    pub kind: DecodingErrorKind,
    pub message: String,
}

impl DecodingError {
    pub fn new(kind: DecodingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for DecodingError {}

impl From<serde_json::Error> for DecodingError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        let kind = match err.classify() {
            Category::Io | Category::Syntax | Category::Eof => DecodingErrorKind::DataCorrupted,
            Category::Data => classify_data_error(&message),
        };
        DecodingError { kind, message }
    }
}

fn classify_data_error(message: &str) -> DecodingErrorKind {
    if message.starts_with("missing field") {
        DecodingErrorKind::KeyNotFound
    } else if message.starts_with("invalid type: null") {
        DecodingErrorKind::ValueNotFound
    } else if message.starts_with("invalid type") || message.starts_with("invalid value") {
        DecodingErrorKind::TypeMismatch
    } else {
        DecodingErrorKind::DataCorrupted
    }
}

/// Decode a response body into `T`
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, DecodingError> {
    serde_json::from_slice(data).map_err(DecodingError::from)
}

/// Encode a request payload
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, TraktError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| TraktError::Encoding(e.to_string()))
}

/// Serde adapter for `DateTime<Utc>` in Trakt's millisecond ISO-8601 form.
///
/// Use with `#[serde(with = "crate::codec::date")]`, or `date::option` for
/// optional fields.
pub mod date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|d| d.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_str(&super::format(d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
