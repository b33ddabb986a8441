//! `POST /checkin`

use serde::Serialize;

use super::{Endpoint, UrlBuilder};
use crate::cache::CacheKey;
use crate::codec;
use crate::error::TraktError;
use crate::models::TraktIdContainer;
use crate::transport::RequestDescriptor;

/// Check the user into a movie or an episode, by Trakt id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkin {
    Movie(u64),
    Episode(u64),
}

#[derive(Serialize)]
struct CheckinPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    movie: Option<TraktIdContainer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episode: Option<TraktIdContainer>,
}

impl Checkin {
    fn payload(&self) -> CheckinPayload {
        match *self {
            Checkin::Movie(id) => CheckinPayload {
                movie: Some(TraktIdContainer::new(id)),
                episode: None,
            },
            Checkin::Episode(id) => CheckinPayload {
                movie: None,
                episode: Some(TraktIdContainer::new(id)),
            },
        }
    }
}

impl Endpoint for Checkin {
    fn descriptor(&self, base_url: &str) -> Result<RequestDescriptor, TraktError> {
        let url = UrlBuilder::new(base_url)?.segment("checkin").build();
        Ok(RequestDescriptor::post(url, codec::encode(&self.payload())?))
    }

    fn cache_key(&self) -> Option<CacheKey> {
        None
    }

    fn requires_auth(&self) -> bool {
        true
    }
}
