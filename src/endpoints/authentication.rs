//! OAuth endpoints

use super::{Endpoint, UrlBuilder};
use crate::cache::CacheKey;
use crate::codec;
use crate::error::TraktError;
use crate::models::TokenRequest;
use crate::transport::RequestDescriptor;

pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// Page the user logs in on; only its URL is ever used
    Authorize {
        client_id: String,
        redirect_uri: String,
    },
    /// Exchange an authorization code for tokens
    GetToken(TokenRequest),
}

impl Endpoint for Authentication {
    fn descriptor(&self, base_url: &str) -> Result<RequestDescriptor, TraktError> {
        let oauth = UrlBuilder::new(base_url)?.segment("oauth");
        match self {
            Authentication::Authorize {
                client_id,
                redirect_uri,
            } => Ok(RequestDescriptor::get(
                oauth
                    .segment("authorize")
                    .query("response_type", "code")
                    .query("client_id", client_id)
                    .query("redirect_uri", redirect_uri)
                    .build(),
            )),
            Authentication::GetToken(request) => Ok(RequestDescriptor::post(
                oauth.segment("token").build(),
                codec::encode(request)?,
            )),
        }
    }

    fn cache_key(&self) -> Option<CacheKey> {
        None
    }
}
