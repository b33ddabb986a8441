//! The `Trakt` client
//!
//! Owns the cache, the transport and the user session. Every request carries
//! the API headers; login-gated endpoints additionally carry the bearer
//! token and panic when there is none.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cache::{CacheError, CacheStats, CacheStore};
use crate::config::ClientConfig;
use crate::constants::{API_KEY_HEADER, API_VERSION, API_VERSION_HEADER};
use crate::endpoints::authentication::AUTHORIZATION_CODE_GRANT;
use crate::endpoints::{Authentication, Checkin, Endpoint};
use crate::error::TraktError;
use crate::fetch::{Fetcher, Paginated};
use crate::models::{self, TokenRequest, TokenResponse};
use crate::transport::{CancelToken, ReqwestTransport, RequestContext, Transport};

mod movies;
mod sync;
mod users;

pub use movies::MoviesApi;
pub use sync::SyncApi;
pub use users::UsersApi;

const AUTHORIZATION_HEADER: &str = "Authorization";
const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

pub struct Trakt {
    config: ClientConfig,
    fetcher: Fetcher,
    access_token: RwLock<Option<String>>,
}

impl Trakt {
    /// Client talking to the configured base URL over reqwest
    pub fn new(config: ClientConfig) -> Result<Self, TraktError> {
        let transport = Arc::new(ReqwestTransport::new(&config.http)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let cache = Arc::new(CacheStore::new(config.cache.clone()));
        Self::with_parts(config, transport, cache)
    }

    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        cache: Arc<CacheStore>,
    ) -> Self {
        let fetcher = Fetcher::new(
            config.normalized_base_url(),
            transport,
            cache,
            config.coalesce_requests,
        );
        Self {
            config,
            fetcher,
            access_token: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Use `access_token` for every following request
    pub fn authenticate(&self, access_token: impl Into<String>) {
        *self.access_token.write() = Some(access_token.into());
    }

    pub fn sign_out(&self) {
        *self.access_token.write() = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token.read().is_some()
    }

    pub fn movies(&self) -> MoviesApi<'_> {
        MoviesApi::new(self)
    }

    pub fn sync(&self) -> SyncApi<'_> {
        SyncApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Fetch and decode `endpoint`
    ///
    /// # Panics
    ///
    /// If the endpoint requires login and no access token is set.
    pub async fn fetch<T, E>(&self, endpoint: &E) -> Result<T, TraktError>
    where
        T: Serialize + DeserializeOwned + Send,
        E: Endpoint + ?Sized,
    {
        self.fetch_paginated(endpoint).await.map(|p| p.value)
    }

    /// Like `fetch`, also returning the pagination headers
    pub async fn fetch_paginated<T, E>(&self, endpoint: &E) -> Result<Paginated<T>, TraktError>
    where
        T: Serialize + DeserializeOwned + Send,
        E: Endpoint + ?Sized,
    {
        let context = self.context(endpoint);
        self.fetcher.fetch(endpoint, context).await
    }

    /// Like `fetch_paginated`, abandoned with `Cancelled` once `cancel` fires
    pub async fn fetch_cancellable<T, E>(
        &self,
        endpoint: &E,
        cancel: CancelToken,
    ) -> Result<Paginated<T>, TraktError>
    where
        T: Serialize + DeserializeOwned + Send,
        E: Endpoint + ?Sized,
    {
        let context = self.context(endpoint).with_cancel(cancel);
        self.fetcher.fetch(endpoint, context).await
    }

    /// Remove every cached response from memory and disk
    pub async fn clear_caches(&self) -> Result<(), CacheError> {
        self.fetcher.cache().clear().await
    }

    /// Bytes the disk cache currently uses
    pub async fn disk_cache_size(&self) -> u64 {
        self.fetcher.cache().total_disk_size().await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.fetcher.cache().stats()
    }

    /// Page the user logs in on. After login Trakt redirects to `redirect_uri`
    /// with a `code` query parameter.
    pub fn oauth_url(&self, redirect_uri: &str) -> Result<String, TraktError> {
        let endpoint = Authentication::Authorize {
            client_id: self.config.client_id.clone(),
            redirect_uri: redirect_uri.to_string(),
        };
        Ok(endpoint.descriptor(self.fetcher.base_url())?.url)
    }

    /// Exchange the code in `callback_url` for tokens
    ///
    /// The client is not logged in automatically; pass the access token to
    /// `authenticate`.
    pub async fn get_token(
        &self,
        callback_url: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, TraktError> {
        let client_secret = self
            .config
            .client_secret
            .clone()
            .ok_or(TraktError::ClientSecretMissing)?;
        let code = authorization_code(callback_url)?;

        let endpoint = Authentication::GetToken(TokenRequest {
            code,
            client_id: self.config.client_id.clone(),
            client_secret,
            redirect_uri: redirect_uri.to_string(),
            grant_type: AUTHORIZATION_CODE_GRANT.to_string(),
        });
        self.fetch(&endpoint).await
    }

    /// Check the user into a movie or episode
    ///
    /// # Panics
    ///
    /// If no access token is set.
    pub async fn checkin(&self, checkin: Checkin) -> Result<models::Checkin, TraktError> {
        self.fetch(&checkin).await
    }

    fn context<E: Endpoint + ?Sized>(&self, endpoint: &E) -> RequestContext {
        let mut headers = BTreeMap::new();
        headers.insert(API_KEY_HEADER.to_string(), self.config.client_id.clone());
        headers.insert(API_VERSION_HEADER.to_string(), API_VERSION.to_string());
        headers.insert(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string());

        let token = self.access_token.read().clone();
        if endpoint.requires_auth() && token.is_none() {
            panic!(
                "This call requires a logged in user. Pass the access token to `Trakt::authenticate` after a successful login."
            );
        }
        if let Some(token) = token {
            headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
        }

        RequestContext::new(headers)
    }
}

fn authorization_code(callback_url: &str) -> Result<String, TraktError> {
    let url = reqwest::Url::parse(callback_url)
        .map_err(|e| TraktError::InvalidUrl(format!("{}: {}", callback_url, e)))?;
    url.query_pairs()
        .find(|(name, _)| name == "code")
        .map(|(_, value)| value.into_owned())
        .ok_or(TraktError::OAuthCallbackCodeMissing)
}
