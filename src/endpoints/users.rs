//! `/users` endpoints

use super::params::InfoLevel;
use super::{Endpoint, UrlBuilder};
use crate::cache::{CacheKey, CacheLimits};
use crate::error::TraktError;
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Users {
    /// What the user is watching now; 204 when nothing
    Watching {
        user_id: String,
        info: Option<InfoLevel>,
    },
    Stats {
        user_id: String,
    },
}

impl Users {
    pub fn name(&self) -> &'static str {
        match self {
            Users::Watching { .. } => "getWatching",
            Users::Stats { .. } => "userStats",
        }
    }
}

impl Endpoint for Users {
    fn descriptor(&self, base_url: &str) -> Result<RequestDescriptor, TraktError> {
        let users = UrlBuilder::new(base_url)?.segment("users");
        let url = match self {
            Users::Watching { user_id, info } => {
                users.segment(user_id).segment("watching").info(*info)
            }
            Users::Stats { user_id } => users.segment(user_id).segment("stats"),
        };
        Ok(RequestDescriptor::get(url.build()))
    }

    fn cache_key(&self) -> Option<CacheKey> {
        let key = CacheKey::new(self.name());
        Some(match self {
            Users::Watching { user_id, info } => key.with(user_id).with_opt(*info),
            Users::Stats { user_id } => key.with(user_id),
        })
    }

    fn cache_limits(&self) -> CacheLimits {
        CacheLimits::SMALL
    }

    fn requires_auth(&self) -> bool {
        matches!(self, Users::Watching { .. })
    }
}
