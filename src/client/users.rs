//! Typed calls for the `/users` family

use super::Trakt;
use crate::endpoints::{InfoLevel, Users};
use crate::error::TraktError;
use crate::models::{UserStats, Watching};

pub struct UsersApi<'a> {
    trakt: &'a Trakt,
}

impl<'a> UsersApi<'a> {
    pub(super) fn new(trakt: &'a Trakt) -> Self {
        Self { trakt }
    }

    /// What `user_id` is watching, `None` when nothing
    ///
    /// # Panics
    ///
    /// If no access token is set.
    pub async fn watching(
        &self,
        user_id: &str,
        info: Option<InfoLevel>,
    ) -> Result<Option<Watching>, TraktError> {
        let endpoint = Users::Watching {
            user_id: user_id.to_string(),
            info,
        };
        match self.trakt.fetch(&endpoint).await {
            Ok(watching) => Ok(Some(watching)),
            Err(TraktError::EmptyContent) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn stats(&self, user_id: &str) -> Result<UserStats, TraktError> {
        self.trakt
            .fetch(&Users::Stats {
                user_id: user_id.to_string(),
            })
            .await
    }
}
