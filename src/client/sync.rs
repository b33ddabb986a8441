//! Typed calls for the `/sync` family
//!
//! Every call panics when no access token is set.

use chrono::{DateTime, Utc};

use super::Trakt;
use crate::endpoints;
use crate::endpoints::sync::{
    CollectablePayload, HistoryQuery, Payload, RateableContent, RateablePayload,
};
use crate::endpoints::{CollectableType, ContentType, InfoLevel, WatchedType};
use crate::error::TraktError;
use crate::fetch::Paginated;
use crate::models::{
    AddToWatchlist, AddedRatings, AddedToCollection, AddedToHistory, CollectedItem, HistoryItem,
    LastActivities, ListItem, PlaybackProgress, Rating, RemoveFromWatchlist, RemoveRatings,
    RemovedFromCollection, RemovedFromHistory, WatchedItem,
};

pub struct SyncApi<'a> {
    trakt: &'a Trakt,
}

impl<'a> SyncApi<'a> {
    pub(super) fn new(trakt: &'a Trakt) -> Self {
        Self { trakt }
    }

    /// Latest change per category; compare against a stored copy to decide what to re-sync
    pub async fn last_activities(&self) -> Result<LastActivities, TraktError> {
        self.trakt.fetch(&endpoints::Sync::LastActivities).await
    }

    /// Paused playbacks; every item when `limit` is `None`
    pub async fn playback_progress(
        &self,
        kind: WatchedType,
        limit: Option<u32>,
    ) -> Result<Paginated<Vec<PlaybackProgress>>, TraktError> {
        self.trakt
            .fetch_paginated(&endpoints::Sync::PlaybackProgress { kind, limit })
            .await
    }

    /// Remove one paused playback. The server answers 204 on success.
    pub async fn remove_playback(&self, id: u64) -> Result<(), TraktError> {
        match self
            .trakt
            .fetch::<serde_json::Value, _>(&endpoints::Sync::RemovePlayback { id })
            .await
        {
            Ok(_) | Err(TraktError::EmptyContent) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn collection(
        &self,
        kind: CollectableType,
        info: InfoLevel,
    ) -> Result<Vec<CollectedItem>, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::GetCollection { kind, info })
            .await
    }

    pub async fn add_to_collection(
        &self,
        payload: CollectablePayload,
    ) -> Result<AddedToCollection, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::AddToCollection(payload))
            .await
    }

    pub async fn remove_from_collection(
        &self,
        payload: CollectablePayload,
    ) -> Result<RemovedFromCollection, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::RemoveFromCollection(payload))
            .await
    }

    /// Watched movies or shows, most plays first
    pub async fn watched(
        &self,
        kind: CollectableType,
        info: InfoLevel,
    ) -> Result<Vec<WatchedItem>, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::GetWatched { kind, info })
            .await
    }

    /// Watch events, most recent first
    pub async fn history(
        &self,
        query: HistoryQuery,
    ) -> Result<Paginated<Vec<HistoryItem>>, TraktError> {
        self.trakt
            .fetch_paginated(&endpoints::Sync::GetHistory(query))
            .await
    }

    pub async fn add_to_history(
        &self,
        movies: &[u64],
        shows: &[u64],
        episodes: &[u64],
    ) -> Result<AddedToHistory, TraktError> {
        let payload = Payload::new(movies, shows, episodes);
        self.trakt
            .fetch(&endpoints::Sync::AddToHistory(payload))
            .await
    }

    /// Remove items, or single watch events by their history `ids`
    pub async fn remove_from_history(
        &self,
        movies: &[u64],
        shows: &[u64],
        episodes: &[u64],
        ids: &[u64],
    ) -> Result<RemovedFromHistory, TraktError> {
        let payload = Payload::new(movies, shows, episodes).with_history_ids(ids);
        self.trakt
            .fetch(&endpoints::Sync::RemoveFromHistory(payload))
            .await
    }

    pub async fn ratings(
        &self,
        kind: ContentType,
        info: InfoLevel,
    ) -> Result<Vec<Rating>, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::GetRatings { kind, info })
            .await
    }

    /// Rate one item
    ///
    /// # Panics
    ///
    /// If `rating` is outside 1..=10.
    pub async fn add_rating(
        &self,
        rating: u8,
        content: RateableContent,
        trakt_id: u64,
        rated_at: Option<DateTime<Utc>>,
    ) -> Result<AddedRatings, TraktError> {
        assert!(
            (1..=10).contains(&rating),
            "Rating has to be between 1 and 10"
        );
        let payload = RateablePayload::single(content, trakt_id, rating, rated_at);
        self.trakt
            .fetch(&endpoints::Sync::AddRatings(payload))
            .await
    }

    pub async fn remove_ratings(
        &self,
        payload: CollectablePayload,
    ) -> Result<RemoveRatings, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::RemoveRatings(payload))
            .await
    }

    /// Watchlist items by ascending rank
    pub async fn watchlist(
        &self,
        kind: ContentType,
        info: InfoLevel,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<Vec<ListItem>>, TraktError> {
        self.trakt
            .fetch_paginated(&endpoints::Sync::GetWatchlist {
                kind,
                info,
                page,
                limit,
            })
            .await
    }

    pub async fn add_to_watchlist(
        &self,
        payload: CollectablePayload,
    ) -> Result<AddToWatchlist, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::AddToWatchlist(payload))
            .await
    }

    pub async fn remove_from_watchlist(
        &self,
        payload: CollectablePayload,
    ) -> Result<RemoveFromWatchlist, TraktError> {
        self.trakt
            .fetch(&endpoints::Sync::RemoveFromWatchlist(payload))
            .await
    }
}
