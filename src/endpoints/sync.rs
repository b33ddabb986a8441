//! `/sync` endpoints
//!
//! Every operation here acts on the logged-in user's data. Reads are cached
//! per user session like any other response; mutations never are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::params::{CollectableType, ContentType, InfoLevel, WatchedType};
use super::{Endpoint, UrlBuilder};
use crate::cache::{CacheKey, CacheLimits};
use crate::codec;
use crate::constants::MB;
use crate::error::TraktError;
use crate::models::{TraktId, TraktIdContainer};
use crate::transport::RequestDescriptor;

/// Items to add to or remove from history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub movies: Vec<TraktIdContainer>,
    pub shows: Vec<TraktIdContainer>,
    pub episodes: Vec<TraktIdContainer>,
    /// History event ids, only meaningful when removing
    pub ids: Vec<u64>,
}

impl Payload {
    pub fn new(movies: &[u64], shows: &[u64], episodes: &[u64]) -> Self {
        Self {
            movies: TraktIdContainer::all(movies),
            shows: TraktIdContainer::all(shows),
            episodes: TraktIdContainer::all(episodes),
            ids: Vec::new(),
        }
    }

    pub fn with_history_ids(mut self, ids: &[u64]) -> Self {
        self.ids = ids.to_vec();
        self
    }
}

/// Items for collection, watchlist and rating removal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectablePayload {
    pub movies: Vec<TraktIdContainer>,
    pub shows: Vec<TraktIdContainer>,
    pub episodes: Vec<TraktIdContainer>,
    pub seasons: Vec<TraktIdContainer>,
}

impl CollectablePayload {
    pub fn new(movies: &[u64], shows: &[u64], episodes: &[u64], seasons: &[u64]) -> Self {
        Self {
            movies: TraktIdContainer::all(movies),
            shows: TraktIdContainer::all(shows),
            episodes: TraktIdContainer::all(episodes),
            seasons: TraktIdContainer::all(seasons),
        }
    }
}

/// Kind of object a rating applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateableContent {
    Movie,
    Show,
    Season,
    Episode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rateable {
    pub rating: u8,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::codec::date::option"
    )]
    pub rated_at: Option<DateTime<Utc>>,
    pub ids: TraktId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateablePayload {
    pub movies: Vec<Rateable>,
    pub shows: Vec<Rateable>,
    pub episodes: Vec<Rateable>,
    pub seasons: Vec<Rateable>,
}

impl RateablePayload {
    /// A payload rating exactly one object
    pub fn single(
        content: RateableContent,
        trakt: u64,
        rating: u8,
        rated_at: Option<DateTime<Utc>>,
    ) -> Self {
        let rateable = Rateable {
            rating,
            rated_at,
            ids: TraktId { trakt },
        };
        let mut payload = Self::default();
        match content {
            RateableContent::Movie => payload.movies.push(rateable),
            RateableContent::Show => payload.shows.push(rateable),
            RateableContent::Season => payload.seasons.push(rateable),
            RateableContent::Episode => payload.episodes.push(rateable),
        }
        payload
    }
}

/// Filters of a history read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub kind: ContentType,
    pub page: u32,
    pub limit: Option<u32>,
    /// Restrict to one movie, show or episode
    pub trakt_id: Option<u64>,
    /// Only `Full` is sent; other levels are the server default
    pub info: Option<InfoLevel>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl HistoryQuery {
    pub fn new(kind: ContentType, page: u32) -> Self {
        Self {
            kind,
            page,
            limit: Some(crate::constants::DEFAULT_RESULTS_PER_PAGE),
            trakt_id: None,
            info: None,
            start_at: None,
            end_at: None,
        }
    }

    fn sent_info(&self) -> Option<InfoLevel> {
        self.info.filter(|info| *info == InfoLevel::Full)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sync {
    LastActivities,
    PlaybackProgress {
        kind: WatchedType,
        limit: Option<u32>,
    },
    RemovePlayback {
        id: u64,
    },
    GetCollection {
        kind: CollectableType,
        info: InfoLevel,
    },
    AddToCollection(CollectablePayload),
    RemoveFromCollection(CollectablePayload),
    GetWatched {
        kind: CollectableType,
        info: InfoLevel,
    },
    GetHistory(HistoryQuery),
    AddToHistory(Payload),
    RemoveFromHistory(Payload),
    GetRatings {
        kind: ContentType,
        info: InfoLevel,
    },
    AddRatings(RateablePayload),
    RemoveRatings(CollectablePayload),
    GetWatchlist {
        kind: ContentType,
        info: InfoLevel,
        page: u32,
        limit: u32,
    },
    AddToWatchlist(CollectablePayload),
    RemoveFromWatchlist(CollectablePayload),
}

impl Sync {
    /// Cache namespace of a read; mutations have none
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Sync::LastActivities => Some("lastActivities"),
            Sync::PlaybackProgress { .. } => Some("playbackProgress"),
            Sync::GetCollection { .. } => Some("getCollection"),
            Sync::GetWatched { .. } => Some("getWatched"),
            Sync::GetHistory(_) => Some("getHistory"),
            Sync::GetRatings { .. } => Some("getRatings"),
            Sync::GetWatchlist { .. } => Some("getWatchlist"),
            _ => None,
        }
    }
}

impl Endpoint for Sync {
    fn descriptor(&self, base_url: &str) -> Result<RequestDescriptor, TraktError> {
        let sync = UrlBuilder::new(base_url)?.segment("sync");

        let request = match self {
            Sync::LastActivities => RequestDescriptor::get(sync.segment("last_activities").build()),
            Sync::PlaybackProgress { kind, limit } => RequestDescriptor::get(
                sync.segment("playback")
                    .segment(kind)
                    .query_opt("limit", *limit)
                    .build(),
            ),
            Sync::RemovePlayback { id } => {
                RequestDescriptor::delete(sync.segment("playback").segment(id).build())
            }
            Sync::GetCollection { kind, info } => RequestDescriptor::get(
                sync.segment("collection").segment(kind).info(Some(*info)).build(),
            ),
            Sync::AddToCollection(payload) => {
                RequestDescriptor::post(sync.segment("collection").build(), codec::encode(payload)?)
            }
            Sync::RemoveFromCollection(payload) => RequestDescriptor::post(
                sync.path("collection/remove").build(),
                codec::encode(payload)?,
            ),
            Sync::GetWatched { kind, info } => RequestDescriptor::get(
                sync.segment("watched").segment(kind).info(Some(*info)).build(),
            ),
            Sync::GetHistory(query) => RequestDescriptor::get(
                sync.segment("history")
                    .segment(query.kind)
                    .segment_opt(query.trakt_id)
                    .query("page", query.page)
                    .query_opt("limit", query.limit)
                    .info(query.sent_info())
                    .query_opt("start_at", query.start_at.as_ref().map(codec::date::format))
                    .query_opt("end_at", query.end_at.as_ref().map(codec::date::format))
                    .build(),
            ),
            Sync::AddToHistory(payload) => {
                RequestDescriptor::post(sync.segment("history").build(), codec::encode(payload)?)
            }
            Sync::RemoveFromHistory(payload) => RequestDescriptor::post(
                sync.path("history/remove").build(),
                codec::encode(payload)?,
            ),
            Sync::GetRatings { kind, info } => RequestDescriptor::get(
                sync.segment("ratings").segment(kind).info(Some(*info)).build(),
            ),
            Sync::AddRatings(payload) => {
                RequestDescriptor::post(sync.segment("ratings").build(), codec::encode(payload)?)
            }
            Sync::RemoveRatings(payload) => RequestDescriptor::post(
                sync.path("ratings/remove").build(),
                codec::encode(payload)?,
            ),
            Sync::GetWatchlist {
                kind,
                info,
                page,
                limit,
            } => RequestDescriptor::get(
                sync.segment("watchlist")
                    .segment(kind)
                    .info(Some(*info))
                    .pagination(*page, *limit)
                    .build(),
            ),
            Sync::AddToWatchlist(payload) => {
                RequestDescriptor::post(sync.segment("watchlist").build(), codec::encode(payload)?)
            }
            Sync::RemoveFromWatchlist(payload) => RequestDescriptor::post(
                sync.path("watchlist/remove").build(),
                codec::encode(payload)?,
            ),
        };

        Ok(request)
    }

    fn cache_key(&self) -> Option<CacheKey> {
        let key = CacheKey::new(self.name()?);
        let key = match self {
            Sync::LastActivities => key,
            Sync::PlaybackProgress { kind, limit } => key.with(kind.as_str()).with_opt(*limit),
            Sync::GetCollection { kind, info } | Sync::GetWatched { kind, info } => {
                key.with(kind).with(info)
            }
            Sync::GetHistory(query) => key
                .with(query.kind.as_str())
                .with_opt(query.trakt_id)
                .with(query.page)
                .with_opt(query.limit)
                .with_opt(query.sent_info())
                .with_opt(query.start_at.as_ref().map(codec::date::format))
                .with_opt(query.end_at.as_ref().map(codec::date::format)),
            Sync::GetRatings { kind, info } => key.with(kind.as_str()).with(info),
            Sync::GetWatchlist {
                kind,
                info,
                page,
                limit,
            } => key.with(kind.as_str()).with(info).with(page).with(limit),
            _ => return None,
        };
        Some(key)
    }

    fn cache_limits(&self) -> CacheLimits {
        match self {
            Sync::LastActivities => CacheLimits::SMALL,
            Sync::PlaybackProgress { .. } => CacheLimits {
                disk_max_bytes: MB,
                memory_max_items: 500,
            },
            _ => CacheLimits::LARGE,
        }
    }

    fn requires_auth(&self) -> bool {
        true
    }
}
