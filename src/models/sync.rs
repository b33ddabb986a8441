//! Bodies of the `/sync` endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TraktIdContainer;
use super::media::{Episode, Season, Show};
use super::movies::Movie;
use super::social::Person;

/// Timestamps of the latest change per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastActivities {
    #[serde(with = "crate::codec::date")]
    pub all: DateTime<Utc>,
    pub movies: MovieActivities,
    pub episodes: EpisodeActivities,
    pub shows: ContainerActivities,
    pub seasons: ContainerActivities,
    pub comments: CommentActivities,
    pub lists: ListActivities,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieActivities {
    #[serde(with = "crate::codec::date")]
    pub watched_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub collected_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub rated_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub watchlisted_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub commented_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub paused_at: DateTime<Utc>,
    #[serde(default, with = "crate::codec::date::option")]
    pub hidden_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeActivities {
    #[serde(with = "crate::codec::date")]
    pub watched_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub collected_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub rated_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub watchlisted_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub commented_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub paused_at: DateTime<Utc>,
}

/// Activities of shows and seasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerActivities {
    #[serde(with = "crate::codec::date")]
    pub rated_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub watchlisted_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub commented_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentActivities {
    #[serde(with = "crate::codec::date")]
    pub liked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListActivities {
    #[serde(with = "crate::codec::date")]
    pub liked_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub commented_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackProgress {
    /// Percentage watched, 0 to 100
    pub progress: f32,
    #[serde(with = "crate::codec::date")]
    pub paused_at: DateTime<Utc>,
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(default)]
    pub show: Option<Show>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedEpisode {
    pub number: u32,
    #[serde(with = "crate::codec::date")]
    pub collected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedSeason {
    pub number: u32,
    pub episodes: Vec<CollectedEpisode>,
}

/// A collected movie or show
///
/// Movies carry `collected_at`, shows carry `last_collected_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedItem {
    #[serde(
        default,
        alias = "collected_at",
        with = "crate::codec::date::option"
    )]
    pub last_collected_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at", with = "crate::codec::date::option")]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub seasons: Option<Vec<CollectedSeason>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedEpisode {
    pub number: u32,
    pub plays: u64,
    #[serde(with = "crate::codec::date")]
    pub last_watched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedSeason {
    pub number: u32,
    #[serde(default)]
    pub episodes: Option<Vec<WatchedEpisode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub plays: u64,
    #[serde(with = "crate::codec::date")]
    pub last_watched_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub last_updated_at: DateTime<Utc>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub seasons: Option<Vec<WatchedSeason>>,
    #[serde(default)]
    pub movie: Option<Movie>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Id of the watch event, used to remove it from history
    pub id: u64,
    #[serde(with = "crate::codec::date")]
    pub watched_at: DateTime<Utc>,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub episode: Option<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(with = "crate::codec::date")]
    pub rated_at: DateTime<Utc>,
    pub rating: u8,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub episode: Option<Episode>,
}

/// Watchlist entry, sorted by `rank`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub rank: u64,
    #[serde(with = "crate::codec::date")]
    pub listed_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub person: Option<Person>,
}

/// Per-type counts of a sync mutation; absent types count as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    #[serde(default)]
    pub movies: u64,
    #[serde(default)]
    pub shows: u64,
    #[serde(default)]
    pub seasons: u64,
    #[serde(default)]
    pub episodes: u64,
}

/// Items of a sync mutation the server could not match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFound {
    #[serde(default)]
    pub movies: Vec<TraktIdContainer>,
    #[serde(default)]
    pub shows: Vec<TraktIdContainer>,
    #[serde(default)]
    pub seasons: Vec<TraktIdContainer>,
    #[serde(default)]
    pub episodes: Vec<TraktIdContainer>,
    /// History event ids
    #[serde(default)]
    pub ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedToHistory {
    pub added: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

/// Response of adding ratings, same shape as a history addition
pub type AddedRatings = AddedToHistory;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedFromHistory {
    pub deleted: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedToCollection {
    pub added: SyncCounts,
    #[serde(default)]
    pub updated: SyncCounts,
    #[serde(default)]
    pub existing: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedFromCollection {
    pub deleted: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToWatchlist {
    pub added: SyncCounts,
    #[serde(default)]
    pub existing: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromWatchlist {
    pub deleted: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRatings {
    pub deleted: SyncCounts,
    #[serde(default)]
    pub not_found: NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_collected_movie_reads_collected_at() {
        let json = br#"[{"collected_at":"2014-09-01T09:10:11.000Z","updated_at":"2014-09-01T09:10:11.000Z",
            "movie":{"title":"Batman Begins","year":2005,"ids":{"trakt":6,"slug":"batman-begins-2005"}}}]"#;
        let items: Vec<CollectedItem> = decode(json).unwrap();
        assert!(items[0].last_collected_at.is_some());
        assert!(items[0].movie.is_some());
        assert!(items[0].show.is_none());
    }

    #[test]
    fn test_collected_show_reads_last_collected_at_and_seasons() {
        let json = br#"[{"last_collected_at":"2014-09-01T09:10:11.000Z","last_updated_at":"2014-09-01T09:10:11.000Z",
            "show":{"title":"Breaking Bad","year":2008,"ids":{"trakt":1,"slug":"breaking-bad"}},
            "seasons":[{"number":1,"episodes":[{"number":1,"collected_at":"2014-09-01T09:10:11.000Z"}]}]}]"#;
        let items: Vec<CollectedItem> = decode(json).unwrap();
        let seasons = items[0].seasons.as_ref().unwrap();
        assert_eq!(seasons[0].episodes[0].number, 1);
    }

    #[test]
    fn test_mutation_results_default_missing_types_to_zero() {
        let json = br#"{"added":{"movies":1,"episodes":12},"not_found":{"movies":[{"ids":{"trakt":9}}]}}"#;
        let result: AddedToHistory = decode(json).unwrap();
        assert_eq!(result.added.movies, 1);
        assert_eq!(result.added.shows, 0);
        assert_eq!(result.not_found.movies, vec![TraktIdContainer::new(9)]);
        assert!(result.not_found.ids.is_empty());
    }

    #[test]
    fn test_playback_progress_renames_type() {
        let json = br#"[{"progress":10.0,"paused_at":"2015-01-25T22:01:32.000Z","id":13,"type":"movie",
            "movie":{"title":"Batman Begins","year":2005,"ids":{"trakt":1,"slug":"batman-begins-2005"}}}]"#;
        let progress: Vec<PlaybackProgress> = decode(json).unwrap();
        assert_eq!(progress[0].kind, "movie");
        assert_eq!(progress[0].id, 13);
    }
}
