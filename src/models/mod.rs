//! Typed request and response bodies
//!
//! Field names match the snake_case wire format. Timestamps go through
//! `codec::date` so they round-trip byte for byte.

pub mod auth;
pub mod ids;
pub mod media;
pub mod movies;
pub mod social;
pub mod sync;
pub mod users;

pub use auth::{TokenRequest, TokenResponse};
pub use ids::{EpisodeId, ListId, SeasonId, TraktId, TraktIdContainer, UserId, ID};
pub use media::{Airs, Episode, Season, Show};
pub use movies::{
    Alias, AnticipatedMovie, BoxOfficeMovie, MostMovie, Movie, MovieRelease, MovieTranslation,
    ReleaseType, TrendingMovie, UpdatedMovie,
};
pub use social::{
    CastAndCrew, CastMember, Comment, CrewMember, Distribution, List, ListPrivacy, Person,
    RatingDistribution, Stats, User,
};
pub use sync::{
    AddToWatchlist, AddedRatings, AddedToCollection, AddedToHistory, CollectedItem, HistoryItem,
    LastActivities, ListItem, NotFound, PlaybackProgress, Rating, RemoveFromWatchlist,
    RemoveRatings, RemovedFromCollection, RemovedFromHistory, SyncCounts, WatchedItem,
};
pub use users::{
    Checkin, NetworkStats, PlayStats, SeasonStats, ShareSettings, ShowStats, UserRatings, UserStats,
    Watching,
};
