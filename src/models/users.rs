//! User activity and check-ins

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{Episode, Show};
use super::movies::Movie;
use super::social::Distribution;

/// What a user is watching right now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watching {
    #[serde(with = "crate::codec::date")]
    pub expires_at: DateTime<Utc>,
    #[serde(with = "crate::codec::date")]
    pub started_at: DateTime<Utc>,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub movie: Option<Movie>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStats {
    pub plays: u64,
    pub watched: u64,
    pub minutes: u64,
    pub collected: u64,
    pub ratings: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowStats {
    pub watched: u64,
    pub collected: u64,
    pub ratings: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub ratings: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub friends: u64,
    pub followers: u64,
    pub following: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRatings {
    pub total: u64,
    pub distribution: Distribution,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub movies: PlayStats,
    pub shows: ShowStats,
    pub seasons: SeasonStats,
    pub episodes: PlayStats,
    pub network: NetworkStats,
    pub ratings: UserRatings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    #[serde(default)]
    pub facebook: bool,
    #[serde(default)]
    pub twitter: bool,
    #[serde(default)]
    pub tumblr: bool,
}

/// Result of a successful check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    pub id: u64,
    #[serde(with = "crate::codec::date")]
    pub watched_at: DateTime<Utc>,
    #[serde(default)]
    pub sharing: ShareSettings,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub episode: Option<Episode>,
}
