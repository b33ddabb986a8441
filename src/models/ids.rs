//! Identifier sets attached to every object

use serde::{Deserialize, Serialize};

/// Ids of a movie or show
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ID {
    pub trakt: u64,
    pub slug: String,
    #[serde(default)]
    pub tvdb: Option<u64>,
    #[serde(default)]
    pub imdb: Option<String>,
    #[serde(default)]
    pub tmdb: Option<u64>,
    #[serde(default)]
    pub tvrage: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonId {
    pub trakt: u64,
    #[serde(default)]
    pub tvdb: Option<u64>,
    #[serde(default)]
    pub tmdb: Option<u64>,
    #[serde(default)]
    pub tvrage: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeId {
    pub trakt: u64,
    #[serde(default)]
    pub tvdb: Option<u64>,
    #[serde(default)]
    pub imdb: Option<String>,
    #[serde(default)]
    pub tmdb: Option<u64>,
    #[serde(default)]
    pub tvrage: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId {
    pub trakt: u64,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId {
    pub slug: String,
}

/// Bare Trakt id, as sent in sync payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraktId {
    pub trakt: u64,
}

/// `{"ids": {"trakt": n}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraktIdContainer {
    pub ids: TraktId,
}

impl TraktIdContainer {
    pub fn new(trakt: u64) -> Self {
        Self {
            ids: TraktId { trakt },
        }
    }

    /// Wrap each id
    pub fn all(ids: &[u64]) -> Vec<Self> {
        ids.iter().copied().map(Self::new).collect()
    }
}
