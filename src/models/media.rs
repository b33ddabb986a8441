//! Shows, seasons and episodes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EpisodeId, SeasonId, ID};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airs {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub ids: ID,

    // Extended info
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, with = "crate::codec::date::option")]
    pub first_aired: Option<DateTime<Utc>>,
    #[serde(default)]
    pub airs: Option<Airs>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub trailer: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default, with = "crate::codec::date::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub available_translations: Option<Vec<String>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub aired_episodes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub number: u32,
    pub ids: SeasonId,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub aired_episodes: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, with = "crate::codec::date::option")]
    pub first_aired: Option<DateTime<Utc>>,
    #[serde(default)]
    pub episodes: Option<Vec<Episode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    #[serde(default)]
    pub title: Option<String>,
    pub ids: EpisodeId,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default, with = "crate::codec::date::option")]
    pub first_aired: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::codec::date::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub available_translations: Option<Vec<String>>,
}
