//! Movies and the wrappers returned by movie charts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ID;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub ids: ID,

    // Extended info
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    /// Release day as sent by the API (`2010-12-16`)
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub trailer: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
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
    pub certification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingMovie {
    pub watchers: u64,
    pub movie: Movie,
}

/// Entry of the most played, watched and collected charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostMovie {
    pub watcher_count: u64,
    pub play_count: u64,
    pub collected_count: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnticipatedMovie {
    pub list_count: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxOfficeMovie {
    /// Weekend revenue in USD
    pub revenue: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedMovie {
    #[serde(with = "crate::codec::date")]
    pub updated_at: DateTime<Utc>,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub title: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Unknown,
    Premiere,
    Limited,
    Theatrical,
    Digital,
    Physical,
    Tv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRelease {
    pub country: String,
    pub certification: String,
    pub release_date: String,
    pub release_type: ReleaseType,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieTranslation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    pub language: String,
    #[serde(default)]
    pub country: Option<String>,
}
