//! Comments, lists, users, people and aggregate statistics

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{ListId, UserId, ID};
use super::media::Show;
use super::movies::Movie;

const SPOILER_OPEN: &str = "[spoiler]";
const SPOILER_CLOSE: &str = "[/spoiler]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(with = "crate::codec::date")]
    pub created_at: DateTime<Utc>,
    pub comment: String,
    pub spoiler: bool,
    pub review: bool,
    pub replies: u64,
    pub likes: u64,
    #[serde(default)]
    pub user_rating: Option<u8>,
    pub user: User,
}

impl Comment {
    /// Strip inline `[spoiler]...[/spoiler]` blocks and drop comments flagged
    /// as spoilers altogether
    pub fn hide_spoilers(comments: impl IntoIterator<Item = Comment>) -> Vec<Comment> {
        comments
            .into_iter()
            .filter(|c| !c.spoiler)
            .map(|mut c| {
                c.comment = strip_spoiler(&c.comment);
                c
            })
            .collect()
    }
}

fn strip_spoiler(text: &str) -> String {
    let (Some(start), Some(end)) = (text.find(SPOILER_OPEN), text.find(SPOILER_CLOSE)) else {
        return text.to_string();
    };
    if end < start {
        return text.to_string();
    }
    let mut stripped = String::with_capacity(text.len());
    stripped.push_str(&text[..start]);
    stripped.push_str(&text[end + SPOILER_CLOSE.len()..]);
    stripped.trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListPrivacy {
    Private,
    Friends,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub privacy: ListPrivacy,
    pub display_numbers: bool,
    pub allow_comments: bool,
    #[serde(default, with = "crate::codec::date::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::codec::date")]
    pub updated_at: DateTime<Utc>,
    pub item_count: u64,
    pub comment_count: u64,
    pub likes: u64,
    pub ids: ListId,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: Option<String>,
    pub private: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vip: Option<bool>,
    #[serde(default)]
    pub vip_ep: Option<bool>,
    pub ids: UserId,
    #[serde(default, with = "crate::codec::date::option")]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub ids: ID,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub death: Option<NaiveDate>,
    #[serde(default)]
    pub birthplace: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub show: Option<Show>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    #[serde(default)]
    pub jobs: Vec<String>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub show: Option<Show>,
}

/// Cast plus crew grouped by department (`directing`, `writing`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastAndCrew {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: BTreeMap<String, Vec<CrewMember>>,
}

/// Vote counts keyed `"1"` to `"10"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(rename = "1")]
    pub one: u64,
    #[serde(rename = "2")]
    pub two: u64,
    #[serde(rename = "3")]
    pub three: u64,
    #[serde(rename = "4")]
    pub four: u64,
    #[serde(rename = "5")]
    pub five: u64,
    #[serde(rename = "6")]
    pub six: u64,
    #[serde(rename = "7")]
    pub seven: u64,
    #[serde(rename = "8")]
    pub eight: u64,
    #[serde(rename = "9")]
    pub nine: u64,
    #[serde(rename = "10")]
    pub ten: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub rating: f64,
    pub votes: u64,
    pub distribution: Distribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub watchers: u64,
    pub plays: u64,
    pub collectors: u64,
    #[serde(default)]
    pub collected_episodes: Option<u64>,
    pub comments: u64,
    pub lists: u64,
    pub votes: u64,
}
