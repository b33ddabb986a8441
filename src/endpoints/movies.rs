//! `/movies` endpoints

use chrono::NaiveDate;

use super::params::{CommentSort, InfoLevel, ListSort, ListType, TimePeriod};
use super::{Endpoint, UrlBuilder};
use crate::cache::{CacheKey, CacheLimits};
use crate::error::TraktError;
use crate::transport::RequestDescriptor;

/// Trakt id of a movie
pub type MovieId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movies {
    Trending {
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    },
    Popular {
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    },
    MostPlayed {
        page: u32,
        limit: u32,
        period: Option<TimePeriod>,
        info: Option<InfoLevel>,
    },
    MostWatched {
        page: u32,
        limit: u32,
        period: Option<TimePeriod>,
        info: Option<InfoLevel>,
    },
    MostCollected {
        page: u32,
        limit: u32,
        period: Option<TimePeriod>,
        info: Option<InfoLevel>,
    },
    Anticipated {
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    },
    BoxOffice {
        info: Option<InfoLevel>,
    },
    RecentlyUpdated {
        page: u32,
        limit: u32,
        start_date: Option<NaiveDate>,
        info: Option<InfoLevel>,
    },
    Details {
        id: MovieId,
        info: InfoLevel,
    },
    Aliases {
        id: MovieId,
    },
    Releases {
        id: MovieId,
        country: String,
    },
    Translations {
        id: MovieId,
        language: String,
    },
    Comments {
        id: MovieId,
        sort: Option<CommentSort>,
        page: u32,
        limit: u32,
    },
    Lists {
        id: MovieId,
        list_type: Option<ListType>,
        sort: Option<ListSort>,
        page: u32,
        limit: u32,
    },
    People {
        id: MovieId,
        info: Option<InfoLevel>,
    },
    Ratings {
        id: MovieId,
    },
    Related {
        id: MovieId,
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    },
    Stats {
        id: MovieId,
    },
    Watching {
        id: MovieId,
        info: Option<InfoLevel>,
    },
}

impl Movies {
    /// Cache namespace of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Movies::Trending { .. } => "trending",
            Movies::Popular { .. } => "popular",
            Movies::MostPlayed { .. } => "mostPlayed",
            Movies::MostWatched { .. } => "mostWatched",
            Movies::MostCollected { .. } => "mostCollected",
            Movies::Anticipated { .. } => "mostAnticipated",
            Movies::BoxOffice { .. } => "boxOffice",
            Movies::RecentlyUpdated { .. } => "recentlyUpdated",
            Movies::Details { .. } => "details",
            Movies::Aliases { .. } => "aliases",
            Movies::Releases { .. } => "releases",
            Movies::Translations { .. } => "translations",
            Movies::Comments { .. } => "comments",
            Movies::Lists { .. } => "lists",
            Movies::People { .. } => "people",
            Movies::Ratings { .. } => "movieRatings",
            Movies::Related { .. } => "related",
            Movies::Stats { .. } => "movieStats",
            Movies::Watching { .. } => "currentlyWatching",
        }
    }
}

impl Endpoint for Movies {
    fn descriptor(&self, base_url: &str) -> Result<RequestDescriptor, TraktError> {
        let movies = UrlBuilder::new(base_url)?.segment("movies");
        let url = match self {
            Movies::Trending { page, limit, info } => movies
                .segment("trending")
                .pagination(*page, *limit)
                .info(*info),
            Movies::Popular { page, limit, info } => movies
                .segment("popular")
                .pagination(*page, *limit)
                .info(*info),
            Movies::MostPlayed {
                page,
                limit,
                period,
                info,
            } => movies
                .segment("played")
                .segment_opt(*period)
                .pagination(*page, *limit)
                .info(*info),
            Movies::MostWatched {
                page,
                limit,
                period,
                info,
            } => movies
                .segment("watched")
                .segment_opt(*period)
                .pagination(*page, *limit)
                .info(*info),
            Movies::MostCollected {
                page,
                limit,
                period,
                info,
            } => movies
                .segment("collected")
                .segment_opt(*period)
                .pagination(*page, *limit)
                .info(*info),
            Movies::Anticipated { page, limit, info } => movies
                .segment("anticipated")
                .pagination(*page, *limit)
                .info(*info),
            Movies::BoxOffice { info } => movies.segment("boxoffice").info(*info),
            Movies::RecentlyUpdated {
                page,
                limit,
                start_date,
                info,
            } => movies
                .segment("updates")
                .segment_opt(start_date.map(|d| d.format("%Y-%m-%d")))
                .pagination(*page, *limit)
                .info(*info),
            Movies::Details { id, info } => movies.segment(id).info(Some(*info)),
            Movies::Aliases { id } => movies.segment(id).segment("aliases"),
            Movies::Releases { id, country } => {
                movies.segment(id).segment("releases").segment(country)
            }
            Movies::Translations { id, language } => movies
                .segment(id)
                .segment("translations")
                .segment(language),
            Movies::Comments {
                id,
                sort,
                page,
                limit,
            } => movies
                .segment(id)
                .segment("comments")
                .segment_opt(*sort)
                .pagination(*page, *limit),
            Movies::Lists {
                id,
                list_type,
                sort,
                page,
                limit,
            } => {
                // the sort segment is only meaningful after a type segment
                let type_segment = list_type.or(sort.map(|_| ListType::All));
                movies
                    .segment(id)
                    .segment("lists")
                    .segment_opt(type_segment)
                    .segment_opt(*sort)
                    .pagination(*page, *limit)
            }
            Movies::People { id, info } => movies.segment(id).segment("people").info(*info),
            Movies::Ratings { id } => movies.segment(id).segment("ratings"),
            Movies::Related {
                id,
                page,
                limit,
                info,
            } => movies
                .segment(id)
                .segment("related")
                .pagination(*page, *limit)
                .info(*info),
            Movies::Stats { id } => movies.segment(id).segment("stats"),
            Movies::Watching { id, info } => movies.segment(id).segment("watching").info(*info),
        };

        Ok(RequestDescriptor::get(url.build()))
    }

    fn cache_key(&self) -> Option<CacheKey> {
        let key = CacheKey::new(self.name());
        let key = match self {
            Movies::Trending { page, limit, info }
            | Movies::Popular { page, limit, info }
            | Movies::Anticipated { page, limit, info } => {
                key.with(page).with(limit).with_opt(*info)
            }
            Movies::MostPlayed {
                page,
                limit,
                period,
                info,
            }
            | Movies::MostWatched {
                page,
                limit,
                period,
                info,
            }
            | Movies::MostCollected {
                page,
                limit,
                period,
                info,
            } => key.with(page).with(limit).with_opt(*period).with_opt(*info),
            Movies::BoxOffice { info } => key.with_opt(*info),
            Movies::RecentlyUpdated {
                page,
                limit,
                start_date,
                info,
            } => key
                .with_opt(*start_date)
                .with(page)
                .with(limit)
                .with_opt(*info),
            Movies::Details { id, info } => key.with(id).with(info),
            Movies::Aliases { id } | Movies::Ratings { id } | Movies::Stats { id } => key.with(id),
            Movies::Releases { id, country } => key.with(id).with(country),
            Movies::Translations { id, language } => key.with(id).with(language),
            Movies::Comments {
                id,
                sort,
                page,
                limit,
            } => key.with(id).with_opt(*sort).with(page).with(limit),
            Movies::Lists {
                id,
                list_type,
                sort,
                page,
                limit,
            } => key
                .with(id)
                .with_opt(*list_type)
                .with_opt(*sort)
                .with(page)
                .with(limit),
            Movies::People { id, info } | Movies::Watching { id, info } => {
                key.with(id).with_opt(*info)
            }
            Movies::Related {
                id,
                page,
                limit,
                info,
            } => key.with(id).with(page).with(limit).with_opt(*info),
        };
        Some(key)
    }

    fn cache_limits(&self) -> CacheLimits {
        match self {
            Movies::Trending { .. }
            | Movies::Popular { .. }
            | Movies::MostPlayed { .. }
            | Movies::MostWatched { .. }
            | Movies::MostCollected { .. }
            | Movies::Anticipated { .. }
            | Movies::RecentlyUpdated { .. } => CacheLimits::CHART,
            Movies::BoxOffice { .. } => CacheLimits::SMALL,
            _ => CacheLimits::LARGE,
        }
    }
}
