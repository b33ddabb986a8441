//! Typed calls for the `/movies` family

use chrono::NaiveDate;

use super::Trakt;
use crate::endpoints::movies::MovieId;
use crate::endpoints::{CommentSort, InfoLevel, ListSort, ListType, Movies, TimePeriod};
use crate::error::TraktError;
use crate::fetch::Paginated;
use crate::models::{
    Alias, AnticipatedMovie, BoxOfficeMovie, CastAndCrew, Comment, List, MostMovie, Movie,
    MovieRelease, MovieTranslation, RatingDistribution, Stats, TrendingMovie, UpdatedMovie, User,
};

pub struct MoviesApi<'a> {
    trakt: &'a Trakt,
}

impl<'a> MoviesApi<'a> {
    pub(super) fn new(trakt: &'a Trakt) -> Self {
        Self { trakt }
    }

    /// Movies being watched right now, most watchers first
    pub async fn trending(
        &self,
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<TrendingMovie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::Trending { page, limit, info })
            .await
    }

    pub async fn popular(
        &self,
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<Movie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::Popular { page, limit, info })
            .await
    }

    pub async fn most_played(
        &self,
        page: u32,
        limit: u32,
        period: Option<TimePeriod>,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<MostMovie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::MostPlayed {
                page,
                limit,
                period,
                info,
            })
            .await
    }

    pub async fn most_watched(
        &self,
        page: u32,
        limit: u32,
        period: Option<TimePeriod>,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<MostMovie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::MostWatched {
                page,
                limit,
                period,
                info,
            })
            .await
    }

    pub async fn most_collected(
        &self,
        page: u32,
        limit: u32,
        period: Option<TimePeriod>,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<MostMovie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::MostCollected {
                page,
                limit,
                period,
                info,
            })
            .await
    }

    /// Movies on the most lists that have not been released yet
    pub async fn anticipated(
        &self,
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<AnticipatedMovie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::Anticipated { page, limit, info })
            .await
    }

    /// Top 10 grossing movies of the last weekend
    pub async fn box_office(
        &self,
        info: Option<InfoLevel>,
    ) -> Result<Vec<BoxOfficeMovie>, TraktError> {
        self.trakt.fetch(&Movies::BoxOffice { info }).await
    }

    pub async fn recently_updated(
        &self,
        page: u32,
        limit: u32,
        start_date: Option<NaiveDate>,
        info: Option<InfoLevel>,
    ) -> Result<Paginated<Vec<UpdatedMovie>>, TraktError> {
        self.trakt
            .fetch_paginated(&Movies::RecentlyUpdated {
                page,
                limit,
                start_date,
                info,
            })
            .await
    }

    pub async fn details(&self, id: MovieId, info: InfoLevel) -> Result<Movie, TraktError> {
        self.trakt.fetch(&Movies::Details { id, info }).await
    }

    pub async fn aliases(&self, id: MovieId) -> Result<Vec<Alias>, TraktError> {
        self.trakt.fetch(&Movies::Aliases { id }).await
    }

    /// Releases in one country (two-letter code)
    pub async fn releases(
        &self,
        id: MovieId,
        country: &str,
    ) -> Result<Vec<MovieRelease>, TraktError> {
        self.trakt
            .fetch(&Movies::Releases {
                id,
                country: country.to_string(),
            })
            .await
    }

    pub async fn translations(
        &self,
        id: MovieId,
        language: &str,
    ) -> Result<Vec<MovieTranslation>, TraktError> {
        self.trakt
            .fetch(&Movies::Translations {
                id,
                language: language.to_string(),
            })
            .await
    }

    /// Top level comments; see `Comment::hide_spoilers`
    pub async fn comments(
        &self,
        id: MovieId,
        sort: Option<CommentSort>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Comment>, TraktError> {
        self.trakt
            .fetch(&Movies::Comments {
                id,
                sort,
                page,
                limit,
            })
            .await
    }

    /// Lists containing the movie; personal lists by popularity when unfiltered
    pub async fn lists(
        &self,
        id: MovieId,
        list_type: Option<ListType>,
        sort: Option<ListSort>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<List>, TraktError> {
        self.trakt
            .fetch(&Movies::Lists {
                id,
                list_type,
                sort,
                page,
                limit,
            })
            .await
    }

    pub async fn people(
        &self,
        id: MovieId,
        info: Option<InfoLevel>,
    ) -> Result<CastAndCrew, TraktError> {
        self.trakt.fetch(&Movies::People { id, info }).await
    }

    pub async fn ratings(&self, id: MovieId) -> Result<RatingDistribution, TraktError> {
        self.trakt.fetch(&Movies::Ratings { id }).await
    }

    pub async fn related(
        &self,
        id: MovieId,
        page: u32,
        limit: u32,
        info: Option<InfoLevel>,
    ) -> Result<Vec<Movie>, TraktError> {
        self.trakt
            .fetch(&Movies::Related {
                id,
                page,
                limit,
                info,
            })
            .await
    }

    pub async fn stats(&self, id: MovieId) -> Result<Stats, TraktError> {
        self.trakt.fetch(&Movies::Stats { id }).await
    }

    /// Users watching the movie right now
    pub async fn watching(
        &self,
        id: MovieId,
        info: Option<InfoLevel>,
    ) -> Result<Vec<User>, TraktError> {
        self.trakt.fetch(&Movies::Watching { id, info }).await
    }
}
