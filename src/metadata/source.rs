use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::*;

/// A successful OMDb title match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
}

/// One entry of a TMDb search, recommendation or discover listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl TmdbMovie {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverSort {
    PopularityDesc,
    ReleaseDateDesc,
}

impl DiscoverSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoverSort::PopularityDesc => "popularity.desc",
            DiscoverSort::ReleaseDateDesc => "primary_release_date.desc",
        }
    }
}

/// Parameters of a TMDb `/discover/movie` listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub genre_id: u32,
    pub sort: DiscoverSort,
    pub released_from: Option<NaiveDate>,
    pub released_to: Option<NaiveDate>,
}

impl DiscoverQuery {
    pub fn popular_horror() -> Self {
        Self {
            genre_id: HORROR_GENRE_ID,
            sort: DiscoverSort::PopularityDesc,
            released_from: None,
            released_to: None,
        }
    }

    pub fn horror_released_between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            genre_id: HORROR_GENRE_ID,
            sort: DiscoverSort::ReleaseDateDesc,
            released_from: Some(from),
            released_to: Some(to),
        }
    }
}

/// Source A: title lookup.
#[async_trait]
pub trait OmdbApi: Send + Sync {
    /// `Ok(None)` when OMDb reports no match.
    async fn find_by_title(&self, title: &str) -> MetaResult<Option<OmdbMovie>>;
}

/// Source B: search, recommendations, genre taxonomy and discovery.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_movies(&self, query: &str, include_adult: bool) -> MetaResult<Vec<TmdbMovie>>;
    async fn recommendations(&self, movie_id: u64) -> MetaResult<Vec<TmdbMovie>>;
    async fn similar(&self, movie_id: u64) -> MetaResult<Vec<TmdbMovie>>;
    async fn genres(&self) -> MetaResult<GenreTable>;
    async fn imdb_id(&self, movie_id: u64) -> MetaResult<Option<String>>;
    async fn discover(&self, query: &DiscoverQuery) -> MetaResult<Vec<TmdbMovie>>;

    fn image_base(&self) -> &str {
        "https://image.tmdb.org/t/p/w500"
    }

    fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        poster_path
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", self.image_base(), p))
    }
}
