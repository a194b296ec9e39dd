use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// TMDb's id for the Horror genre.
pub const HORROR_GENRE_ID: u32 = 27;
pub const HORROR_GENRE_NAME: &str = "Horror";

/// A movie as resolved from one of the metadata providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub poster: Option<String>,
    pub imdb_id: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub year: String,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub amazon_link: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub title: String,
    pub release_date: String,
    pub poster: Option<String>,
}

/// TMDb genre id to name mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreTable {
    names: HashMap<u32, String>,
}

impl GenreTable {
    pub fn new<I>(genres: I) -> Self
    where
        I: IntoIterator<Item = (u32, String)>,
    {
        Self {
            names: genres.into_iter().collect(),
        }
    }

    pub fn name(&self, id: u32) -> &str {
        self.names.get(&id).map(|s| s.as_str()).unwrap_or("Unknown")
    }

    pub fn names(&self, ids: &[u32]) -> Vec<String> {
        ids.iter().map(|id| self.name(*id).to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Year part of a `YYYY-MM-DD` date, or "N/A".
pub fn year_from_date(date: Option<&str>) -> String {
    date.filter(|d| !d.is_empty())
        .and_then(|d| d.split('-').next())
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("{0} API key is not set")]
    MissingCredential(&'static str),
    #[error("Request to {0} failed: {1}")]
    Http(&'static str, #[source] reqwest::Error),
    #[error("{0} returned HTTP status {1}")]
    Status(&'static str, u16),
}

pub type MetaResult<T> = Result<T, MetadataError>;
