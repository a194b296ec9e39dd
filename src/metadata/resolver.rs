use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::model::*;
use super::source::{OmdbApi, TmdbApi};

/// One way of turning a free-text title into a `MovieRecord`.
///
/// `Ok(None)` means the source has no match; an `Err` is a failed call.
/// Either way the resolver moves on to the next strategy.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    fn name(&self) -> &str;
    async fn resolve(&self, title: &str) -> MetaResult<Option<MovieRecord>>;
}

/// Exact title lookup against OMDb.
pub struct OmdbTitleLookup {
    omdb: Arc<dyn OmdbApi>,
}

impl OmdbTitleLookup {
    pub fn new(omdb: Arc<dyn OmdbApi>) -> Self {
        Self { omdb }
    }
}

#[async_trait]
impl ResolveStrategy for OmdbTitleLookup {
    fn name(&self) -> &str {
        "omdb-title"
    }

    async fn resolve(&self, title: &str) -> MetaResult<Option<MovieRecord>> {
        Ok(self.omdb.find_by_title(title).await?.map(MovieRecord::from))
    }
}

/// First TMDb search result. TMDb's search listing carries neither the
/// director nor the IMDb id, so both stay empty.
pub struct TmdbSearchLookup {
    tmdb: Arc<dyn TmdbApi>,
}

impl TmdbSearchLookup {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        Self { tmdb }
    }
}

#[async_trait]
impl ResolveStrategy for TmdbSearchLookup {
    fn name(&self) -> &str {
        "tmdb-search"
    }

    async fn resolve(&self, title: &str) -> MetaResult<Option<MovieRecord>> {
        let results = self.tmdb.search_movies(title, false).await?;
        let Some(first) = results.into_iter().next() else {
            return Ok(None);
        };

        let genres = if first.genre_ids.is_empty() {
            Vec::new()
        } else {
            self.tmdb.genres().await?.names(&first.genre_ids)
        };

        Ok(Some(MovieRecord {
            title: first.title().to_string(),
            year: year_from_date(first.release_date.as_deref()),
            director: None,
            plot: first.overview.clone().filter(|o| !o.is_empty()),
            poster: self.tmdb.poster_url(first.poster_path.as_deref()),
            imdb_id: None,
            genres,
        }))
    }
}

pub struct MovieResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl MovieResolver {
    /// OMDb first, then TMDb search.
    pub fn new(omdb: Arc<dyn OmdbApi>, tmdb: Arc<dyn TmdbApi>) -> Self {
        let strategies: Vec<Box<dyn ResolveStrategy>> = vec![
            Box::new(OmdbTitleLookup::new(omdb)),
            Box::new(TmdbSearchLookup::new(tmdb)),
        ];
        Self::with_strategies(strategies)
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns `None` when no source knows the title.
    pub async fn resolve(&self, title: &str) -> Option<MovieRecord> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        for strategy in &self.strategies {
            match strategy.resolve(title).await {
                Ok(Some(record)) => {
                    info!(
                        title = %title,
                        resolved = %record.title,
                        source = strategy.name(),
                        "Resolved movie"
                    );
                    return Some(record);
                }
                Ok(None) => {
                    debug!(title = %title, source = strategy.name(), "No match");
                }
                Err(e) => {
                    warn!(title = %title, source = strategy.name(), "Movie lookup failed: {}", e);
                }
            }
        }

        None
    }
}
