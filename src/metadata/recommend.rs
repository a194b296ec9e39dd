use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::model::*;
use super::source::{DiscoverQuery, TmdbApi, TmdbMovie};
use crate::util::amazon_search_link;

pub const MAX_RECOMMENDATIONS: usize = 5;
/// Below this many entries a candidate list or the final result counts as thin.
pub const MIN_RECOMMENDATIONS: usize = 3;
const MAX_CANDIDATES: usize = 10;
const MAX_GENRES_WITHOUT_HORROR: usize = 2;

/// A TMDb listing that can supply recommendation candidates for a movie.
#[async_trait]
pub trait CandidateStage: Send + Sync {
    fn name(&self) -> &str;
    async fn candidates(&self, tmdb: &dyn TmdbApi, movie_id: u64) -> MetaResult<Vec<TmdbMovie>>;
}

pub struct RecommendedStage;

#[async_trait]
impl CandidateStage for RecommendedStage {
    fn name(&self) -> &str {
        "recommendations"
    }

    async fn candidates(&self, tmdb: &dyn TmdbApi, movie_id: u64) -> MetaResult<Vec<TmdbMovie>> {
        tmdb.recommendations(movie_id).await
    }
}

pub struct SimilarStage;

#[async_trait]
impl CandidateStage for SimilarStage {
    fn name(&self) -> &str {
        "similar"
    }

    async fn candidates(&self, tmdb: &dyn TmdbApi, movie_id: u64) -> MetaResult<Vec<TmdbMovie>> {
        tmdb.similar(movie_id).await
    }
}

/// Builds the recommendation list for a resolved movie.
///
/// Every upstream call is awaited in turn. In the worst case a single
/// invocation issues one search, two candidate listings, the genre table,
/// ten external-id lookups and one discover query.
pub struct RecommendationGatherer {
    tmdb: Arc<dyn TmdbApi>,
    stages: Vec<Box<dyn CandidateStage>>,
}

impl RecommendationGatherer {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        let stages: Vec<Box<dyn CandidateStage>> =
            vec![Box::new(RecommendedStage), Box::new(SimilarStage)];
        Self::with_stages(tmdb, stages)
    }

    pub fn with_stages(tmdb: Arc<dyn TmdbApi>, stages: Vec<Box<dyn CandidateStage>>) -> Self {
        Self { tmdb, stages }
    }

    /// An unknown title yields an empty list. Search and genre-table
    /// failures are returned; failures of the later stages only thin out
    /// the result.
    pub async fn gather(&self, title: &str) -> MetaResult<Vec<Recommendation>> {
        let Some(seed) = self.tmdb.search_movies(title, true).await?.into_iter().next() else {
            debug!(title = %title, "No TMDb match, no recommendations");
            return Ok(Vec::new());
        };

        let candidates = self.candidate_pool(seed.id).await;
        let genres = self.tmdb.genres().await?;

        let mut picked = self.pick_candidates(&candidates, &genres).await;
        if picked.len() < MIN_RECOMMENDATIONS {
            self.fill_from_popular(&mut picked, &genres).await;
        }

        picked.shuffle(&mut rand::thread_rng());
        picked.truncate(MAX_RECOMMENDATIONS);

        info!(
            title = %title,
            tmdb_id = seed.id,
            count = picked.len(),
            "Gathered recommendations"
        );
        Ok(picked)
    }

    /// Walk the stages until one yields enough entries. A non-empty stage
    /// replaces whatever an earlier stage produced.
    async fn candidate_pool(&self, movie_id: u64) -> Vec<TmdbMovie> {
        let mut pool = Vec::new();
        for stage in &self.stages {
            match stage.candidates(self.tmdb.as_ref(), movie_id).await {
                Ok(list) if !list.is_empty() => {
                    debug!(stage = stage.name(), count = list.len(), "Candidate stage");
                    pool = list;
                }
                Ok(_) => debug!(stage = stage.name(), "Candidate stage empty"),
                Err(e) => warn!(stage = stage.name(), "Candidate stage failed: {}", e),
            }
            if pool.len() >= MIN_RECOMMENDATIONS {
                break;
            }
        }
        pool
    }

    async fn pick_candidates(
        &self,
        candidates: &[TmdbMovie],
        genres: &GenreTable,
    ) -> Vec<Recommendation> {
        let mut picked = Vec::new();

        for movie in candidates.iter().take(MAX_CANDIDATES) {
            if movie.genre_ids.is_empty() {
                continue;
            }
            let names = genres.names(&movie.genre_ids);
            if !is_on_genre(&names) {
                continue;
            }

            let imdb_id = match self.tmdb.imdb_id(movie.id).await {
                Ok(id) => id,
                Err(e) => {
                    warn!(tmdb_id = movie.id, "External id lookup failed: {}", e);
                    None
                }
            };

            picked.push(self.recommendation(movie, names, imdb_id));
            if picked.len() >= MAX_RECOMMENDATIONS {
                break;
            }
        }

        picked
    }

    async fn fill_from_popular(&self, picked: &mut Vec<Recommendation>, genres: &GenreTable) {
        let popular = match self.tmdb.discover(&DiscoverQuery::popular_horror()).await {
            Ok(list) => list,
            Err(e) => {
                warn!("Popular horror lookup failed: {}", e);
                return;
            }
        };

        for movie in popular.iter().take(MAX_RECOMMENDATIONS) {
            if picked.len() >= MAX_RECOMMENDATIONS {
                break;
            }
            if picked.iter().any(|r| r.title == movie.title()) {
                continue;
            }
            let names = genres.names(&movie.genre_ids);
            picked.push(self.recommendation(movie, names, None));
        }
    }

    fn recommendation(
        &self,
        movie: &TmdbMovie,
        genres: Vec<String>,
        imdb_id: Option<String>,
    ) -> Recommendation {
        Recommendation {
            title: movie.title().to_string(),
            year: year_from_date(movie.release_date.as_deref()),
            plot: movie.overview.clone(),
            poster_url: self.tmdb.poster_url(movie.poster_path.as_deref()),
            genres,
            imdb_id,
            amazon_link: amazon_search_link(movie.title()),
            timestamp: chrono::Utc::now().timestamp().to_string(),
        }
    }
}

/// Horror-tagged, or tagged narrowly enough that it is unlikely to be
/// far off genre.
fn is_on_genre(genres: &[String]) -> bool {
    genres.iter().any(|g| g == HORROR_GENRE_NAME) || genres.len() <= MAX_GENRES_WITHOUT_HORROR
}
