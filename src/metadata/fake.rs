//! In-memory providers for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::model::*;
use super::source::*;

#[derive(Default)]
pub struct FakeOmdb {
    pub movies: HashMap<String, OmdbMovie>,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeOmdb {
    pub fn with_movie(mut self, movie: OmdbMovie) -> Self {
        let key = movie.title.clone().unwrap_or_default().to_lowercase();
        self.movies.insert(key, movie);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl OmdbApi for FakeOmdb {
    async fn find_by_title(&self, title: &str) -> MetaResult<Option<OmdbMovie>> {
        self.calls.lock().unwrap().push(title.to_string());
        if self.fail {
            return Err(MetadataError::Status("OMDb", 503));
        }
        Ok(self.movies.get(&title.to_lowercase()).cloned())
    }
}

#[derive(Default)]
pub struct FakeTmdb {
    pub search: HashMap<String, Vec<TmdbMovie>>,
    pub recommendations: HashMap<u64, Vec<TmdbMovie>>,
    pub similar: HashMap<u64, Vec<TmdbMovie>>,
    pub popular: Vec<TmdbMovie>,
    pub recent: Vec<TmdbMovie>,
    pub genres: Vec<(u32, String)>,
    pub imdb_ids: HashMap<u64, String>,
    pub fail_search: bool,
    pub fail_recommendations: bool,
    pub fail_similar: bool,
    pub fail_genres: bool,
    pub fail_discover: bool,
    pub calls: Mutex<Vec<String>>,
    pub discover_queries: Mutex<Vec<DiscoverQuery>>,
}

impl FakeTmdb {
    pub fn standard_genres() -> Vec<(u32, String)> {
        vec![
            (27, "Horror".to_string()),
            (53, "Thriller".to_string()),
            (9648, "Mystery".to_string()),
            (35, "Comedy".to_string()),
            (18, "Drama".to_string()),
            (10749, "Romance".to_string()),
        ]
    }

    pub fn new() -> Self {
        Self {
            genres: Self::standard_genres(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn tmdb_movie(id: u64, title: &str, date: &str, genre_ids: &[u32]) -> TmdbMovie {
    TmdbMovie {
        id,
        title: Some(title.to_string()),
        release_date: Some(date.to_string()),
        overview: Some(format!("{} overview", title)),
        poster_path: Some(format!("/{}.jpg", id)),
        genre_ids: genre_ids.to_vec(),
    }
}

#[async_trait]
impl TmdbApi for FakeTmdb {
    async fn search_movies(&self, query: &str, _include_adult: bool) -> MetaResult<Vec<TmdbMovie>> {
        self.record(format!("search:{}", query));
        if self.fail_search {
            return Err(MetadataError::Status("TMDb", 500));
        }
        Ok(self.search.get(&query.to_lowercase()).cloned().unwrap_or_default())
    }

    async fn recommendations(&self, movie_id: u64) -> MetaResult<Vec<TmdbMovie>> {
        self.record(format!("recommendations:{}", movie_id));
        if self.fail_recommendations {
            return Err(MetadataError::Status("TMDb", 500));
        }
        Ok(self.recommendations.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn similar(&self, movie_id: u64) -> MetaResult<Vec<TmdbMovie>> {
        self.record(format!("similar:{}", movie_id));
        if self.fail_similar {
            return Err(MetadataError::Status("TMDb", 500));
        }
        Ok(self.similar.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn genres(&self) -> MetaResult<GenreTable> {
        self.record("genres".to_string());
        if self.fail_genres {
            return Err(MetadataError::Status("TMDb", 500));
        }
        Ok(GenreTable::new(self.genres.clone()))
    }

    async fn imdb_id(&self, movie_id: u64) -> MetaResult<Option<String>> {
        self.record(format!("imdb:{}", movie_id));
        Ok(self.imdb_ids.get(&movie_id).cloned())
    }

    async fn discover(&self, query: &DiscoverQuery) -> MetaResult<Vec<TmdbMovie>> {
        self.record("discover".to_string());
        self.discover_queries.lock().unwrap().push(query.clone());
        if self.fail_discover {
            return Err(MetadataError::Status("TMDb", 502));
        }
        match query.sort {
            DiscoverSort::PopularityDesc => Ok(self.popular.clone()),
            DiscoverSort::ReleaseDateDesc => Ok(self.recent.clone()),
        }
    }
}
