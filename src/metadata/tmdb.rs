use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::model::*;
use super::source::{DiscoverQuery, TmdbApi, TmdbMovie};

const SOURCE: &str = "TMDb";

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    id: u32,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct MovieDetails {
    #[serde(default)]
    external_ids: ExternalIds,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalIds {
    #[serde(default)]
    imdb_id: Option<String>,
}

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    image_base: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        image_base: &str,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            image_base: image_base.to_string(),
            api_key,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> MetaResult<T> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(MetadataError::MissingCredential(SOURCE))?;

        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "TMDb request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", key)])
            .query(params)
            .send()
            .await
            .map_err(|e| MetadataError::Http(SOURCE, e))?;

        if !response.status().is_success() {
            return Err(MetadataError::Status(SOURCE, response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MetadataError::Http(SOURCE, e))
    }

    async fn listing(&self, path: &str, params: &[(&str, String)]) -> MetaResult<Vec<TmdbMovie>> {
        let page: Page = self.get_json(path, params).await?;
        Ok(page.results)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_movies(&self, query: &str, include_adult: bool) -> MetaResult<Vec<TmdbMovie>> {
        let mut params = vec![("query", query.to_string())];
        if include_adult {
            params.push(("include_adult", "true".to_string()));
        }
        self.listing("/search/movie", &params).await
    }

    async fn recommendations(&self, movie_id: u64) -> MetaResult<Vec<TmdbMovie>> {
        self.listing(&format!("/movie/{}/recommendations", movie_id), &[])
            .await
    }

    async fn similar(&self, movie_id: u64) -> MetaResult<Vec<TmdbMovie>> {
        self.listing(&format!("/movie/{}/similar", movie_id), &[]).await
    }

    async fn genres(&self) -> MetaResult<GenreTable> {
        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(GenreTable::new(
            list.genres.into_iter().map(|g| (g.id, g.name)),
        ))
    }

    async fn imdb_id(&self, movie_id: u64) -> MetaResult<Option<String>> {
        let details: MovieDetails = self
            .get_json(
                &format!("/movie/{}", movie_id),
                &[("append_to_response", "external_ids".to_string())],
            )
            .await?;
        Ok(details.external_ids.imdb_id.filter(|id| !id.is_empty()))
    }

    async fn discover(&self, query: &DiscoverQuery) -> MetaResult<Vec<TmdbMovie>> {
        self.listing("/discover/movie", &discover_params(query)).await
    }

    fn image_base(&self) -> &str {
        &self.image_base
    }
}

fn discover_params(query: &DiscoverQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("with_genres", query.genre_id.to_string()),
        ("sort_by", query.sort.as_str().to_string()),
        ("page", "1".to_string()),
    ];
    if let Some(from) = query.released_from {
        params.push(("primary_release_date.gte", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = query.released_to {
        params.push(("primary_release_date.lte", to.format("%Y-%m-%d").to_string()));
    }
    params
}
