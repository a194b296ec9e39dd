use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::model::*;
use super::source::{OmdbApi, OmdbMovie};

const SOURCE: &str = "OMDb";

#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(flatten)]
    movie: OmdbMovie,
}

pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl OmdbApi for OmdbClient {
    async fn find_by_title(&self, title: &str) -> MetaResult<Option<OmdbMovie>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(MetadataError::MissingCredential(SOURCE))?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", key), ("plot", "full")])
            .send()
            .await
            .map_err(|e| MetadataError::Http(SOURCE, e))?;

        if !response.status().is_success() {
            return Err(MetadataError::Status(SOURCE, response.status().as_u16()));
        }

        let envelope: OmdbEnvelope = response
            .json()
            .await
            .map_err(|e| MetadataError::Http(SOURCE, e))?;

        if envelope.response != "True" {
            debug!(
                title = %title,
                reason = envelope.error.as_deref().unwrap_or("unknown"),
                "OMDb has no match"
            );
            return Ok(None);
        }

        Ok(Some(envelope.movie))
    }
}

/// OMDb fills unknown fields with "N/A".
pub fn omdb_value(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "N/A")
        .map(|v| v.to_string())
}

pub fn split_genres(genre: Option<&str>) -> Vec<String> {
    omdb_value(genre)
        .map(|g| {
            g.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

impl From<OmdbMovie> for MovieRecord {
    fn from(movie: OmdbMovie) -> Self {
        MovieRecord {
            title: movie.title.unwrap_or_default(),
            year: omdb_value(movie.year.as_deref()).unwrap_or_else(|| "N/A".to_string()),
            director: omdb_value(movie.director.as_deref()),
            plot: omdb_value(movie.plot.as_deref()),
            poster: omdb_value(movie.poster.as_deref()),
            imdb_id: omdb_value(movie.imdb_id.as_deref()),
            genres: split_genres(movie.genre.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hit() {
        let json = r#"{
            "Title": "Halloween", "Year": "1978", "Director": "John Carpenter",
            "Plot": "Fifteen years after murdering his sister...",
            "Poster": "https://m.media-amazon.com/halloween.jpg",
            "imdbID": "tt0077651", "Genre": "Horror, Thriller", "Response": "True"
        }"#;
        let envelope: OmdbEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.response, "True");

        let record = MovieRecord::from(envelope.movie);
        assert_eq!(record.title, "Halloween");
        assert_eq!(record.director.as_deref(), Some("John Carpenter"));
        assert_eq!(record.imdb_id.as_deref(), Some("tt0077651"));
        assert_eq!(record.genres, vec!["Horror", "Thriller"]);
    }

    #[test]
    fn test_parse_miss() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let envelope: OmdbEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.response, "False");
        assert_eq!(envelope.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_not_available_fields() {
        let movie = OmdbMovie {
            title: Some("Obscure".to_string()),
            year: Some("1999".to_string()),
            director: Some("N/A".to_string()),
            poster: Some("N/A".to_string()),
            genre: Some("N/A".to_string()),
            ..Default::default()
        };
        let record = MovieRecord::from(movie);
        assert_eq!(record.director, None);
        assert_eq!(record.poster, None);
        assert!(record.genres.is_empty());
    }
}
