use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metadata::{Recommendation, ReleaseEntry};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// Answer for a query that resolved to a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieAnswer {
    pub movie_title: String,
    pub summary: String,
    pub interesting_fact: String,
    pub recommendations: Vec<Recommendation>,
    pub amazon_link: String,
    pub ebay_link: String,
    pub imdb_id: String,
    pub year: String,
    pub director: String,
    pub poster: String,
    pub request_id: String,
    pub timestamp: i64,
}

/// Answer from the conversational persona, no movie attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralAnswer {
    pub summary: String,
    pub interesting_fact: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub request_id: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub buy: String,
    pub rent: String,
    pub stream: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasesResponse {
    pub releases: Vec<ReleaseEntry>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub timestamp: f64,
    pub api_keys: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
