use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, warn};

use super::error::ApiError;
use super::intent::{classify, Intent};
use super::pricing::price_comparison;
use super::types::*;
use crate::metadata::releases::DEFAULT_RELEASE_LIMIT;
use crate::metadata::MovieRecord;
use crate::server::AppState;
use crate::util::{amazon_search_link, ebay_search_link};

pub async fn ask_oracle(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Response, ApiError> {
    let query = req.query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query is required".to_string()));
    }

    let request_id = uuid::Uuid::new_v4().to_string();

    let movie = match classify(query) {
        Intent::MovieLookup(guess) => {
            debug!(
                request_id = %request_id,
                title = %guess.title,
                confidence = ?guess.confidence,
                "Query looks like a movie"
            );
            state.resolver.resolve(&guess.title).await
        }
        Intent::General => None,
    };

    match movie {
        Some(movie) => Ok(Json(movie_answer(&state, movie, request_id).await).into_response()),
        None => {
            if !state.responder.is_available() {
                return Err(ApiError::OracleUnavailable);
            }
            let summary = state.responder.respond(query).await.map_err(|e| {
                error!(request_id = %request_id, "Error generating response: {}", e);
                ApiError::from(e)
            })?;
            Ok(Json(GeneralAnswer {
                summary,
                interesting_fact: None,
                recommendations: Vec::new(),
                request_id,
                timestamp: chrono::Utc::now().timestamp(),
            })
            .into_response())
        }
    }
}

async fn movie_answer(state: &AppState, movie: MovieRecord, request_id: String) -> MovieAnswer {
    let recommendations = match state.gatherer.gather(&movie.title).await {
        Ok(recs) => recs,
        Err(e) => {
            warn!(request_id = %request_id, title = %movie.title, "Recommendations failed: {}", e);
            Vec::new()
        }
    };

    let interesting_fact = state.facts.interesting_fact(&movie.title).await;

    MovieAnswer {
        summary: movie_summary(&movie),
        interesting_fact,
        recommendations,
        amazon_link: amazon_search_link(&movie.title),
        ebay_link: ebay_search_link(&movie.title),
        imdb_id: movie.imdb_id.unwrap_or_default(),
        year: movie.year,
        director: movie.director.unwrap_or_default(),
        poster: movie.poster.unwrap_or_default(),
        movie_title: movie.title,
        request_id,
        timestamp: chrono::Utc::now().timestamp(),
    }
}

/// Markdown blurb shown at the top of a movie answer.
pub fn movie_summary(movie: &MovieRecord) -> String {
    let mut summary = format!("🎬 **{}** ({})", movie.title, movie.year);
    if let Some(director) = &movie.director {
        summary.push_str(&format!("\n\nDirected by {}", director));
    }
    if let Some(plot) = &movie.plot {
        summary.push_str(&format!("\n\n{}", plot));
    }
    summary
}

pub async fn price_compare(Json(req): Json<PriceRequest>) -> Result<Json<PriceComparison>, ApiError> {
    let imdb_id = req.imdb_id.unwrap_or_default();
    if imdb_id.trim().is_empty() {
        return Err(ApiError::BadRequest("IMDb ID is required".to_string()));
    }
    Ok(Json(price_comparison(imdb_id.trim())))
}

pub async fn recent_releases(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ReleasesResponse>, ApiError> {
    let limit = params
        .get("limit")
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_RELEASE_LIMIT);

    let releases = state.releases.recent(limit).await.map_err(|e| {
        error!(limit = limit, "Recent releases failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(ReleasesResponse {
        releases,
        timestamp: chrono::Utc::now().timestamp(),
    }))
}

pub async fn debug_info(State(state): State<AppState>) -> Json<DebugInfo> {
    let creds = &state.config.credentials;
    let mut api_keys = BTreeMap::new();
    api_keys.insert("OPENAI_API_KEY".to_string(), creds.openai_api_key.is_some());
    api_keys.insert("PINECONE_API_KEY".to_string(), creds.pinecone_api_key.is_some());
    api_keys.insert("OMDB_API_KEY".to_string(), creds.omdb_api_key.is_some());
    api_keys.insert("TMDB_API_KEY".to_string(), creds.tmdb_api_key.is_some());

    Json(DebugInfo {
        timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        api_keys,
    })
}
