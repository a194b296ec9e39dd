use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::llm::{ChatModel, FactGenerator, GeneralResponder, OpenAiClient};
use crate::metadata::{
    MovieResolver, OmdbApi, OmdbClient, RecommendationGatherer, ReleaseFeed, TmdbApi, TmdbClient,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<MovieResolver>,
    pub gatherer: Arc<RecommendationGatherer>,
    pub facts: Arc<FactGenerator>,
    pub responder: Arc<GeneralResponder>,
    pub releases: Arc<ReleaseFeed>,
}

impl AppState {
    /// Wire up the real OMDb, TMDb and OpenAI clients.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("horror-oracle/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let creds = &config.credentials;
        let omdb: Arc<dyn OmdbApi> = Arc::new(OmdbClient::new(
            http.clone(),
            &config.omdb.base_url,
            creds.omdb_api_key.clone(),
        ));
        let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::new(
            http.clone(),
            &config.tmdb.base_url,
            &config.tmdb.image_base,
            creds.tmdb_api_key.clone(),
        ));
        let llm = creds.openai_api_key.clone().map(|key| {
            Arc::new(OpenAiClient::new(http, &config.llm.base_url, &config.llm.model, key))
                as Arc<dyn ChatModel>
        });

        Ok(Self::from_parts(config, omdb, tmdb, llm))
    }

    pub fn from_parts(
        config: Config,
        omdb: Arc<dyn OmdbApi>,
        tmdb: Arc<dyn TmdbApi>,
        llm: Option<Arc<dyn ChatModel>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Arc::new(MovieResolver::new(omdb, tmdb.clone())),
            gatherer: Arc::new(RecommendationGatherer::new(tmdb.clone())),
            facts: Arc::new(FactGenerator::new(llm.clone())),
            responder: Arc::new(GeneralResponder::new(llm)),
            releases: Arc::new(ReleaseFeed::new(tmdb)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let appdir = PathBuf::from(state.config.get_appdir());

    let api_routes = Router::new()
        .route("/ask-oracle", post(crate::oracle::ask_oracle))
        .route("/price-compare", post(crate::oracle::price_compare))
        .route("/recent-releases", get(crate::oracle::recent_releases))
        .route("/debug", get(crate::oracle::debug_info));

    Router::new()
        .route_service("/", ServeFile::new(appdir.join("index.html")))
        .merge(api_routes)
        .fallback_service(ServeDir::new(&appdir))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        // Outside the CORS layer so preflight answers get the headers too.
        .layer(CorsLayer::very_permissive())
        .layer(axum::middleware::from_fn(crate::middleware::no_store))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

