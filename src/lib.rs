pub mod config;
pub mod llm;
pub mod metadata;
pub mod middleware;
pub mod oracle;
pub mod server;
pub mod util;

use std::net::SocketAddr;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(String),
}

/// Load configuration: optional yaml file, then the environment on top.
pub fn load_config(config_path: Option<&str>) -> Result<config::Config, ServerError> {
    let mut config = match config_path {
        Some(path) => {
            info!("Using config file: {}", path);
            config::Config::from_file(path)?
        }
        None => config::Config::default(),
    };
    config.apply_env()?;
    Ok(config)
}

pub async fn run(config: config::Config) -> Result<(), ServerError> {
    log_credential_status(&config);

    let address = config.listen.address.as_deref().unwrap_or("0.0.0.0");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    info!("Serving static files from {}", config.get_appdir());

    let state = server::AppState::new(config.clone())?;
    let app = server::build_router(state);

    info!("Horror Oracle serving HTTP on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

fn log_credential_status(config: &config::Config) {
    let creds = &config.credentials;
    let keys = [
        ("OPENAI_API_KEY", creds.openai_api_key.is_some()),
        ("PINECONE_API_KEY", creds.pinecone_api_key.is_some()),
        ("OMDB_API_KEY", creds.omdb_api_key.is_some()),
        ("TMDB_API_KEY", creds.tmdb_api_key.is_some()),
    ];
    for (name, found) in keys {
        if found {
            info!("{}: FOUND", name);
        } else {
            warn!("{}: MISSING", name);
        }
    }

    let enabled = |on: bool| if on { "enabled" } else { "disabled" };
    info!(
        llm = enabled(creds.openai_api_key.is_some()),
        omdb = enabled(creds.omdb_api_key.is_some()),
        tmdb = enabled(creds.tmdb_api_key.is_some()),
        model = %config.llm.model,
        "Collaborators"
    );
    if creds.pinecone_api_key.is_some() {
        info!("Vector index credential present but no vector index is used");
    }
}
