use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

/// API keys. Usually left out of the config file and supplied through the
/// environment instead.
#[derive(Clone, Deserialize, Serialize, Default)]
pub struct Credentials {
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub pinecone_api_key: Option<String>,
    #[serde(default)]
    pub omdb_api_key: Option<String>,
    #[serde(default)]
    pub tmdb_api_key: Option<String>,
}

// Keys must never end up in the logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &present(&self.openai_api_key))
            .field("pinecone_api_key", &present(&self.pinecone_api_key))
            .field("omdb_api_key", &present(&self.omdb_api_key))
            .field("tmdb_api_key", &present(&self.tmdb_api_key))
            .finish()
    }
}

fn present(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "FOUND"
    } else {
        "MISSING"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(alias = "imagebase", rename = "image_base")]
    #[serde(default = "default_tmdb_image_base")]
    pub image_base: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            image_base: default_tmdb_image_base(),
        }
    }
}

fn default_port() -> String {
    "10000".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_omdb_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`. Empty values count as unset.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.credentials.openai_api_key = Some(key);
        }
        if let Some(key) = get("PINECONE_API_KEY") {
            self.credentials.pinecone_api_key = Some(key);
        }
        if let Some(key) = get("OMDB_API_KEY") {
            self.credentials.omdb_api_key = Some(key);
        }
        if let Some(key) = get("TMDB_API_KEY") {
            self.credentials.tmdb_api_key = Some(key);
        }
        if let Some(port) = get("PORT") {
            port.parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string(), port.clone()))?;
            self.listen.port = port;
        }

        // Treat "key: ''" in the yaml file the same as a missing key.
        for key in [
            &mut self.credentials.openai_api_key,
            &mut self.credentials.pinecone_api_key,
            &mut self.credentials.omdb_api_key,
            &mut self.credentials.tmdb_api_key,
        ] {
            if key.as_deref().map_or(false, |k| k.trim().is_empty()) {
                *key = None;
            }
        }

        Ok(())
    }

    pub fn get_appdir(&self) -> &str {
        self.appdir.as_deref().unwrap_or("static")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen.port, "10000");
        assert_eq!(config.get_appdir(), "static");
        assert_eq!(config.llm.model, "gpt-4-turbo-preview");
        assert!(config.credentials.tmdb_api_key.is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
listen:
  address: 127.0.0.1
appdir: /srv/oracle
tmdb:
  imagebase: https://img.example/w300
credentials:
  tmdb_api_key: abc
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "10000");
        assert_eq!(config.get_appdir(), "/srv/oracle");
        assert_eq!(config.tmdb.image_base, "https://img.example/w300");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.credentials.tmdb_api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("OMDB_API_KEY", ""),
            ("PORT", "8080"),
        ]);
        let mut config = Config::default();
        config.credentials.omdb_api_key = Some("from-file".to_string());
        config.credentials.tmdb_api_key = Some("".to_string());
        config.apply_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.credentials.openai_api_key.as_deref(), Some("sk-1"));
        assert_eq!(config.credentials.omdb_api_key.as_deref(), Some("from-file"));
        assert!(config.credentials.tmdb_api_key.is_none());
        assert!(config.credentials.pinecone_api_key.is_none());
        assert_eq!(config.listen.port, "8080");
    }

    #[test]
    fn test_bad_port() {
        let env = vars(&[("PORT", "http")]);
        let mut config = Config::default();
        assert!(config.apply_vars(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let mut config = Config::default();
        config.credentials.openai_api_key = Some("sk-secret".to_string());
        let out = format!("{:?}", config);
        assert!(!out.contains("sk-secret"));
        assert!(out.contains("FOUND"));
    }
}
