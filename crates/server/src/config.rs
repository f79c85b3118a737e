use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tmdb_client::DEFAULT_API_URL;

/// Value shipped in the sample `.env`; never a real key
pub const PLACEHOLDER_API_KEY: &str = "your_tmdb_api_key_here";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("TMDB_API_KEY (or VITE_TMDB_API_KEY) is not set")]
    MissingApiKey,

    #[error("TMDB_API_KEY is still the placeholder value; set a real key")]
    PlaceholderApiKey,
}

/// Server configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie database API key
    #[serde(default)]
    tmdb_api_key: Option<String>,

    /// Same key under the name the browser frontend uses
    #[serde(default)]
    vite_tmdb_api_key: Option<String>,

    /// Movie database API root
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the trained artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
}

fn default_tmdb_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_model_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::validated(envy::from_env::<Config>()?)
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::validated(envy::from_iter::<_, Config>(pairs)?)
    }

    fn validated(config: Config) -> Result<Self, ConfigError> {
        config.api_key()?;
        Ok(config)
    }

    /// The movie database key; `TMDB_API_KEY` wins over `VITE_TMDB_API_KEY`
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = self
            .tmdb_api_key
            .as_deref()
            .or(self.vite_tmdb_api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        if key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }
        Ok(key)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_pairs(pairs(&[("TMDB_API_KEY", "abc123")])).unwrap();

        assert_eq!(config.api_key().unwrap(), "abc123");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.model_dir, PathBuf::from("."));
    }

    #[test]
    fn test_vite_key_is_accepted() {
        let config = Config::from_pairs(pairs(&[("VITE_TMDB_API_KEY", "frontend-key")])).unwrap();
        assert_eq!(config.api_key().unwrap(), "frontend-key");
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = Config::from_pairs(pairs(&[("PORT", "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = Config::from_pairs(pairs(&[("TMDB_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_placeholder_key_is_fatal() {
        let err = Config::from_pairs(pairs(&[("TMDB_API_KEY", PLACEHOLDER_API_KEY)])).unwrap_err();
        assert!(matches!(err, ConfigError::PlaceholderApiKey));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_pairs(pairs(&[
            ("TMDB_API_KEY", "k"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MODEL_DIR", "/var/models"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.model_dir, PathBuf::from("/var/models"));
    }
}
