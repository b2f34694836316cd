use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::favorites::FavoritesConfig;
use self::library::LibraryConfig;
use self::log::LogConfig;
use self::store::StoreConfig;
use self::suggestions::SuggestionConfig;
use self::translator::TranslatorConfig;

pub mod favorites;
pub mod library;
pub mod log;
pub mod store;
pub mod suggestions;
pub mod translator;

fn default_request_timeout_secs() -> u64 {
    15
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub translator: TranslatorConfig,
    pub suggestions: SuggestionConfig,
    pub library: LibraryConfig,
    pub favorites: FavoritesConfig,
    pub log: LogConfig,

    /// Timeout applied to every remote call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            translator: TranslatorConfig::default(),
            suggestions: SuggestionConfig::default(),
            library: LibraryConfig::default(),
            favorites: FavoritesConfig::default(),
            log: LogConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_secs);

        Config {
            store: StoreConfig::new(),
            translator: TranslatorConfig::new(),
            suggestions: SuggestionConfig::new(),
            library: LibraryConfig::new(),
            favorites: FavoritesConfig::new(),
            log: LogConfig::new(),

            request_timeout_secs,
        }
    }

    /// Load a JSON profile; missing fields fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid profile: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("main.json");
        std::fs::write(&path, r#"{"suggestions":{"limit":5},"log":{"json":true}}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.suggestions.limit, 5);
        assert_eq!(config.suggestions.debounce_ms, 300);
        assert_eq!(config.library.page_size, 25);
        assert!(config.log.json);
        assert_eq!(config.favorites.key, "favorites");
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_invalid_profile_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::from_json_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_profile_is_io_error() {
        let result = Config::from_json_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
