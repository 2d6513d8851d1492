use std::path::PathBuf;

use game_shelf_lib::ConfigSource;
use game_shelf_lib::settings;

use crate::error::SearchError;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "GAME_SHELF_API_URL";
/// Local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the search backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Provenance of each search setting.
#[derive(Debug)]
pub struct SearchConfigSources {
    pub base_url: ConfigSource,
    pub timeout_secs: ConfigSource,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SearchConfig {
    /// Load settings from the environment, the settings file, or defaults.
    ///
    /// Priority: env var > settings file > default.
    pub fn load() -> Result<Self, SearchError> {
        let (base_url, _) = pick_base_url(
            std::env::var(API_URL_ENV).ok(),
            settings::load_setting("search", "base_url"),
        );
        let timeout_secs = settings::load_integer_setting("search", "timeout_secs")
            .and_then(|t| u64::try_from(t).ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
        }
        .validated()
    }

    /// Apply a base URL given on the command line.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self, SearchError> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self, SearchError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            SearchError::Config(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "Base URL must use http or https: '{}'",
                self.base_url
            )));
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

fn pick_base_url(env_value: Option<String>, file_value: Option<String>) -> (String, ConfigSource) {
    if let Some(url) = env_value.filter(|v| !v.is_empty()) {
        return (url, ConfigSource::EnvVar(API_URL_ENV));
    }
    if let Some(url) = file_value {
        return (url, ConfigSource::ConfigFile);
    }
    (DEFAULT_BASE_URL.to_string(), ConfigSource::Default)
}

/// Determine where each search setting is coming from.
pub fn config_sources() -> SearchConfigSources {
    let (_, base_url) = pick_base_url(
        std::env::var(API_URL_ENV).ok(),
        settings::load_setting("search", "base_url"),
    );
    let timeout_secs = if settings::load_integer_setting("search", "timeout_secs").is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };
    SearchConfigSources {
        base_url,
        timeout_secs,
    }
}

/// Save (or clear) the backend base URL in the settings file.
pub fn save_base_url(url: Option<&str>) -> Result<PathBuf, SearchError> {
    if let Some(url) = url {
        SearchConfig::default().with_base_url(Some(url.to_string()))?;
    }
    Ok(settings::save_setting("search", "base_url", url)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_beats_settings_file() {
        let (url, source) = pick_base_url(
            Some("http://env.test".to_string()),
            Some("http://file.test".to_string()),
        );
        assert_eq!(url, "http://env.test");
        assert_eq!(source, ConfigSource::EnvVar(API_URL_ENV));
    }

    #[test]
    fn settings_file_beats_default() {
        let (url, source) = pick_base_url(None, Some("http://file.test".to_string()));
        assert_eq!(url, "http://file.test");
        assert_eq!(source, ConfigSource::ConfigFile);
    }

    #[test]
    fn default_base_url() {
        let (url, source) = pick_base_url(Some(String::new()), None);
        assert_eq!(url, DEFAULT_BASE_URL);
        assert_eq!(source, ConfigSource::Default);
    }

    #[test]
    fn override_trims_trailing_slash() {
        let config = SearchConfig::default()
            .with_base_url(Some("https://games.test/".to_string()))
            .unwrap();
        assert_eq!(config.base_url, "https://games.test");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            SearchConfig::default().with_base_url(Some("ftp://games.test".to_string())),
            Err(SearchError::Config(_))
        ));
        assert!(matches!(
            SearchConfig::default().with_base_url(Some("not a url".to_string())),
            Err(SearchError::Config(_))
        ));
    }
}
