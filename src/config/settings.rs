//! Configuration settings for Titt.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub github: GithubSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API v3 key. Not validated at startup; missing keys
    /// surface as upstream authentication failures.
    pub api_key: Option<String>,
    /// Data API base URL.
    pub api_url: String,
    /// Per-channel Atom upload feed base URL.
    pub feed_url: String,
    /// Caption language priority, first available wins.
    pub caption_languages: Vec<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://www.googleapis.com/youtube/v3".to_string(),
            feed_url: "https://www.youtube.com/feeds/videos.xml".to_string(),
            caption_languages: vec!["ko".to_string(), "en".to_string()],
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    /// Personal access token for the account all operations are scoped to.
    pub token: Option<String>,
    /// REST API base URL.
    pub api_url: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.github.com".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file, with environment
    /// overrides applied.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// `YOUTUBE_API_KEY` and `GITHUB_TOKEN` environment variables take
    /// precedence over anything in the file.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            Settings::default()
        };

        if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
            if !key.is_empty() {
                settings.youtube.api_key = Some(key);
            }
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                settings.github.token = Some(token);
            }
        }

        Ok(settings)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("titt")
            .join("config.toml")
    }

    /// The GitHub token, or a fatal configuration error.
    ///
    /// Checked once before the server loop starts; GitHub operations cannot
    /// run without it.
    pub fn require_github_token(&self) -> crate::error::Result<String> {
        match &self.github.token {
            Some(t) if !t.is_empty() => Ok(t.clone()),
            _ => Err(crate::error::TittError::Config(
                "GITHUB_TOKEN not set. Export it or add it to config.toml.".to_string(),
            )),
        }
    }

    /// The YouTube API key, defaulting to empty when unset.
    ///
    /// Deliberately not an error: the Data API rejects the request itself,
    /// which the search tool degrades into an empty result.
    pub fn youtube_api_key(&self) -> String {
        self.youtube.api_key.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.youtube.api_url, "https://www.googleapis.com/youtube/v3");
        assert_eq!(settings.youtube.feed_url, "https://www.youtube.com/feeds/videos.xml");
        assert_eq!(settings.youtube.caption_languages, vec!["ko", "en"]);
        assert_eq!(settings.github.api_url, "https://api.github.com");
        assert!(settings.github.token.is_none());
    }

    #[test]
    fn test_require_github_token_missing() {
        let settings = Settings::default();
        assert!(settings.require_github_token().is_err());

        let mut with_token = Settings::default();
        with_token.github.token = Some("ghp_test".to_string());
        assert_eq!(with_token.require_github_token().unwrap(), "ghp_test");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [youtube]
            api_key = "yt-key"

            [github]
            token = "gh-token"
        "#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.youtube.api_key.as_deref(), Some("yt-key"));
        assert_eq!(settings.github.token.as_deref(), Some("gh-token"));
        // Unspecified sections keep their defaults
        assert_eq!(settings.general.log_level, "info");
    }
}
