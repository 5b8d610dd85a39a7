use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::feeds::DEFAULT_FEEDS_FILE;
use crate::summarizer::DEFAULT_MODEL;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub feeds_path: PathBuf,
    pub output_dir: PathBuf,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential("ANTHROPIC_API_KEY"))?;

        Ok(Self::with_overrides(
            anthropic_api_key,
            env::var("PODCAST_NOTES_FEEDS").ok(),
            env::var("PODCAST_NOTES_OUTPUT_DIR").ok(),
            env::var("ANTHROPIC_MODEL").ok(),
        ))
    }

    /// Build a config from explicit values, falling back to the defaults
    pub fn with_overrides(
        anthropic_api_key: String,
        feeds_path: Option<String>,
        output_dir: Option<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            anthropic_api_key,
            feeds_path: PathBuf::from(feeds_path.unwrap_or_else(|| DEFAULT_FEEDS_FILE.to_string())),
            output_dir: PathBuf::from(output_dir.unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn try_load_dotenv() {
        // 1. Current directory
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/podcast-notes/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("podcast-notes").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_overrides("key".to_string(), None, None, None);

        assert_eq!(config.anthropic_api_key, "key");
        assert_eq!(config.feeds_path, PathBuf::from("rss_feeds.json"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_overrides() {
        let config = Config::with_overrides(
            "key".to_string(),
            Some("/etc/feeds.json".to_string()),
            Some("/tmp/notes".to_string()),
            Some("claude-sonnet-4-5".to_string()),
        );

        assert_eq!(config.feeds_path, PathBuf::from("/etc/feeds.json"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.model, "claude-sonnet-4-5");
    }
}
