use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::FeedSource;

pub const DEFAULT_FEEDS_FILE: &str = "rss_feeds.json";

/// Feed name to URL mapping, kept in the order the config file lists it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRegistry {
    feeds: Vec<FeedSource>,
}

impl FeedRegistry {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::Missing(path.to_path_buf()),
            _ => ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let registry = Self::from_json_str(&content)?;
        debug!("Loaded {} feeds from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Parse a registry from a JSON object string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject);
        };

        let feeds = map
            .into_iter()
            .map(|(name, url)| match url {
                Value::String(url) => Ok(FeedSource { name, url }),
                _ => Err(ConfigError::NonStringUrl(name)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { feeds })
    }

    /// Alphabetical by name when `ascending`, otherwise config order
    pub fn sorted_view(&self, ascending: bool) -> Vec<&FeedSource> {
        let mut view: Vec<&FeedSource> = self.feeds.iter().collect();
        if ascending {
            view.sort_by(|a, b| a.name.cmp(&b.name));
        }
        view
    }

    pub fn get(&self, name: &str) -> Option<&FeedSource> {
        self.feeds.iter().find(|feed| feed.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedSource> {
        self.feeds.iter()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn pairs(view: Vec<&FeedSource>) -> Vec<(&str, &str)> {
        view.into_iter()
            .map(|f| (f.name.as_str(), f.url.as_str()))
            .collect()
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"{
            "Hacker News": "https://news.ycombinator.com/rss",
            "Stacker News": "https://stacker.news/rss"
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let registry = FeedRegistry::load(temp_file.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("Stacker News").map(|f| f.url.as_str()),
            Some("https://stacker.news/rss")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = FeedRegistry::load("/nonexistent/path/rss_feeds.json");
        assert!(matches!(result, Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ not json").unwrap();

        let result = FeedRegistry::load(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_rejects_non_object() {
        let result = FeedRegistry::from_json_str(r#"["https://a.com/rss"]"#);
        assert!(matches!(result, Err(ConfigError::NotAnObject)));
    }

    #[test]
    fn test_rejects_non_string_url() {
        let result = FeedRegistry::from_json_str(r#"{"A": "https://a.com", "B": 42}"#);
        match result {
            Err(ConfigError::NonStringUrl(name)) => assert_eq!(name, "B"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_loads() {
        let registry = FeedRegistry::from_json_str("{}").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_sorted_view_ascending() {
        let registry = FeedRegistry::from_json_str(r#"{"B": "u2", "A": "u1"}"#).unwrap();
        assert_eq!(
            pairs(registry.sorted_view(true)),
            vec![("A", "u1"), ("B", "u2")]
        );
    }

    #[test]
    fn test_sorted_view_keeps_insertion_order() {
        let registry = FeedRegistry::from_json_str(r#"{"B": "u2", "A": "u1"}"#).unwrap();
        assert_eq!(
            pairs(registry.sorted_view(false)),
            vec![("B", "u2"), ("A", "u1")]
        );
        // The registry itself is untouched by a sorted view
        let _ = registry.sorted_view(true);
        assert_eq!(registry.iter().next().map(|f| f.name.as_str()), Some("B"));
    }
}
