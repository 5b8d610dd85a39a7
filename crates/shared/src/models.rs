use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const WEEKS_BACK_RANGE: (u8, u8) = (1, 4);
pub const TOPIC_COUNT_RANGE: (u8, u8) = (1, 5);
pub const TECHNICAL_DEPTH_RANGE: (u8, u8) = (0, 5);

/// One named feed from the feed config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A dated feed entry, tagged with the feed it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
    pub summary: String,
    pub source_feed_name: String,
}

/// Articles from a single feed, in feed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedArticles {
    pub feed_name: String,
    pub articles: Vec<Article>,
}

impl FeedArticles {
    pub fn new(feed_name: impl Into<String>, articles: Vec<Article>) -> Self {
        Self {
            feed_name: feed_name.into(),
            articles,
        }
    }
}

/// User choices for one run. Only constructible with in-range values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    selected_feed_names: Vec<String>,
    weeks_back: u8,
    topic_count: u8,
    technical_depth: u8,
}

impl RunParameters {
    pub fn new(
        selected_feed_names: Vec<String>,
        weeks_back: u8,
        topic_count: u8,
        technical_depth: u8,
    ) -> Result<Self, ValidationError> {
        check_range(weeks_back, WEEKS_BACK_RANGE)?;
        check_range(topic_count, TOPIC_COUNT_RANGE)?;
        check_range(technical_depth, TECHNICAL_DEPTH_RANGE)?;

        let mut names: Vec<String> = Vec::with_capacity(selected_feed_names.len());
        for name in selected_feed_names {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        if names.is_empty() {
            return Err(ValidationError::NoFeedsSelected);
        }

        Ok(Self {
            selected_feed_names: names,
            weeks_back,
            topic_count,
            technical_depth,
        })
    }

    pub fn selected_feed_names(&self) -> &[String] {
        &self.selected_feed_names
    }

    pub fn weeks_back(&self) -> u8 {
        self.weeks_back
    }

    pub fn topic_count(&self) -> u8 {
        self.topic_count
    }

    pub fn technical_depth(&self) -> u8 {
        self.technical_depth
    }
}

pub(crate) fn check_range(value: u8, (min, max): (u8, u8)) -> Result<u8, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            value: value as i64,
            min,
            max,
        });
    }
    Ok(value)
}
