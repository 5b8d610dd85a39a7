//! Error types for each stage of a notes run.
//!
//! - `ConfigError`: feed config or credentials are unusable (fatal, pre-flight)
//! - `FetchError`: one feed could not be fetched or parsed (skipped)
//! - `ValidationError`: user input out of range (re-prompt)
//! - `GenerationError`: the LLM call failed (fatal, nothing written)
//! - `OutputError`: the notes file could not be written (fatal)
//! - `NotesError`: every feed failed, or generation failed

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Feed config not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read feed config {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed config is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Feed config must be a JSON object of feed name to URL")]
    NotAnObject,

    #[error("Feed '{0}' must map to a URL string")]
    NonStringUrl(String),

    #[error("Feed config contains no feeds")]
    NoFeeds,

    #[error(
        "{0} not found.\n\n\
        Set it as an environment variable or add it to ~/.config/podcast-notes/.env"
    )]
    MissingCredential(&'static str),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Feed server returned {0}")]
    Status(StatusCode),

    #[error("Failed to parse feed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a value.")]
    Empty,

    #[error("'{0}' is not a number.")]
    NotANumber(String),

    #[error("Please enter a number between {min} and {max}.")]
    OutOfRange { value: i64, min: u8, max: u8 },

    #[error("There is no feed number {0}.")]
    UnknownFeed(usize),

    #[error("'{0}' is not a feed name in the config.")]
    UnknownFeedName(String),

    #[error("Select at least one feed.")]
    NoFeedsSelected,

    #[error("Please answer y or n.")]
    NotYesOrNo(String),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to send request to Claude API: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Claude API rejected the API key: {0}")]
    Unauthorized(String),

    #[error("Claude API rate limit hit: {0}")]
    RateLimited(String),

    #[error("Claude API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("Failed to parse Claude API response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write notes file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures that end a run after the parameters were collected
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("All {0} selected feeds failed to load")]
    AllFeedsFailed(usize),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
