// Public modules
pub mod config;
pub mod error;
pub mod feeds;
pub mod fetcher;
pub mod filter;
pub mod interactive;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod selection;
pub mod summarizer;

// Re-export commonly used types
pub use config::Config;
pub use error::{
    ConfigError, FetchError, GenerationError, NotesError, OutputError, ValidationError,
};
pub use feeds::FeedRegistry;
pub use fetcher::{FeedFetcher, HttpFeedFetcher};
pub use filter::filter_recent;
pub use interactive::Prompter;
pub use io::{notes_label, NotesWriter};
pub use models::{Article, FeedArticles, FeedSource, RunParameters};
pub use pipeline::{gather_articles, generate_notes, GeneratedNotes};
pub use prompt::{BuiltPrompt, PromptBuilder};
pub use summarizer::{ClaudeNotesGenerator, NotesGenerator};
