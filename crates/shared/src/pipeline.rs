use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::error::{FetchError, NotesError};
use crate::feeds::FeedRegistry;
use crate::fetcher::FeedFetcher;
use crate::filter::filter_recent;
use crate::models::{FeedArticles, RunParameters};
use crate::prompt::PromptBuilder;
use crate::summarizer::NotesGenerator;

/// Recent articles per feed, plus the feeds that could not be loaded
#[derive(Debug, Default)]
pub struct Gathered {
    pub groups: Vec<FeedArticles>,
    pub failed: Vec<(String, FetchError)>,
}

impl Gathered {
    pub fn article_count(&self) -> usize {
        self.groups.iter().map(|g| g.articles.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedNotes {
    pub text: String,
    pub article_count: usize,
    pub dropped: usize,
    pub failed_feeds: Vec<String>,
}

/// Fetch each selected feed in turn and keep what falls inside the window.
///
/// A feed that fails is logged and recorded in `failed`; the rest still run.
pub async fn gather_articles(
    fetcher: &dyn FeedFetcher,
    registry: &FeedRegistry,
    params: &RunParameters,
    now: DateTime<Utc>,
) -> Gathered {
    let mut gathered = Gathered::default();

    for name in params.selected_feed_names() {
        let Some(feed) = registry.get(name) else {
            warn!("Feed '{}' is not in the feed config, skipping", name);
            continue;
        };

        match fetcher.fetch(feed).await {
            Ok(articles) => {
                let total = articles.len();
                let recent = filter_recent(articles, params.weeks_back(), now);
                info!(
                    "'{}': {} of {} entries from the past {} week(s)",
                    feed.name,
                    recent.len(),
                    total,
                    params.weeks_back()
                );
                gathered.groups.push(FeedArticles::new(&feed.name, recent));
            }
            Err(e) => {
                error!("Failed to fetch feed '{}': {}", feed.name, e);
                gathered.failed.push((feed.name.clone(), e));
            }
        }
    }

    gathered
}

/// Gather, build the prompt and generate notes. Nothing is written to disk.
pub async fn generate_notes(
    fetcher: &dyn FeedFetcher,
    generator: &dyn NotesGenerator,
    builder: &PromptBuilder,
    registry: &FeedRegistry,
    params: &RunParameters,
    now: DateTime<Utc>,
) -> Result<GeneratedNotes, NotesError> {
    let gathered = gather_articles(fetcher, registry, params, now).await;

    if gathered.groups.is_empty() {
        return Err(NotesError::AllFeedsFailed(params.selected_feed_names().len()));
    }

    let article_count = gathered.article_count();
    if article_count == 0 {
        warn!(
            "No articles from the past {} week(s); notes will have little to work with",
            params.weeks_back()
        );
    }

    let prompt = builder.build(&gathered.groups, params);
    if prompt.dropped > 0 {
        warn!(
            "Prompt too long, left out the {} oldest of {} articles",
            prompt.dropped, article_count
        );
    }

    let text = generator.generate(&prompt.text).await?;

    Ok(GeneratedNotes {
        text,
        article_count: article_count - prompt.dropped,
        dropped: prompt.dropped,
        failed_feeds: gathered.failed.into_iter().map(|(name, _)| name).collect(),
    })
}
