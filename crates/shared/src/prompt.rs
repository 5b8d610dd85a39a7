use std::fmt::Write as _;

use crate::models::{FeedArticles, RunParameters};

pub const DEFAULT_MAX_LISTING_CHARS: usize = 100_000;

const NOTES_TEMPLATE: &str = "# Weekly Podcast Program Notes

## Topic 1: [Catchy Title]

[Brief summary]

Key points:
- [Point 1]
- [Point 2]
- [Point 3]

Related articles: [article numbers] from [feed names]

## Topic 2: [Catchy Title]
...and so on";

/// Prompt text plus how many articles had to be left out to fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub text: String,
    pub dropped: usize,
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    max_listing_chars: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            max_listing_chars: DEFAULT_MAX_LISTING_CHARS,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the article listing at `max` characters; oldest articles go first
    pub fn with_max_chars(max: usize) -> Self {
        Self {
            max_listing_chars: max,
        }
    }

    pub fn build(&self, groups: &[FeedArticles], params: &RunParameters) -> BuiltPrompt {
        let mut keep: Vec<Vec<bool>> = groups
            .iter()
            .map(|g| vec![true; g.articles.len()])
            .collect();

        let mut by_age: Vec<(usize, usize)> = groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| (0..group.articles.len()).map(move |i| (g, i)))
            .collect();
        by_age.sort_by_key(|&(g, i)| groups[g].articles[i].published);

        let mut listing = render_listing(groups, &keep);
        let mut dropped = 0;
        for (g, i) in by_age {
            if listing.chars().count() <= self.max_listing_chars {
                break;
            }
            keep[g][i] = false;
            dropped += 1;
            listing = render_listing(groups, &keep);
        }

        BuiltPrompt {
            text: render_prompt(&listing, params),
            dropped,
        }
    }
}

fn render_prompt(listing: &str, params: &RunParameters) -> String {
    format!(
        r#"Based on the articles provided, create program notes for a weekly podcast episode.
The notes should cover {topics} main topics from these articles.

Technical depth level: {depth}/5 (where 0 is non-technical and 5 is highly technical)

For each topic:
1. Create a catchy title
2. Write a brief summary (2-3 sentences)
3. Include key points for discussion (3-5 bullet points)
4. Mention the related articles by their article numbers and feed names

Here are the articles, grouped by feed:

{listing}
Format the response as:
{template}
"#,
        topics = params.topic_count(),
        depth = params.technical_depth(),
        listing = listing,
        template = NOTES_TEMPLATE,
    )
}

fn render_listing(groups: &[FeedArticles], keep: &[Vec<bool>]) -> String {
    let mut out = String::new();
    let mut number = 0;

    if groups.iter().all(|g| g.articles.is_empty()) {
        out.push_str("(No articles were published in the selected time period.)\n");
        return out;
    }

    for (group, kept) in groups.iter().zip(keep) {
        let _ = writeln!(out, "=== Feed: {} ===\n", group.feed_name);

        let mut any = false;
        for (article, _) in group.articles.iter().zip(kept).filter(|(_, k)| **k) {
            any = true;
            number += 1;
            let _ = writeln!(out, "Article {}:", number);
            let _ = writeln!(out, "Title: {}", article.title);
            let _ = writeln!(out, "Feed: {}", article.source_feed_name);
            let _ = writeln!(out, "Link: {}", article.link);
            let _ = writeln!(out, "Published: {}", article.published.to_rfc3339());
            let _ = writeln!(out, "Summary: {}\n", article.summary);
        }
        if !any {
            out.push_str("(No articles from this feed.)\n\n");
        }
    }

    out
}
