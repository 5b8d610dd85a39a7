use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::models::{Article, FeedSource};

const SUMMARY_MAX_CHARS: usize = 500;

/// Retrieves one feed and turns its entries into articles
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, feed: &FeedSource) -> Result<Vec<Article>, FetchError>;
}

pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; PodcastNotes/1.0)")
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, feed: &FeedSource) -> Result<Vec<Article>, FetchError> {
        info!("Fetching feed: {} ({})", feed.name, feed.url);

        let response = self.client.get(&feed.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        debug!("Read {} bytes from {}", bytes.len(), feed.url);

        let articles = parse_feed(&feed.name, &bytes)?;
        info!("Found {} entries in '{}'", articles.len(), feed.name);
        Ok(articles)
    }
}

/// Parse an RSS or Atom document. Entries with no date are skipped.
pub fn parse_feed(feed_name: &str, bytes: &[u8]) -> Result<Vec<Article>, FetchError> {
    let parsed = parser::parse(bytes)?;

    let mut articles = Vec::with_capacity(parsed.entries.len());
    for entry in parsed.entries {
        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_else(|| "Untitled".to_string());

        let Some(published) = entry_date(&entry) else {
            warn!("Skipping entry without a date in '{}': {}", feed_name, title);
            continue;
        };

        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        articles.push(Article {
            title,
            link,
            published,
            summary: entry_summary(&entry),
            source_feed_name: feed_name.to_string(),
        });
    }

    Ok(articles)
}

fn entry_date(entry: &Entry) -> Option<DateTime<Utc>> {
    entry.published.or(entry.updated)
}

fn entry_summary(entry: &Entry) -> String {
    let html = entry
        .summary
        .as_ref()
        .map(|s| s.content.as_str())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()))
        .unwrap_or("");

    if html.trim().is_empty() {
        return String::new();
    }

    let text = html2text::from_read(html.as_bytes(), 120);
    truncate_chars(&collapse_whitespace(&text), SUMMARY_MAX_CHARS)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to at most `max` characters, marking the cut with "..."
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <rss version="2.0">
            <channel>
                <title>Example</title>
                <link>https://example.com</link>
                <description>Example feed</description>
                <item>
                    <title>First story</title>
                    <link>https://example.com/1</link>
                    <pubDate>Mon, 05 Oct 2026 10:00:00 GMT</pubDate>
                    <description>&lt;p&gt;Plain &lt;b&gt;bold&lt;/b&gt; text&lt;/p&gt;</description>
                </item>
                <item>
                    <title>Undated story</title>
                    <link>https://example.com/2</link>
                </item>
                <item>
                    <title>No summary</title>
                    <link>https://example.com/3</link>
                    <pubDate>Tue, 06 Oct 2026 10:00:00 GMT</pubDate>
                </item>
            </channel>
        </rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <feed xmlns="http://www.w3.org/2005/Atom">
            <title>Atom Example</title>
            <id>urn:example</id>
            <updated>2026-10-07T12:00:00Z</updated>
            <entry>
                <title>Atom entry</title>
                <id>urn:example:1</id>
                <link href="https://example.org/a"/>
                <updated>2026-10-07T12:00:00Z</updated>
                <content type="html">&lt;p&gt;Body text&lt;/p&gt;</content>
            </entry>
        </feed>"#;

    #[test]
    fn test_parse_rss_entries() {
        let articles = parse_feed("Example", RSS.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "First story");
        assert_eq!(articles[0].link, "https://example.com/1");
        assert_eq!(articles[0].source_feed_name, "Example");
        assert_eq!(
            articles[0].published,
            Utc.with_ymd_and_hms(2026, 10, 5, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_skips_undated_entries() {
        let articles = parse_feed("Example", RSS.as_bytes()).unwrap();
        assert!(articles.iter().all(|a| a.title != "Undated story"));
    }

    #[test]
    fn test_parse_strips_html_from_summary() {
        let articles = parse_feed("Example", RSS.as_bytes()).unwrap();
        let summary = &articles[0].summary;
        assert!(summary.contains("Plain"));
        assert!(summary.contains("text"));
        assert!(!summary.contains('<'));
    }

    #[test]
    fn test_parse_missing_summary_is_empty() {
        let articles = parse_feed("Example", RSS.as_bytes()).unwrap();
        assert_eq!(articles[1].title, "No summary");
        assert_eq!(articles[1].summary, "");
    }

    #[test]
    fn test_parse_atom_uses_updated_and_content() {
        let articles = parse_feed("Atom", ATOM.as_bytes()).unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].link, "https://example.org/a");
        assert_eq!(
            articles[0].published,
            Utc.with_ymd_and_hms(2026, 10, 7, 12, 0, 0).unwrap()
        );
        assert!(articles[0].summary.contains("Body text"));
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        let result = parse_feed("Broken", b"this is not a feed");
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé...");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[tokio::test]
    async fn test_http_fetch_reports_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rss")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFeedFetcher::new().unwrap();
        let feed = FeedSource::new("Gone", format!("{}/rss", server.url()));
        let result = fetcher.fetch(&feed).await;

        assert!(matches!(result, Err(FetchError::Status(s)) if s.as_u16() == 404));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_fetch_parses_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rss")
            .with_status(200)
            .with_header("content-type", "application/rss+xml")
            .with_body(RSS)
            .create_async()
            .await;

        let fetcher = HttpFeedFetcher::new().unwrap();
        let feed = FeedSource::new("Example", format!("{}/rss", server.url()));
        let articles = fetcher.fetch(&feed).await.unwrap();

        assert_eq!(articles.len(), 2);
        mock.assert_async().await;
    }
}
