use chrono::{DateTime, Duration, Utc};

use crate::models::Article;

/// Oldest publish time still inside a `weeks_back` window ending at `now`
pub fn cutoff(weeks_back: u8, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(7 * weeks_back as i64)
}

/// Keep articles published at or after the cutoff, in input order
pub fn filter_recent(articles: Vec<Article>, weeks_back: u8, now: DateTime<Utc>) -> Vec<Article> {
    let cutoff = cutoff(weeks_back, now);
    articles
        .into_iter()
        .filter(|article| article.published >= cutoff)
        .collect()
}
