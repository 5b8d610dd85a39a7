//! Parsing of the answers typed at the interactive prompts.
//!
//! Everything here works on plain strings so it can be tested without a
//! terminal.

use crate::error::ValidationError;
use crate::models::FeedSource;

/// Parse an integer answer and check it lies in `min..=max`
pub fn parse_in_range(input: &str, (min, max): (u8, u8)) -> Result<u8, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;

    if value < min as i64 || value > max as i64 {
        return Err(ValidationError::OutOfRange { value, min, max });
    }
    Ok(value as u8)
}

/// Parse a y/n answer; an empty answer takes `default`
pub fn parse_yes_no(input: &str, default: bool) -> Result<bool, ValidationError> {
    match input.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(ValidationError::NotYesOrNo(other.to_string())),
    }
}

/// Resolve a feed selection against the list shown to the user.
///
/// Accepts 1-based numbers (`1,3`), inclusive ranges (`2-4`), exact feed
/// names, or `all`. Returns the selected names in the order given, without
/// duplicates.
pub fn parse_feed_selection(
    input: &str,
    shown: &[&FeedSource],
) -> Result<Vec<String>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(shown.iter().map(|feed| feed.name.clone()).collect());
    }

    let mut selected: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        if !selected.iter().any(|s| s == name) {
            selected.push(name.to_string());
        }
    };

    for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some((start, end)) = token.split_once('-') {
            let bounds = (start.trim().parse::<usize>(), end.trim().parse::<usize>());
            if let (Ok(start), Ok(end)) = bounds {
                for number in start..=end {
                    push(&feed_at(shown, number)?.name);
                }
                continue;
            }
        }

        match token.parse::<usize>() {
            Ok(number) => push(&feed_at(shown, number)?.name),
            Err(_) => {
                let feed = shown
                    .iter()
                    .find(|feed| feed.name.eq_ignore_ascii_case(token))
                    .ok_or_else(|| ValidationError::UnknownFeedName(token.to_string()))?;
                push(&feed.name);
            }
        }
    }

    if selected.is_empty() {
        return Err(ValidationError::NoFeedsSelected);
    }
    Ok(selected)
}

fn feed_at<'a>(
    shown: &[&'a FeedSource],
    number: usize,
) -> Result<&'a FeedSource, ValidationError> {
    number
        .checked_sub(1)
        .and_then(|index| shown.get(index).copied())
        .ok_or(ValidationError::UnknownFeed(number))
}
