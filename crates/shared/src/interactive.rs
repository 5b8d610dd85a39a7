use std::io::{self, BufRead, Write};

use crate::error::ValidationError;
use crate::feeds::FeedRegistry;
use crate::models::{
    FeedSource, RunParameters, TECHNICAL_DEPTH_RANGE, TOPIC_COUNT_RANGE, WEEKS_BACK_RANGE,
};
use crate::selection::{parse_feed_selection, parse_in_range, parse_yes_no};

/// Asks questions on `output` and reads answers from `input`, re-asking
/// until an answer validates.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<T> {
        loop {
            write!(self.output, "\n{}", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                ));
            }

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    pub fn ask_in_range(&mut self, question: &str, range: (u8, u8)) -> io::Result<u8> {
        self.ask(question, |input| parse_in_range(input, range))
    }

    /// Show the feeds and ask which ones to use
    pub fn choose_feeds(&mut self, shown: &[&FeedSource]) -> io::Result<Vec<String>> {
        writeln!(self.output, "\n=== Available RSS Feeds ===")?;
        for (index, feed) in shown.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, feed.name)?;
        }

        self.ask(
            "Select feeds (e.g. 1,3 or 2-4 or all): ",
            |input| parse_feed_selection(input, shown),
        )
    }

    /// Walk through every question of a run
    pub fn collect_parameters(&mut self, registry: &FeedRegistry) -> io::Result<RunParameters> {
        let ascending = self.ask("Sort feeds alphabetically? (y/N): ", |input| {
            parse_yes_no(input, false)
        })?;
        let shown = registry.sorted_view(ascending);
        let selected = self.choose_feeds(&shown)?;

        writeln!(self.output, "\n=== Select Time Period ===")?;
        for weeks in WEEKS_BACK_RANGE.0..=WEEKS_BACK_RANGE.1 {
            if weeks == 1 {
                writeln!(self.output, "  1) Past week")?;
            } else {
                writeln!(self.output, "  {}) Past {} weeks", weeks, weeks)?;
            }
        }
        let weeks_back = self.ask_in_range("Select time period (1-4): ", WEEKS_BACK_RANGE)?;

        let topic_count = self.ask_in_range(
            "How many topics for the program notes? (1-5): ",
            TOPIC_COUNT_RANGE,
        )?;

        let technical_depth = self.ask_in_range(
            "Technical depth level (0-5, where 0 is non-technical and 5 is highly technical): ",
            TECHNICAL_DEPTH_RANGE,
        )?;

        RunParameters::new(selected, weeks_back, topic_count, technical_depth)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn registry() -> FeedRegistry {
        FeedRegistry::from_json_str(
            r#"{"Stacker News": "https://stacker.news/rss", "Hacker News": "https://news.ycombinator.com/rss"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_out_of_range_depth_reprompts() {
        let mut p = prompter("7\n3\n");

        let depth = p.ask_in_range("Depth: ", TECHNICAL_DEPTH_RANGE).unwrap();

        assert_eq!(depth, 3);
        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Depth: ").count(), 2);
        assert!(output.contains("Please enter a number between 0 and 5."));
    }

    #[test]
    fn test_non_number_reprompts() {
        let mut p = prompter("lots\n2\n");
        assert_eq!(p.ask_in_range("Topics: ", TOPIC_COUNT_RANGE).unwrap(), 2);
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("'lots' is not a number."));
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut p = prompter("9\n");
        let err = p.ask_in_range("Weeks: ", WEEKS_BACK_RANGE).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_collect_parameters_full_run() {
        let mut p = prompter("y\n5\n1,2\n2\n3\n9\n4\n");

        let params = p.collect_parameters(&registry()).unwrap();

        // Sorted: 1) Hacker News 2) Stacker News
        assert_eq!(
            params.selected_feed_names(),
            &["Hacker News".to_string(), "Stacker News".to_string()][..]
        );
        assert_eq!(params.weeks_back(), 2);
        assert_eq!(params.topic_count(), 3);
        assert_eq!(params.technical_depth(), 4);

        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("There is no feed number 5."));
        assert!(output.contains("  1) Hacker News"));
    }

    #[test]
    fn test_collect_parameters_keeps_config_order() {
        let mut p = prompter("\n1\n1\n1\n0\n");

        let params = p.collect_parameters(&registry()).unwrap();

        assert_eq!(params.selected_feed_names(), &["Stacker News".to_string()][..]);
    }
}
