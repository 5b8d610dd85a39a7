use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::error::OutputError;

const MULTI_FEED_LABEL: &str = "podcast_notes";

/// Writes generated notes as markdown files into one directory
pub struct NotesWriter {
    dir: PathBuf,
}

impl NotesWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save `content` as `<label>_<YYYYmmdd_HHMMSS>.md`, never replacing an existing file
    pub fn save<Tz: TimeZone>(
        &self,
        content: &str,
        label: &str,
        at: DateTime<Tz>,
    ) -> Result<PathBuf, OutputError>
    where
        Tz::Offset: std::fmt::Display,
    {
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let stem = format!("{}_{}", sanitize(label), at.format("%Y%m%d_%H%M%S"));

        let mut attempt = 1;
        loop {
            let filename = if attempt == 1 {
                format!("{}.md", stem)
            } else {
                format!("{}_{}.md", stem, attempt)
            };
            let filepath = self.dir.join(filename);

            match OpenOptions::new().write(true).create_new(true).open(&filepath) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())
                        .map_err(|source| OutputError::Write {
                            path: filepath.clone(),
                            source,
                        })?;
                    info!("Wrote {} bytes to {}", content.len(), filepath.display());
                    return Ok(filepath);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => {
                    return Err(OutputError::Write {
                        path: filepath,
                        source,
                    })
                }
            }
        }
    }
}

/// File label for a run: the feed's name for one feed, a generic one otherwise
pub fn notes_label(selected_feed_names: &[String]) -> String {
    match selected_feed_names {
        [single] => sanitize(single),
        _ => MULTI_FEED_LABEL.to_string(),
    }
}

fn sanitize(name: &str) -> String {
    name.replace([' ', '/', '\\'], "_")
}
