use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const SEPARATOR_WIDTH: usize = 70;

/// One record in the title log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLogEntry {
    pub timestamp: NaiveDateTime,
    pub url: String,
    pub title: String,
}

impl TitleLogEntry {
    pub fn new<U: Into<String>, T: Into<String>>(url: U, title: T) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn render(&self) -> String {
        format!(
            "[{}] {}\nTitle: {}\n{}\n\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.url,
            self.title,
            "-".repeat(SEPARATOR_WIDTH)
        )
    }
}

/// Append-only text log of fetched titles.
pub struct TitleLog {
    path: PathBuf,
}

impl TitleLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &TitleLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(entry.render().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
