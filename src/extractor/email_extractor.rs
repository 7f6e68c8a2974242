use crate::error::{AutoTasksError, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shape of an address: `local@domain.tld`.
///
/// Kept exactly as written; note the top-level class also admits a literal `|`.
pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";

#[derive(Debug, Clone)]
pub struct EmailReport {
    pub output_path: PathBuf,
    pub total_matches: usize,
    pub unique: Vec<String>,
}

impl EmailReport {
    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }
}

pub struct EmailExtractor {
    pattern: Regex,
}

impl EmailExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// Every non-overlapping match, in order of appearance, duplicates included.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn unique_sorted(matches: &[&str]) -> Vec<String> {
        matches
            .iter()
            .map(|m| m.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Read `input`, collect the unique matches and write them to `output`,
    /// one per line, replacing whatever the file held before.
    pub fn extract(&self, input: &Path, output: &Path) -> Result<EmailReport> {
        if !input.exists() {
            return Err(AutoTasksError::missing_path("Input file", input));
        }

        let content = fs::read_to_string(input)?;
        let matches = self.find_all(&content);
        let unique = Self::unique_sorted(&matches);

        debug!(
            "{}: {} match(es), {} unique",
            input.display(),
            matches.len(),
            unique.len()
        );

        write_lines(output, &unique)?;

        Ok(EmailReport {
            output_path: output.to_path_buf(),
            total_matches: matches.len(),
            unique,
        })
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}
