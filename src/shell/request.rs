use std::path::PathBuf;

/// A fully resolved operation, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Relocate {
        source: PathBuf,
        destination: PathBuf,
    },
    ExtractEmails {
        input: PathBuf,
        output: PathBuf,
    },
    FetchTitle {
        url: String,
        log_file: PathBuf,
    },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Relocate { .. } => "MOVE JPG FILES",
            Request::ExtractEmails { .. } => "EXTRACT EMAIL ADDRESSES",
            Request::FetchTitle { .. } => "SCRAPE WEBPAGE TITLE",
        }
    }
}
