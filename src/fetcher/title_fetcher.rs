use crate::config::FetchConfig;
use crate::error::{AutoTasksError, Result};
use crate::fetcher::title_log::{TitleLog, TitleLogEntry};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

const TITLE_PATTERN: &str = r"(?i)<title>(.*?)</title>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    Logged { entry: TitleLogEntry, log_path: PathBuf },
    NoTitle,
}

pub struct TitleFetcher {
    client: reqwest::Client,
    timeout: Duration,
    title_pattern: Regex,
}

impl TitleFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Self::with_timeout(config.request_timeout())
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AutoTasksError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout,
            title_pattern: Regex::new(TITLE_PATTERN)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url`, pull out its title and append a record to `log_path`.
    ///
    /// Request failures leave the log untouched; a page without a title
    /// yields `TitleOutcome::NoTitle` and also leaves it untouched.
    pub async fn fetch_and_log(&self, url: &str, log_path: &Path) -> Result<TitleOutcome> {
        let body = self.fetch_page(url).await?;

        let Some(title) = self.extract_title(&body) else {
            debug!("No <title> in {} byte body from {}", body.len(), url);
            return Ok(TitleOutcome::NoTitle);
        };

        let entry = TitleLogEntry::new(url, title);
        TitleLog::new(log_path).append(&entry)?;

        Ok(TitleOutcome::Logged {
            entry,
            log_path: log_path.to_path_buf(),
        })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let parsed = validate_http_url(url)?;
        let timeout_secs = self.timeout.as_secs().max(1);

        debug!("GET {} (timeout {:?})", parsed, self.timeout);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| AutoTasksError::from_request(url, timeout_secs, e))?;

        debug!("{} responded with {}", url, response.status());

        let response = response
            .error_for_status()
            .map_err(|e| AutoTasksError::from_request(url, timeout_secs, e))?;

        response
            .text()
            .await
            .map_err(|e| AutoTasksError::from_request(url, timeout_secs, e))
    }

    /// First `<title>` match, trimmed. Does not look across line breaks.
    pub fn extract_title(&self, body: &str) -> Option<String> {
        self.title_pattern
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

pub fn validate_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| AutoTasksError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(AutoTasksError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
