use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoTasksError {
    #[error("{description} does not exist: {path}")]
    MissingPath { description: String, path: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: u64 },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Coarse grouping used when reporting a failure to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    MissingPath,
    Io,
    Network,
    Config,
}

impl AutoTasksError {
    pub fn missing_path<D: Into<String>, P: AsRef<std::path::Path>>(description: D, path: P) -> Self {
        AutoTasksError::MissingPath {
            description: description.into(),
            path: path.as_ref().display().to_string(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            AutoTasksError::MissingPath { .. } | AutoTasksError::InvalidPath { .. } => {
                FailureCategory::MissingPath
            }
            AutoTasksError::Io(_) => FailureCategory::Io,
            AutoTasksError::InvalidUrl { .. }
            | AutoTasksError::Network { .. }
            | AutoTasksError::Timeout { .. }
            | AutoTasksError::HttpStatus { .. } => FailureCategory::Network,
            AutoTasksError::Config { .. } | AutoTasksError::Pattern(_) => FailureCategory::Config,
        }
    }

    pub fn is_network_failure(&self) -> bool {
        self.category() == FailureCategory::Network
    }

    /// Classify a reqwest error for the given URL.
    pub fn from_request(url: &str, timeout_secs: u64, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return AutoTasksError::Timeout {
                url: url.to_string(),
                seconds: timeout_secs,
            };
        }

        if let Some(status) = error.status() {
            return AutoTasksError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            };
        }

        AutoTasksError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for AutoTasksError {
    fn user_message(&self) -> String {
        match self {
            AutoTasksError::MissingPath { description, path } => {
                format!("{} '{}' does not exist!", description, path)
            }
            AutoTasksError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            AutoTasksError::Io(e) => format!("Error: {}", e),
            AutoTasksError::InvalidUrl { url, reason } => {
                format!("Error fetching webpage: invalid URL '{}' ({})", url, reason)
            }
            AutoTasksError::Network { message, .. } => {
                format!("Error fetching webpage: {}", message)
            }
            AutoTasksError::Timeout { url, seconds } => {
                format!(
                    "Error fetching webpage: {} did not respond within {} seconds",
                    url, seconds
                )
            }
            AutoTasksError::HttpStatus { url, status } => {
                format!("Error fetching webpage: {} returned HTTP {}", url, status)
            }
            AutoTasksError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            AutoTasksError::Pattern(e) => format!("Invalid pattern: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            AutoTasksError::MissingPath { .. } => Some(
                "Check the path for typos. Relative paths are resolved from the current directory.".to_string()
            ),
            AutoTasksError::InvalidUrl { .. } => Some(
                "Include the scheme, for example https://www.example.com".to_string()
            ),
            AutoTasksError::Network { .. } => Some(
                "Check your internet connection and that the address is reachable.".to_string()
            ),
            AutoTasksError::Timeout { .. } => Some(
                "The server is slow to respond. Try again or raise the timeout with --timeout.".to_string()
            ),
            AutoTasksError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for AutoTasksError {
    fn from(error: toml::de::Error) -> Self {
        AutoTasksError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AutoTasksError>;
