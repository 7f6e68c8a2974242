use crate::error::{AutoTasksError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub relocate: RelocateConfig,
    pub extract: ExtractConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelocateConfig {
    pub extensions: Vec<String>,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub default_output: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout: u64,
    pub default_log_file: PathBuf,
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            overwrite: false,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_output: PathBuf::from("emails.txt"),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            default_log_file: PathBuf::from("webpage_titles.txt"),
        }
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AutoTasksError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| AutoTasksError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| AutoTasksError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["autotasks.toml", "autotasks.config.toml", ".autotasks.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(timeout) = cli_args.timeout {
            self.fetch.timeout = timeout;
        }

        if let Some(ref output) = cli_args.email_output {
            self.extract.default_output = output.clone();
        }

        if let Some(ref log_file) = cli_args.title_log {
            self.fetch.default_log_file = log_file.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| AutoTasksError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| AutoTasksError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.relocate.extensions.is_empty() {
            return Err(AutoTasksError::Config {
                message: "At least one image extension must be specified".to_string(),
            });
        }

        if self
            .relocate
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(AutoTasksError::Config {
                message: "Image extensions must not be empty".to_string(),
            });
        }

        if self.fetch.timeout == 0 {
            return Err(AutoTasksError::Config {
                message: "Request timeout must be greater than 0".to_string(),
            });
        }

        if self.extract.default_output.as_os_str().is_empty() {
            return Err(AutoTasksError::Config {
                message: "Default email output path must not be empty".to_string(),
            });
        }

        if self.fetch.default_log_file.as_os_str().is_empty() {
            return Err(AutoTasksError::Config {
                message: "Default title log path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub timeout: Option<u64>,
    pub email_output: Option<PathBuf>,
    pub title_log: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_email_output(mut self, output: Option<PathBuf>) -> Self {
        self.email_output = output;
        self
    }

    pub fn with_title_log(mut self, log_file: Option<PathBuf>) -> Self {
        self.title_log = log_file;
        self
    }
}
