pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod relocator;
pub mod shell;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CliOverrides, Config, ExtractConfig, FetchConfig, RelocateConfig};
pub use error::{AutoTasksError, FailureCategory, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{EmailExtractor, EmailReport};
pub use fetcher::{TitleFetcher, TitleLog, TitleLogEntry, TitleOutcome};
pub use relocator::{FileEntry, FileRelocator, ImageFilter, MoveFailure, RelocationReport};
pub use shell::{MenuChoice, MenuShell, PromptDefaults, Request, ShellState};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// Runs operations and reports their results to the operator.
pub struct AutoTasks {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl AutoTasks {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create AutoTasks instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Drive the interactive menu until the operator exits or input ends.
    pub async fn run_menu<R: BufRead, W: Write>(&self, input: R, output: W) -> std::io::Result<()> {
        let mut shell = MenuShell::new(input, output, PromptDefaults::from(&self.config));

        while let Some(request) = shell.next_request()? {
            self.run_request(&request).await;
        }

        debug!("menu shell exited");
        Ok(())
    }

    /// Run one request and print its outcome. Failures are reported, never returned.
    pub async fn run_request(&self, request: &Request) {
        info!("running {}", request.name());

        match request {
            Request::Relocate {
                source,
                destination,
            } => match self.relocate_images(source, destination) {
                Ok(report) => self
                    .output_formatter
                    .print_relocation_report(&report, &self.image_description()),
                Err(e) => self.handle_error(&e),
            },
            Request::ExtractEmails { input, output } => match self.extract_emails(input, output) {
                Ok(report) => self.output_formatter.print_email_report(&report),
                Err(e) => self.handle_error(&e),
            },
            Request::FetchTitle { url, log_file } => {
                self.output_formatter.start_operation(&format!("Fetching: {}", url));
                match self.fetch_title(url, log_file).await {
                    Ok(outcome) => self.output_formatter.print_title_outcome(&outcome),
                    Err(e) => self.handle_error(&e),
                }
            }
        }
    }

    /// Move matching images from `source` to `destination` with progress indication
    pub fn relocate_images(&self, source: &Path, destination: &Path) -> Result<RelocationReport> {
        let relocator = FileRelocator::new(&self.config.relocate);

        let file_progress = self.progress_manager.create_file_progress(0);
        let progress_callback = {
            let pb = file_progress.clone();
            move |report: &RelocationReport| {
                ui::progress::update_relocation_progress(&pb, report);
            }
        };

        let result = relocator.relocate(source, destination, Some(&progress_callback));

        match result {
            Ok(report) => {
                ui::progress::finish_progress(&file_progress, report.elapsed());
                Ok(report)
            }
            Err(e) => {
                file_progress.finish_and_clear();
                Err(e)
            }
        }
    }

    pub fn extract_emails(&self, input: &Path, output: &Path) -> Result<EmailReport> {
        EmailExtractor::new()?.extract(input, output)
    }

    pub async fn fetch_title(&self, url: &str, log_file: &Path) -> Result<TitleOutcome> {
        let fetcher = TitleFetcher::new(&self.config.fetch)?;

        let spinner = self.progress_manager.create_spinner(&format!("Requesting {}", url));
        let outcome = fetcher.fetch_and_log(url, log_file).await;
        spinner.finish_and_clear();

        outcome
    }

    fn image_description(&self) -> String {
        ImageFilter::new(&self.config.relocate).describe()
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &AutoTasksError) {
        debug!("operation failed ({:?}): {}", error.category(), error);
        self.progress_manager
            .suspend(|| self.output_formatter.print_user_friendly_error(error));
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn quiet_runner() -> AutoTasks {
        AutoTasks::new(Config::default(), OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_autotasks_creation() {
        let runner = AutoTasks::new(Config::default(), OutputMode::Human, 1, false);
        assert_eq!(runner.config().relocate.extensions.len(), 2);
        assert_eq!(runner.image_description(), ".jpg/.jpeg");
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        AutoTasks::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[relocate]"));
        assert!(content.contains("[fetch]"));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }

    #[test]
    fn test_relocate_through_runner() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("images");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("cat.JPG"), "x").unwrap();

        let report = quiet_runner()
            .relocate_images(&source, &temp.path().join("out"))
            .unwrap();

        assert_eq!(report.moved_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_do_not_escape_run_request() {
        let temp = TempDir::new().unwrap();
        let runner = quiet_runner();

        runner
            .run_request(&Request::Relocate {
                source: temp.path().join("missing"),
                destination: temp.path().join("out"),
            })
            .await;
        runner
            .run_request(&Request::ExtractEmails {
                input: temp.path().join("missing.txt"),
                output: temp.path().join("emails.txt"),
            })
            .await;
        runner
            .run_request(&Request::FetchTitle {
                url: "not a url".to_string(),
                log_file: temp.path().join("titles.txt"),
            })
            .await;

        assert!(!temp.path().join("out").exists());
        assert!(!temp.path().join("emails.txt").exists());
        assert!(!temp.path().join("titles.txt").exists());
    }

    #[tokio::test]
    async fn test_menu_runs_requests_until_exit() {
        let temp = TempDir::new().unwrap();
        let input_file = temp.path().join("notes.txt");
        let output_file = temp.path().join("found.txt");
        fs::write(&input_file, "write to b@example.com or a@example.com").unwrap();

        let script = format!(
            "9\n2\n{}\n{}\n4\n",
            input_file.display(),
            output_file.display()
        );
        let mut screen = Vec::new();

        quiet_runner()
            .run_menu(Cursor::new(script.into_bytes()), &mut screen)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(&output_file).unwrap(),
            "a@example.com\nb@example.com\n"
        );
        let screen = String::from_utf8(screen).unwrap();
        assert!(screen.contains("Invalid choice!"));
        assert!(screen.contains("Goodbye!"));
    }
}
