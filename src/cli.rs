use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::shell::Request;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autotasks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Small task automation toolkit")]
#[command(
    long_about = "AutoTasks moves image files between folders, extracts email addresses \
                  from text files and logs webpage titles. Run without a command for the \
                  interactive menu."
)]
#[command(after_help = "EXAMPLES:\n  \
    autotasks\n  \
    autotasks relocate ./images ./jpg_images\n  \
    autotasks extract-emails notes.txt --output found.txt\n  \
    autotasks fetch-title https://www.python.org --timeout 5")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move .jpg/.jpeg files from one folder to another
    Relocate {
        /// Folder to take images from
        source: PathBuf,
        /// Folder to move images into (created if missing)
        destination: PathBuf,
    },

    /// Extract email addresses from a text file
    ExtractEmails {
        /// Text file to scan
        input: PathBuf,
        /// File to write the sorted unique addresses to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a webpage title and append it to a log file
    FetchTitle {
        /// Page to fetch
        url: String,
        /// Log file to append to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        match self.command {
            Some(Command::ExtractEmails { ref output, .. }) => {
                CliOverrides::new().with_email_output(output.clone())
            }
            Some(Command::FetchTitle {
                ref output,
                timeout,
                ..
            }) => CliOverrides::new()
                .with_timeout(timeout)
                .with_title_log(output.clone()),
            _ => CliOverrides::new(),
        }
    }

    /// The request named on the command line, with defaults filled in from
    /// `config`. `None` means the interactive menu should run.
    pub fn request(&self, config: &Config) -> Option<Request> {
        let command = self.command.as_ref()?;

        Some(match command {
            Command::Relocate {
                source,
                destination,
            } => Request::Relocate {
                source: source.clone(),
                destination: destination.clone(),
            },
            Command::ExtractEmails { input, output } => Request::ExtractEmails {
                input: input.clone(),
                output: output
                    .clone()
                    .unwrap_or_else(|| config.extract.default_output.clone()),
            },
            Command::FetchTitle { url, output, .. } => Request::FetchTitle {
                url: url.clone(),
                log_file: output
                    .clone()
                    .unwrap_or_else(|| config.fetch.default_log_file.clone()),
            },
        })
    }

    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
