use crate::error::{AutoTasksError, UserFriendlyError};
use crate::extractor::EmailReport;
use crate::fetcher::TitleOutcome;
use crate::relocator::RelocationReport;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

/// All operator-facing output goes through here, to stdout.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            OutputMode::Plain => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if !self.quiet {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Plain => println!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &AutoTasksError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            if self.quiet {
                return;
            }
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        println!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Plain => println!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_relocation_report(&self, report: &RelocationReport, description: &str) {
        if report.created_destination {
            self.info(&format!(
                "Created destination folder: {}",
                report.destination.display()
            ));
        }

        for entry in &report.moved {
            self.info(&format!("Moved: {}", entry.name));
        }

        for failure in &report.failures {
            self.error(&format!("Error moving {}: {}", failure.name, failure.message));
        }

        self.print_blank_line();
        self.success(&format!(
            "Successfully moved {} {} file(s)",
            report.moved_count(),
            description
        ));
        self.debug(&format!("Completed in {}", format_duration(report.elapsed())));
    }

    pub fn print_email_report(&self, report: &EmailReport) {
        self.success(&format!(
            "Found {} email(s) ({} unique)",
            report.total_matches,
            report.unique_count()
        ));
        self.success(&format!("Saved to: {}", report.output_path.display()));

        if report.unique.is_empty() || self.quiet {
            return;
        }

        self.print_blank_line();
        println!("Extracted emails:");
        for email in &report.unique {
            println!("  - {}", email);
        }
    }

    pub fn print_title_outcome(&self, outcome: &TitleOutcome) {
        match outcome {
            TitleOutcome::Logged { entry, log_path } => {
                self.success(&format!("Title: {}", entry.title));
                self.success(&format!("Saved to: {}", log_path.display()));
            }
            TitleOutcome::NoTitle => self.warning("No title found on the webpage"),
        }
    }

    fn print_blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green().bold()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Warning => (&WARNING, style(message).yellow().bold()),
                MessageType::Info => (&INFO, style(message).cyan()),
            };
            println!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "⚠",
                MessageType::Info => "i",
            };
            println!("{} {}", prefix, message);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
