use crate::config::Config;
use crate::shell::request::Request;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::trace;

const RULE_WIDTH: usize = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Relocate,
    ExtractEmails,
    FetchTitle,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Relocate),
            "2" => Ok(MenuChoice::ExtractEmails),
            "3" => Ok(MenuChoice::FetchTitle),
            "4" => Ok(MenuChoice::Exit),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    AwaitingChoice,
    RunningOperation(Request),
    Exited,
}

/// Defaults offered when an output path prompt is left blank.
#[derive(Debug, Clone)]
pub struct PromptDefaults {
    pub email_output: PathBuf,
    pub title_log: PathBuf,
}

impl From<&Config> for PromptDefaults {
    fn from(config: &Config) -> Self {
        Self {
            email_output: config.extract.default_output.clone(),
            title_log: config.fetch.default_log_file.clone(),
        }
    }
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Interactive menu loop over any line reader and writer.
///
/// Each call to [`MenuShell::next_request`] walks Idle -> AwaitingChoice and
/// either yields one request (RunningOperation) or reaches Exited. Invalid
/// choices go back to Idle without yielding anything.
pub struct MenuShell<R, W> {
    input: R,
    output: W,
    defaults: PromptDefaults,
    state: ShellState,
}

impl<R: BufRead, W: Write> MenuShell<R, W> {
    pub fn new(input: R, output: W, defaults: PromptDefaults) -> Self {
        Self {
            input,
            output,
            defaults,
            state: ShellState::Idle,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn next_request(&mut self) -> io::Result<Option<Request>> {
        loop {
            match self.state {
                ShellState::Exited => return Ok(None),
                ShellState::RunningOperation(_) => self.state = ShellState::Idle,
                _ => {}
            }

            self.print_menu()?;
            self.state = ShellState::AwaitingChoice;

            let Some(token) = self.read_line("Enter your choice (1-4): ")? else {
                return self.exit();
            };
            trace!("menu choice token: {:?}", token);

            let choice = match token.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Invalid choice! Please select 1-4.")?;
                    self.state = ShellState::Idle;
                    continue;
                }
            };

            let request = match choice {
                MenuChoice::Exit => return self.exit(),
                MenuChoice::Relocate => self.prompt_relocate()?,
                MenuChoice::ExtractEmails => self.prompt_extract()?,
                MenuChoice::FetchTitle => self.prompt_fetch()?,
            };

            let Some(request) = request else {
                return self.exit();
            };

            self.state = ShellState::RunningOperation(request.clone());
            return Ok(Some(request));
        }
    }

    fn exit(&mut self) -> io::Result<Option<Request>> {
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        self.state = ShellState::Exited;
        Ok(None)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output)?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "TASK AUTOMATION")?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "\nChoose a task to run:")?;
        writeln!(self.output, "1. Move all .jpg files to a new folder")?;
        writeln!(self.output, "2. Extract email addresses from a text file")?;
        writeln!(self.output, "3. Scrape webpage title and save to file")?;
        writeln!(self.output, "4. Exit")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn prompt_relocate(&mut self) -> io::Result<Option<Request>> {
        writeln!(self.output, "\n--- MOVE JPG FILES ---")?;
        let Some(source) = self.read_line("Enter source folder path: ")? else {
            return Ok(None);
        };
        let Some(destination) = self.read_line("Enter destination folder path: ")? else {
            return Ok(None);
        };

        Ok(Some(Request::Relocate {
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
        }))
    }

    fn prompt_extract(&mut self) -> io::Result<Option<Request>> {
        writeln!(self.output, "\n--- EXTRACT EMAIL ADDRESSES ---")?;
        let Some(input) = self.read_line("Enter input text file path: ")? else {
            return Ok(None);
        };
        let default = self.defaults.email_output.clone();
        let Some(output) = self.read_path_with_default(&default)? else {
            return Ok(None);
        };

        Ok(Some(Request::ExtractEmails {
            input: PathBuf::from(input),
            output,
        }))
    }

    fn prompt_fetch(&mut self) -> io::Result<Option<Request>> {
        writeln!(self.output, "\n--- SCRAPE WEBPAGE TITLE ---")?;
        let Some(url) = self.read_line("Enter webpage URL: ")? else {
            return Ok(None);
        };
        let default = self.defaults.title_log.clone();
        let Some(log_file) = self.read_path_with_default(&default)? else {
            return Ok(None);
        };

        Ok(Some(Request::FetchTitle { url, log_file }))
    }

    fn read_path_with_default(&mut self, default: &std::path::Path) -> io::Result<Option<PathBuf>> {
        let prompt = format!("Enter output file path (default: {}): ", default.display());
        let answer = self.read_line(&prompt)?;

        Ok(answer.map(|answer| {
            if answer.is_empty() {
                default.to_path_buf()
            } else {
                PathBuf::from(answer)
            }
        }))
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn shell(input: &str) -> MenuShell<Cursor<Vec<u8>>, Vec<u8>> {
        MenuShell::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            PromptDefaults::default(),
        )
    }

    fn output_of(shell: MenuShell<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Relocate));
        assert_eq!(" 2 ".parse::<MenuChoice>(), Ok(MenuChoice::ExtractEmails));
        assert_eq!("3".parse::<MenuChoice>(), Ok(MenuChoice::FetchTitle));
        assert_eq!("4".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert!("9".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
        assert!("one".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_exit_choice() {
        let mut shell = shell("4\n");
        assert_eq!(shell.state(), &ShellState::Idle);

        assert_eq!(shell.next_request().unwrap(), None);
        assert_eq!(shell.state(), &ShellState::Exited);
        assert_eq!(shell.next_request().unwrap(), None);

        let output = output_of(shell);
        assert!(output.contains("TASK AUTOMATION"));
        assert!(output.contains("Goodbye!"));
        assert!(!output.contains("---"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut shell = shell("9\n4\n");

        assert_eq!(shell.next_request().unwrap(), None);

        let output = output_of(shell);
        assert!(output.contains("Invalid choice! Please select 1-4."));
        assert_eq!(output.matches("Enter your choice (1-4): ").count(), 2);
    }

    #[test]
    fn test_non_utf8_choice_is_invalid() {
        let mut shell = MenuShell::new(
            Cursor::new(b"\xff\xfe\n4\n".to_vec()),
            Vec::new(),
            PromptDefaults::default(),
        );

        assert_eq!(shell.next_request().unwrap(), None);
        assert_eq!(shell.state(), &ShellState::Exited);

        let output = output_of(shell);
        assert!(output.contains("Invalid choice! Please select 1-4."));
    }

    #[test]
    fn test_relocate_prompts() {
        let mut shell = shell("1\n ./images \n./jpg_images\n4\n");

        let request = shell.next_request().unwrap();
        assert_eq!(
            request,
            Some(Request::Relocate {
                source: PathBuf::from("./images"),
                destination: PathBuf::from("./jpg_images"),
            })
        );
        assert!(matches!(shell.state(), ShellState::RunningOperation(_)));

        assert_eq!(shell.next_request().unwrap(), None);
        assert_eq!(shell.state(), &ShellState::Exited);
    }

    #[test]
    fn test_extract_uses_default_output() {
        let mut shell = shell("2\nnotes.txt\n\n");

        assert_eq!(
            shell.next_request().unwrap(),
            Some(Request::ExtractEmails {
                input: PathBuf::from("notes.txt"),
                output: PathBuf::from("emails.txt"),
            })
        );
        assert!(output_of(shell).contains("(default: emails.txt)"));
    }

    #[test]
    fn test_fetch_with_explicit_log() {
        let mut shell = shell("3\nhttps://www.python.org\ntitles.log\n");

        assert_eq!(
            shell.next_request().unwrap(),
            Some(Request::FetchTitle {
                url: "https://www.python.org".to_string(),
                log_file: PathBuf::from("titles.log"),
            })
        );
    }

    #[test]
    fn test_fetch_uses_configured_default() {
        let defaults = PromptDefaults {
            email_output: PathBuf::from("e.txt"),
            title_log: PathBuf::from("logs/titles.txt"),
        };
        let mut shell = MenuShell::new(Cursor::new(b"3\nhttp://a.test\n\n".to_vec()), Vec::new(), defaults);

        assert_eq!(
            shell.next_request().unwrap(),
            Some(Request::FetchTitle {
                url: "http://a.test".to_string(),
                log_file: PathBuf::from("logs/titles.txt"),
            })
        );
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut at_menu = shell("");
        assert_eq!(at_menu.next_request().unwrap(), None);
        assert_eq!(at_menu.state(), &ShellState::Exited);

        let mut mid_prompt = shell("1\n./images\n");
        assert_eq!(mid_prompt.next_request().unwrap(), None);
        assert_eq!(mid_prompt.state(), &ShellState::Exited);
    }

    #[test]
    fn test_loops_over_multiple_requests() {
        let mut shell = shell("2\na.txt\nb.txt\n7\n3\nhttp://x.test\n\n4\n");

        assert!(matches!(
            shell.next_request().unwrap(),
            Some(Request::ExtractEmails { .. })
        ));
        assert!(matches!(
            shell.next_request().unwrap(),
            Some(Request::FetchTitle { .. })
        ));
        assert_eq!(shell.next_request().unwrap(), None);

        let output = output_of(shell);
        assert_eq!(output.matches("Invalid choice!").count(), 1);
    }
}
