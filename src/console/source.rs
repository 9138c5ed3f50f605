//! Where log exports come from in an interactive session.

use crate::utils::reader::{read_log_file, validate_log_path};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

const EXIT_TOKEN: &str = "exit";

/// A log export loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLog {
    pub path: PathBuf,
    pub text: String,
}

/// Input provider for the interactive session.
pub trait LogSource {
    /// The next export to process, or `None` when the operator is done.
    fn next_log(&mut self) -> Result<Option<LoadedLog>>;

    /// Ask whether to go on after a processed file.
    fn keep_going(&mut self) -> Result<bool>;

    /// Hold the console open until the operator acknowledges.
    fn pause(&mut self) -> Result<()>;
}

/// Prompts on a writer and reads answers line by line from a reader.
///
/// End of input is treated as `exit`.
pub struct PromptSource<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from console")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write to console")
    }
}

impl<R: BufRead, W: Write> LogSource for PromptSource<R, W> {
    fn next_log(&mut self) -> Result<Option<LoadedLog>> {
        loop {
            let Some(answer) = self.ask(
                "Enter the path to the log file (e.g., /path/to/logfile.log) or type 'exit' to quit: ",
            )?
            else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case(EXIT_TOKEN) {
                return Ok(None);
            }

            let path = PathBuf::from(&answer);
            if let Err(e) = validate_log_path(&path) {
                debug!(path = %path.display(), "rejected path");
                self.say(&format!("{}. Please enter a valid .log file.", e))?;
                continue;
            }

            match read_log_file(&path) {
                Ok(text) => return Ok(Some(LoadedLog { path, text })),
                Err(e) => {
                    self.say(&format!("{}. Please enter a valid file path.", e))?;
                }
            }
        }
    }

    fn keep_going(&mut self) -> Result<bool> {
        let answer = self.ask("Type 'exit' to quit or press Enter to continue: ")?;
        Ok(answer.is_some_and(|a| !a.eq_ignore_ascii_case(EXIT_TOKEN)))
    }

    fn pause(&mut self) -> Result<()> {
        self.ask("Press Enter to exit.")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_exit_token_case_insensitive() {
        let mut out = Vec::new();
        let mut source = PromptSource::new(Cursor::new("EXIT\n"), &mut out);
        assert_eq!(source.next_log().unwrap(), None);
    }

    #[test]
    fn test_end_of_input_is_exit() {
        let mut out = Vec::new();
        let mut source = PromptSource::new(Cursor::new(""), &mut out);
        assert_eq!(source.next_log().unwrap(), None);
        assert!(!source.keep_going().unwrap());
    }

    #[test]
    fn test_reprompts_on_bad_paths() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("fw.log");
        std::fs::write(&good, "# Fields: Action\n# End of log\n").unwrap();
        let missing = dir.path().join("missing.log");

        let script = format!("notes.txt\n{}\n{}\n", missing.display(), good.display());
        let mut out = Vec::new();
        let loaded = {
            let mut source = PromptSource::new(Cursor::new(script), &mut out);
            source.next_log().unwrap().unwrap()
        };
        assert_eq!(loaded.path, good);
        assert!(loaded.text.starts_with("# Fields:"));

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Please enter a valid .log file."));
        assert!(transcript.contains("file not found at"));
        assert_eq!(transcript.matches("Enter the path to the log file").count(), 3);
    }

    #[test]
    fn test_keep_going() {
        let mut out = Vec::new();
        let mut source = PromptSource::new(Cursor::new("\nexit\n"), &mut out);
        assert!(source.keep_going().unwrap());
        assert!(!source.keep_going().unwrap());
    }
}
