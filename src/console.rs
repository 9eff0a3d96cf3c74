//! Console input and output used by the login gate and the commands.

use anyhow::{Context, Result, anyhow};
use std::borrow::Cow;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::shell::highlighter::OutputHighlighter;

/// Warning shown once when masked input is not available.
pub const UNSAFE_CONSOLE_WARNING: &str = "WARNING: THE CURRENT CONSOLE DOES NOT SUPPORT HIDDEN \
     USERNAME/PASSWORD INPUT. ALL ENTERED USERNAMES AND PASSWORDS WILL BE VISIBLE ON SCREEN.";

/// Source of interactive input and sink for status messages.
pub trait Prompter {
    /// Reads a line with echo. The trailing newline is removed.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Reads a line without echo where the console supports it.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;

    /// Shows a message to the user.
    fn notify(&mut self, message: &str);

    /// Shows an error message. Defaults to [`Prompter::notify`].
    fn alert(&mut self, message: &str) {
        self.notify(message);
    }

    /// Asks a yes/no question. Only `y` or `yes` (any case) count as yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.read_line(prompt)?;
        Ok(is_yes(&answer))
    }
}

/// Returns true for `y` or `yes`, ignoring case and surrounding whitespace.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Line-oriented input for [`TerminalPrompter`].
pub trait LineInput {
    /// Appends one line, terminator included, to `buf`. Returns 0 at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

// Reads through the shared stdin buffer so the line editor sees the same stream.
impl LineInput for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Remembers whether the unmasked-input warning has been shown.
#[derive(Debug, Default)]
pub struct ConsoleWarning {
    shown: bool,
}

impl ConsoleWarning {
    /// Writes the warning the first time only. Returns true if it was written.
    pub fn show(&mut self, out: &mut impl Write) -> io::Result<bool> {
        if self.shown {
            return Ok(false);
        }
        writeln!(out, "{}", UNSAFE_CONSOLE_WARNING)?;
        log::warn!("Masked input unavailable, falling back to visible input");
        self.shown = true;
        Ok(true)
    }
}

/// Prompter backed by the process's stdin and stdout.
pub struct TerminalPrompter<R = io::Stdin, W = io::Stdout> {
    input: R,
    output: W,
    masked: bool,
    colored: bool,
    warning: ConsoleWarning,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        let masked = io::stdin().is_terminal();
        let mut prompter = Self::with_io(io::stdin(), io::stdout(), masked);
        prompter.colored = io::stderr().is_terminal();
        prompter
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: LineInput, W: Write> TerminalPrompter<R, W> {
    /// Builds a prompter over explicit streams. Errors go to stderr uncolored.
    pub fn with_io(input: R, output: W, masked: bool) -> Self {
        Self {
            input,
            output,
            masked,
            colored: false,
            warning: ConsoleWarning::default(),
        }
    }

    /// Error text, colored only when stderr is a terminal.
    fn error_text<'m>(&self, message: &'m str) -> Cow<'m, str> {
        if self.colored {
            Cow::Owned(OutputHighlighter::error(message))
        } else {
            Cow::Borrowed(message)
        }
    }
}

impl<R: LineInput, W: Write> Prompter for TerminalPrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Err(anyhow!("Unexpected end of input"));
        }
        Ok(input.trim_end_matches(['\n', '\r']).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        if self.masked {
            match rpassword::prompt_password(prompt) {
                Ok(secret) => return Ok(secret),
                Err(e) => {
                    log::debug!("Masked input failed: {}", e);
                    self.masked = false;
                }
            }
        }
        self.warning.show(&mut self.output)?;
        self.read_line(prompt)
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            log::warn!("Could not write to console: {}", e);
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", self.error_text(message));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Prompter that replays canned answers and records everything shown.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub answers: VecDeque<String>,
        pub prompts: Vec<String>,
        pub messages: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, prompt: &str) -> Result<String> {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow!("Unexpected end of input"))
        }

        fn read_secret(&mut self, prompt: &str) -> Result<String> {
            self.read_line(prompt)
        }

        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompter;
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(is_yes(" Yes "));
        assert!(!is_yes("no"));
        assert!(!is_yes("yeah"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_confirm_uses_read_line() {
        let mut prompter = ScriptedPrompter::new(&["Y", "nope"]);
        assert!(prompter.confirm("Sure? ").unwrap());
        assert!(!prompter.confirm("Sure? ").unwrap());
        assert_eq!(prompter.prompts, vec!["Sure? ", "Sure? "]);
    }

    #[test]
    fn test_unsafe_console_warning_shown_once() {
        let input = io::Cursor::new("alice\nsecret\n");
        let mut prompter = TerminalPrompter::with_io(input, Vec::new(), false);

        assert_eq!(prompter.read_secret("Username: ").unwrap(), "alice");
        assert_eq!(prompter.read_secret("Password: ").unwrap(), "secret");

        let output = String::from_utf8(prompter.output).unwrap();
        assert_eq!(output.matches(UNSAFE_CONSOLE_WARNING).count(), 1);
        assert!(output.starts_with(UNSAFE_CONSOLE_WARNING));
        assert!(output.ends_with("Username: Password: "));
    }

    #[test]
    fn test_console_warning_state() {
        let mut warning = ConsoleWarning::default();
        let mut out = Vec::new();
        assert!(warning.show(&mut out).unwrap());
        assert!(!warning.show(&mut out).unwrap());
        assert_eq!(out.len(), UNSAFE_CONSOLE_WARNING.len() + 1);
    }

    #[test]
    fn test_terminal_prompter_end_of_input() {
        let mut prompter = TerminalPrompter::with_io(io::Cursor::new("y\n"), Vec::new(), false);
        assert!(prompter.confirm("Sure? ").unwrap());
        assert!(prompter.read_line("> ").is_err());
    }

    #[test]
    fn test_error_text_colored_only_on_terminal() {
        let mut prompter = TerminalPrompter::with_io(io::Cursor::new(""), Vec::new(), false);
        assert_eq!(prompter.error_text("Unknown command."), "Unknown command.");

        prompter.colored = true;
        let colored = prompter.error_text("Unknown command.");
        assert!(colored.starts_with(crate::shell::highlighter::colors::BRIGHT_RED));
        assert!(colored.contains("Unknown command."));
    }

    #[test]
    fn test_scripted_prompter_runs_dry() {
        let mut prompter = ScriptedPrompter::new(&[]);
        assert!(prompter.read_line("> ").is_err());
    }
}
