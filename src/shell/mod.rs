//! Shell module - rustyline-based command interpreter.
//!
//! This module provides the interactive loop with:
//! - Command completion
//! - Syntax highlighting
//! - Command history
//! - Command hints

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;

use anyhow::{Result, anyhow};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use crate::clipboard::Clipboard;
use crate::console::Prompter;
use crate::user::User;

use command::{CommandKind, CommandRegistry, CommandResult, ShellContext};
use commands::register_all;
use completer::ShellCompleter;
use highlighter::ShellHighlighter;
use hints::ShellHinter;
use history::HistoryConfig;

/// The prompt displayed to the user.
const PROMPT: &str = "password-manager> ";

/// Message for input that names no command.
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

/// Combined helper for rustyline that provides all shell features.
pub struct ShellHelper {
    completer: ShellCompleter,
    highlighter: ShellHighlighter,
    hinter: ShellHinter,
}

impl ShellHelper {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            completer: ShellCompleter::new(Arc::clone(&registry)),
            highlighter: ShellHighlighter::new(Arc::clone(&registry)),
            hinter: ShellHinter::new(registry),
        }
    }
}

impl Completer for ShellHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Where the shell reads command lines from.
pub trait LineSource {
    /// Reads the next line. `Interrupted` re-prompts and `Eof` ends the session.
    fn read_line(&mut self, prompt: &str) -> rustyline::Result<String>;

    /// Called once when the loop ends.
    fn finish(&mut self) {}
}

/// Line editor with completion, hints, highlighting and a history file.
pub struct LineEditor {
    editor: Editor<ShellHelper, FileHistory>,
    history: HistoryConfig,
}

impl LineEditor {
    pub fn new(registry: Arc<CommandRegistry>, history: HistoryConfig) -> Result<Self> {
        let mut editor: Editor<ShellHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(ShellHelper::new(registry)));
        editor.set_max_history_size(history.max_entries)?;

        if history.path.exists() {
            if let Err(e) = editor.load_history(&history.path) {
                log::warn!("Could not load history: {}", e);
            } else {
                log::debug!("Loaded history from {}", history.path.display());
            }
        }

        Ok(Self { editor, history })
    }
}

impl LineSource for LineEditor {
    fn read_line(&mut self, prompt: &str) -> rustyline::Result<String> {
        let line = self.editor.readline(prompt)?;
        if HistoryConfig::should_record(&line) {
            let _ = self.editor.add_history_entry(line.trim());
        }
        Ok(line)
    }

    fn finish(&mut self) {
        let path = &self.history.path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        if let Err(e) = self.editor.save_history(path) {
            log::warn!("Failed to save history: {}", e);
        } else {
            log::debug!("Saved history to {}", path.display());
        }
    }
}

/// Configuration for the shell.
pub struct ShellConfig {
    /// History configuration.
    pub history: HistoryConfig,
    /// Whether to show the welcome message.
    pub show_welcome: bool,
}

/// The interactive command interpreter.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    config: ShellConfig,
}

impl Shell {
    /// Creates a shell with all commands registered.
    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// Builds a line editor wired to this shell's commands and history.
    pub fn editor(&self) -> Result<LineEditor> {
        LineEditor::new(Arc::clone(&self.registry), self.config.history.clone())
    }

    /// Runs the interactive loop until `EXIT` (or end of input) succeeds.
    pub fn run(
        &self,
        lines: &mut dyn LineSource,
        user: &mut User,
        profile: &Path,
        prompter: &mut dyn Prompter,
        clipboard: &mut dyn Clipboard,
    ) -> Result<()> {
        log::info!("Shell started for {}", user.name);

        let mut ctx = ShellContext::new(user, profile, prompter, clipboard);
        if self.config.show_welcome {
            ctx.prompter.notify("Enter a command.");
        }

        let outcome = loop {
            match lines.read_line(PROMPT) {
                Ok(line) => {
                    let result = self.execute_line(&line, &mut ctx);
                    if Self::report(&mut ctx, result) {
                        break Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    log::debug!("Interrupted (Ctrl-C)");
                    ctx.prompter.notify("^C");
                }
                Err(ReadlineError::Eof) => {
                    log::info!("EOF received (Ctrl-D)");
                    ctx.prompter.notify("exit");
                    match self.execute(CommandKind::Exit, &mut ctx) {
                        CommandResult::Exit => break Ok(()),
                        other => {
                            Self::report(&mut ctx, other);
                            break Err(anyhow!("Input closed before entries could be saved"));
                        }
                    }
                }
                Err(err) => {
                    log::error!("Readline error: {}", err);
                    break Err(err.into());
                }
            }
        };

        lines.finish();
        log::info!("Shell exited");
        outcome
    }

    /// Shows a command's result. Returns true when the shell should stop.
    fn report(ctx: &mut ShellContext, result: CommandResult) -> bool {
        match result {
            CommandResult::Success(Some(msg)) => ctx.prompter.notify(&msg),
            CommandResult::Success(None) | CommandResult::Continue => {}
            CommandResult::Error(msg) => ctx.prompter.alert(&msg),
            CommandResult::Exit => return true,
        }
        false
    }

    /// Resolves a raw input line and runs the matching command.
    ///
    /// Blank input names no command and is reported like any other unknown word.
    pub fn execute_line(&self, line: &str, ctx: &mut ShellContext) -> CommandResult {
        match CommandKind::parse(line) {
            Some(kind) => self.execute(kind, ctx),
            None => {
                log::debug!("Unknown command: {:?}", line.trim());
                CommandResult::error(UNKNOWN_COMMAND)
            }
        }
    }

    /// Runs a command by kind.
    pub fn execute(&self, kind: CommandKind, ctx: &mut ShellContext) -> CommandResult {
        let Some(cmd) = self.registry.get(kind) else {
            return CommandResult::error(UNKNOWN_COMMAND);
        };

        log::debug!("Executing command: {}", kind);
        let start = std::time::Instant::now();
        let result = cmd.execute(ctx);
        log::debug!("Command '{}' completed in {:?}", kind, start.elapsed());
        result
    }
}
