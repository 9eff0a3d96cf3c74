//! Command trait, command names and the registry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::clipboard::Clipboard;
use crate::console::Prompter;
use crate::user::User;

/// The fixed set of commands understood by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandKind {
    View,
    Search,
    New,
    Update,
    Generate,
    Save,
    Load,
    Exit,
}

impl CommandKind {
    pub const ALL: [CommandKind; 8] = [
        CommandKind::View,
        CommandKind::Search,
        CommandKind::New,
        CommandKind::Update,
        CommandKind::Generate,
        CommandKind::Save,
        CommandKind::Load,
        CommandKind::Exit,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::View => "VIEW",
            CommandKind::Search => "SEARCH",
            CommandKind::New => "NEW",
            CommandKind::Update => "UPDATE",
            CommandKind::Generate => "GENERATE",
            CommandKind::Save => "SAVE",
            CommandKind::Load => "LOAD",
            CommandKind::Exit => "EXIT",
        }
    }

    /// Resolves raw user input to a command.
    pub fn parse(input: &str) -> Option<CommandKind> {
        input.parse().ok()
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when input does not name a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command '{}'", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for CommandKind {
    type Err = UnknownCommand;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(input);
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or(UnknownCommand(normalized))
    }
}

/// Upper-cases, trims and replaces inner spaces with underscores.
pub fn normalize(input: &str) -> String {
    input.to_uppercase().trim().replace(' ', "_")
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
    /// Continue without output.
    Continue,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }
}

/// Everything a command may touch while it runs.
pub struct ShellContext<'a> {
    /// The logged-in user and their entries.
    pub user: &'a mut User,
    /// The user's store file.
    pub profile: &'a Path,
    pub prompter: &'a mut dyn Prompter,
    pub clipboard: &'a mut dyn Clipboard,
}

impl<'a> ShellContext<'a> {
    pub fn new(
        user: &'a mut User,
        profile: &'a Path,
        prompter: &'a mut dyn Prompter,
        clipboard: &'a mut dyn Clipboard,
    ) -> Self {
        Self {
            user,
            profile,
            prompter,
            clipboard,
        }
    }

    /// Writes the user's entries to their store file.
    pub fn save(&mut self) -> CommandResult {
        match self.user.save(self.profile) {
            Ok(()) => CommandResult::success("All changes saved."),
            Err(e) => {
                log::error!("Failed to save {}: {}", self.profile.display(), e);
                CommandResult::error(format!("Failed to save: {}", e))
            }
        }
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Which command this handler implements.
    fn kind(&self) -> CommandKind;

    /// Returns a short description of the command.
    fn description(&self) -> &str;

    /// Runs the command against the session.
    fn execute(&self, ctx: &mut ShellContext) -> CommandResult;
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("kind", &self.kind())
            .field("description", &self.description())
            .finish()
    }
}

/// Maps each command to its handler.
pub struct CommandRegistry {
    commands: BTreeMap<CommandKind, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registers a handler, replacing any previous handler for the same kind.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.kind(), command);
    }

    pub fn get(&self, kind: CommandKind) -> Option<Arc<dyn Command>> {
        self.commands.get(&kind).map(Arc::clone)
    }

    /// Looks up raw user input.
    pub fn lookup(&self, input: &str) -> Option<Arc<dyn Command>> {
        CommandKind::parse(input).and_then(|kind| self.get(kind))
    }

    /// Lower-case command names starting with `prefix`, ignoring case.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.commands
            .keys()
            .map(|kind| kind.name().to_lowercase())
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
