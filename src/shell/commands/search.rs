//! Search command implementation.

use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to find entries by service or username.
pub struct SearchCommand;

impl Command for SearchCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Search
    }

    fn description(&self) -> &str {
        "Find entries by service or username"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        let query = match ctx.prompter.read_line("Search: ") {
            Ok(query) => query,
            Err(e) => return CommandResult::error(e.to_string()),
        };

        let found = ctx.user.entries.search(&query);
        log::debug!("Search matched {} entries", found.len());

        if found.is_empty() {
            return CommandResult::success("No matching entries.");
        }
        CommandResult::success(
            found
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
