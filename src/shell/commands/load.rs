//! Load command implementation.

use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to discard in-memory changes and re-read the store file.
pub struct LoadCommand;

impl Command for LoadCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Load
    }

    fn description(&self) -> &str {
        "Reload entries from disk"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        match ctx.user.reload(ctx.profile) {
            Ok(()) => CommandResult::success("Previous entries loaded."),
            Err(e) => {
                log::error!("Failed to load {}: {}", ctx.profile.display(), e);
                CommandResult::error(format!("Failed to load: {}", e))
            }
        }
    }
}
