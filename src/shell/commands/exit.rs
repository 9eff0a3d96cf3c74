//! Exit command implementation.

use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to save and leave the shell.
pub struct ExitCommand;

impl Command for ExitCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Exit
    }

    fn description(&self) -> &str {
        "Save and exit"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        match ctx.save() {
            CommandResult::Success(msg) => {
                if let Some(msg) = msg {
                    ctx.prompter.notify(&msg);
                }
                log::info!("User requested exit");
                CommandResult::Exit
            }
            // Stay in the shell so nothing is lost.
            other => other,
        }
    }
}
