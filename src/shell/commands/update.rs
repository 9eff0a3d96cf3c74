//! Update command implementation.

use super::{check_storable, prompt_entry};
use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to change the password of an existing entry.
pub struct UpdateCommand;

impl Command for UpdateCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Update
    }

    fn description(&self) -> &str {
        "Change the password of an existing entry"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        let entry = match prompt_entry(&mut *ctx.prompter) {
            Ok(entry) => entry,
            Err(e) => return CommandResult::error(e.to_string()),
        };
        if let Err(msg) = check_storable(&entry) {
            return CommandResult::error(format!("{}\nNo changes were made.", msg));
        }

        let message = format!("Updated {} in {}", entry.service, ctx.user.name);
        let service = entry.service.clone();
        if ctx.user.entries.update(entry) {
            log::info!("Updated entry for service {}", service);
            CommandResult::success(message)
        } else {
            log::debug!("No entry to update for service {}", service);
            CommandResult::error("The entry to update does not exist.\nNo changes were made.")
        }
    }
}
