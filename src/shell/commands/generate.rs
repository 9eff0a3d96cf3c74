//! Generate command implementation.

use crate::generator::{generate_password, parse_length};
use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to put a fresh random password on the clipboard.
///
/// The password is never printed.
pub struct GenerateCommand;

impl Command for GenerateCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Generate
    }

    fn description(&self) -> &str {
        "Copy a random password to the clipboard"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        let length = loop {
            let input = match ctx.prompter.read_line("Length: ") {
                Ok(input) => input,
                Err(e) => return CommandResult::error(e.to_string()),
            };
            match parse_length(&input) {
                Some(length) => break length,
                None => ctx.prompter.notify("Invalid length."),
            }
        };

        let password = match generate_password(length, &[]) {
            Ok(password) => password,
            Err(e) => return CommandResult::error(e.to_string()),
        };

        match ctx.clipboard.copy(&password) {
            Ok(()) => {
                log::info!("Generated a {} character password", length);
                CommandResult::success("Generated password copied to clipboard.")
            }
            Err(e) => {
                log::error!("Clipboard copy failed: {:#}", e);
                CommandResult::error(format!("Could not copy to clipboard: {:#}", e))
            }
        }
    }
}
