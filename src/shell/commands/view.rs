//! View command implementation.

use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to list every entry.
pub struct ViewCommand;

impl Command for ViewCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::View
    }

    fn description(&self) -> &str {
        "List all entries"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        let entries = &ctx.user.entries;
        if entries.is_empty() {
            return CommandResult::success("No entries stored.");
        }

        let output = entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        log::debug!("Listed {} entries", entries.len());
        CommandResult::success(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testing::Fixture;

    #[test]
    fn test_view_empty() {
        let mut fixture = Fixture::new(&[], &[]);
        let result = ViewCommand.execute(&mut fixture.ctx());
        assert_eq!(result, CommandResult::success("No entries stored."));
    }

    #[test]
    fn test_view_sorted() {
        let mut fixture = Fixture::new(
            &[
                ("mail", "zed", "1"),
                ("bank", "bob", "2"),
                ("mail", "amy", "3"),
            ],
            &[],
        );

        match ViewCommand.execute(&mut fixture.ctx()) {
            CommandResult::Success(Some(msg)) => {
                let lines: Vec<&str> = msg.lines().collect();
                assert_eq!(lines, vec!["bank - bob", "mail - amy", "mail - zed"]);
            }
            other => panic!("Expected listing, got {:?}", other),
        }
    }
}
