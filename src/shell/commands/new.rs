//! New command implementation.

use super::{check_storable, prompt_entry};
use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

pub const OVERWRITE_PROMPT: &str =
    "An existing entry with the same name already exists. Update anyway? ";

/// Command to add an entry, confirming before it overwrites one.
pub struct NewCommand;

impl Command for NewCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::New
    }

    fn description(&self) -> &str {
        "Add a new entry"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        let entry = match prompt_entry(&mut *ctx.prompter) {
            Ok(entry) => entry,
            Err(e) => return CommandResult::error(e.to_string()),
        };
        if let Err(msg) = check_storable(&entry) {
            return CommandResult::error(format!("{}\nNo changes were made.", msg));
        }

        if ctx.user.entries.contains(&entry) {
            match ctx.prompter.confirm(OVERWRITE_PROMPT) {
                Ok(true) => {}
                Ok(false) => return CommandResult::success("No changes were made."),
                Err(e) => return CommandResult::error(e.to_string()),
            }
        }

        let message = format!("Added {} to {}", entry.service, ctx.user.name);
        log::info!("Adding entry for service {}", entry.service);
        ctx.user.entries.upsert(entry);
        CommandResult::success(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testing::Fixture;

    #[test]
    fn test_new_entry() {
        let mut fixture = Fixture::new(&[], &["github", "alice", "s3cret"]);

        let result = NewCommand.execute(&mut fixture.ctx());
        assert_eq!(result, CommandResult::success("Added github to alice"));
        assert_eq!(fixture.password("github", "alice"), Some("s3cret".into()));
        assert_eq!(
            fixture.prompter.prompts,
            vec!["Service: ", "Username: ", "Password: "]
        );
    }

    #[test]
    fn test_new_collision_confirmed() {
        let mut fixture = Fixture::new(
            &[("github", "alice", "old")],
            &["github", "alice", "new", "YES"],
        );

        let result = NewCommand.execute(&mut fixture.ctx());
        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert_eq!(fixture.password("github", "alice"), Some("new".into()));
        assert_eq!(fixture.user.entries.len(), 1);
        assert_eq!(fixture.prompter.prompts.last().unwrap(), OVERWRITE_PROMPT);
    }

    #[test]
    fn test_new_collision_declined() {
        let mut fixture = Fixture::new(
            &[("github", "alice", "old")],
            &["github", "alice", "new", "nah"],
        );

        let result = NewCommand.execute(&mut fixture.ctx());
        assert_eq!(result, CommandResult::success("No changes were made."));
        assert_eq!(fixture.password("github", "alice"), Some("old".into()));
    }

    #[test]
    fn test_new_rejects_separator() {
        let mut fixture = Fixture::new(&[], &["github", "alice", "a, b"]);

        let result = NewCommand.execute(&mut fixture.ctx());
        assert!(matches!(result, CommandResult::Error(_)));
        assert!(fixture.user.entries.is_empty());
    }
}
