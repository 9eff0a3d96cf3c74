//! Save command implementation.

use crate::shell::command::{Command, CommandKind, CommandResult, ShellContext};

/// Command to write all entries to the user's store file.
pub struct SaveCommand;

impl Command for SaveCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Save
    }

    fn description(&self) -> &str {
        "Save all entries"
    }

    fn execute(&self, ctx: &mut ShellContext) -> CommandResult {
        ctx.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testing::Fixture;

    #[test]
    fn test_save_overwrites_file() {
        let mut fixture = Fixture::new(&[("mail", "me", "pw"), ("bank", "me", "pin")], &[]);
        std::fs::write(&fixture.profile, "stale, old, content").unwrap();

        let result = SaveCommand.execute(&mut fixture.ctx());
        assert_eq!(result, CommandResult::success("All changes saved."));
        assert_eq!(
            std::fs::read_to_string(&fixture.profile).unwrap(),
            "bank, me, pin\nmail, me, pw"
        );
    }
}
