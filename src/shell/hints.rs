//! Inline hints while typing a command.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::{CommandKind, CommandRegistry};

/// Suggests the rest of a command name, or its description once complete.
pub struct ShellHinter {
    registry: Arc<CommandRegistry>,
}

impl ShellHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn get_hint(&self, line: &str) -> Option<String> {
        let typed = line.trim();
        if typed.is_empty() || typed.contains(char::is_whitespace) {
            return None;
        }

        if let Some(kind) = CommandKind::parse(typed) {
            return self
                .registry
                .get(kind)
                .map(|cmd| format!("  {}", cmd.description()));
        }

        let completions = self.registry.completions(typed);
        if completions.len() != 1 {
            return None;
        }
        let rest = completions[0].get(typed.len()..)?;
        if typed.chars().all(|c| c.is_uppercase()) {
            Some(rest.to_uppercase())
        } else {
            Some(rest.to_string())
        }
    }
}

impl Hinter for ShellHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        // Only hint if cursor is at end of line
        if pos < line.len() {
            return None;
        }

        self.get_hint(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_hinter() -> ShellHinter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        ShellHinter::new(Arc::new(registry))
    }

    #[test]
    fn test_command_completion_hint() {
        let hinter = setup_hinter();
        assert_eq!(hinter.get_hint("vi"), Some("ew".to_string()));
        assert_eq!(hinter.get_hint("GEN"), Some("ERATE".to_string()));
    }

    #[test]
    fn test_description_for_complete_command() {
        let hinter = setup_hinter();
        let hint = hinter.get_hint("search").unwrap();
        assert!(hint.contains("Find entries"));
    }

    #[test]
    fn test_no_hint_when_ambiguous_or_empty() {
        let hinter = setup_hinter();
        assert!(hinter.get_hint("").is_none());
        assert!(hinter.get_hint("   ").is_none());
        // save and search
        assert!(hinter.get_hint("s").is_none());
        assert!(hinter.get_hint("new entry").is_none());
    }
}
