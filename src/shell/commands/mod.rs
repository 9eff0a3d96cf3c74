//! Individual command implementations.

mod exit;
mod generate;
mod load;
mod new;
mod save;
mod search;
mod update;
mod view;

pub use exit::ExitCommand;
pub use generate::GenerateCommand;
pub use load::LoadCommand;
pub use new::NewCommand;
pub use save::SaveCommand;
pub use search::SearchCommand;
pub use update::UpdateCommand;
pub use view::ViewCommand;

use anyhow::Result;
use std::sync::Arc;

use super::command::CommandRegistry;
use crate::console::Prompter;
use crate::entry::Entry;
use crate::storage;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(ViewCommand));
    registry.register(Arc::new(SearchCommand));
    registry.register(Arc::new(NewCommand));
    registry.register(Arc::new(UpdateCommand));
    registry.register(Arc::new(GenerateCommand));
    registry.register(Arc::new(SaveCommand));
    registry.register(Arc::new(LoadCommand));
    registry.register(Arc::new(ExitCommand));
}

/// Asks for the three fields of an entry. The password is read masked.
fn prompt_entry<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Entry> {
    let service = prompter.read_line("Service: ")?;
    let username = prompter.read_line("Username: ")?;
    let password = prompter.read_secret("Password: ")?;
    Ok(Entry::new(service, username, password))
}

/// Rejects values the store file could not read back.
fn check_storable(entry: &Entry) -> Result<(), String> {
    if entry.service.is_empty() {
        return Err("Service must not be empty.".to_string());
    }
    let fields = [&entry.service, &entry.username, &entry.password];
    if fields.iter().all(|f| storage::is_storable(f)) {
        Ok(())
    } else {
        Err(format!(
            "Values must not contain '{}' or line breaks.",
            storage::SEPARATOR
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_storable() {
        assert!(check_storable(&Entry::new("mail", "me", "p,w")).is_ok());
        assert!(check_storable(&Entry::new("", "me", "pw")).is_err());
        assert!(check_storable(&Entry::new("mail", "me", "a, b")).is_err());
        assert!(check_storable(&Entry::new("mail", "me\nyou", "pw")).is_err());
    }

    #[test]
    fn test_register_all_covers_every_command() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        for kind in crate::shell::command::CommandKind::ALL {
            assert!(registry.get(kind).is_some(), "missing {}", kind);
        }
    }
}
