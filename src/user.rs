//! The logged-in account and its profile file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::entries::EntryCollection;
use crate::error::Result;

/// Extension used for every store file.
pub const EXTENSION: &str = "txt";

/// An authenticated user and the entries they own.
///
/// Users compare by name only.
#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub entries: EntryCollection,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: EntryCollection::new(),
        }
    }

    pub fn with_entries(name: impl Into<String>, entries: EntryCollection) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Location of this user's store file under `base_dir`.
    pub fn profile_path(&self, base_dir: &Path) -> PathBuf {
        profile_path(base_dir, &self.name)
    }

    /// Loads a user's entries from their store file.
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self> {
        let name = name.into();
        let entries = EntryCollection::load(path)?;
        log::info!("Loaded {} entries for {}", entries.len(), name);
        Ok(Self::with_entries(name, entries))
    }

    /// Writes every entry to the store file, replacing its contents.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.entries.save(path)?;
        log::info!("Saved {} entries for {}", self.entries.len(), self.name);
        Ok(())
    }

    /// Replaces the in-memory entries with the store file's contents.
    ///
    /// On error the current entries are left untouched.
    pub fn reload(&mut self, path: &Path) -> Result<()> {
        self.entries = EntryCollection::load(path)?;
        log::info!("Reloaded {} entries for {}", self.entries.len(), self.name);
        Ok(())
    }
}

/// Location of `name`'s store file under `base_dir`.
pub fn profile_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir.join(format!("{}.{}", name, EXTENSION))
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for User {}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use tempfile::TempDir;

    #[test]
    fn test_equality_by_name() {
        let mut a = User::new("alice");
        a.entries.upsert(Entry::new("mail", "a", "p"));
        assert_eq!(a, User::new("alice"));
        assert_ne!(a, User::new("bob"));
    }

    #[test]
    fn test_profile_path() {
        let user = User::new("alice");
        assert_eq!(
            user.profile_path(Path::new("/base")),
            PathBuf::from("/base/alice.txt")
        );
    }

    #[test]
    fn test_reload_keeps_entries_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("alice.txt");
        std::fs::write(&path, "broken line").unwrap();

        let mut user = User::new("alice");
        user.entries.upsert(Entry::new("mail", "a", "p"));

        assert!(user.reload(&path).is_err());
        assert_eq!(user.entries.len(), 1);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let mut user = User::new("alice");
        user.entries.upsert(Entry::new("mail", "a", "p"));
        let path = user.profile_path(temp_dir.path());

        user.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "mail, a, p");

        let loaded = User::load("alice", &path).unwrap();
        assert_eq!(loaded.entries.len(), 1);
    }
}
