//! Login credentials and the approved-user allow-list.

use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::storage::{self, Record};

/// A `(username, password)` pair, compared field by field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Record for LoginCredentials {
    const FIELDS: usize = 2;

    fn from_fields(fields: &[&str]) -> Self {
        LoginCredentials::new(fields[0], fields[1])
    }

    fn to_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.password.as_str()]
    }
}

/// The set of credentials allowed to log in. Read once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ApprovedUsers {
    users: HashSet<LoginCredentials>,
}

impl ApprovedUsers {
    pub fn new(users: impl IntoIterator<Item = LoginCredentials>) -> Self {
        Self {
            users: users.into_iter().collect(),
        }
    }

    /// Reads the allow-list from a store file.
    pub fn load(path: &Path) -> Result<Self> {
        let users: Vec<LoginCredentials> = storage::load(path)?;
        log::debug!("Loaded {} approved users", users.len());
        Ok(Self::new(users))
    }

    /// Exact match on both username and password.
    pub fn contains(&self, credentials: &LoginCredentials) -> bool {
        self.users.contains(credentials)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_contains_is_exact() {
        let approved = ApprovedUsers::new(vec![LoginCredentials::new("alice", "secret")]);

        assert!(approved.contains(&LoginCredentials::new("alice", "secret")));
        assert!(!approved.contains(&LoginCredentials::new("alice", "Secret")));
        assert!(!approved.contains(&LoginCredentials::new("Alice", "secret")));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("approvedUsers.txt");
        std::fs::write(&path, "alice, secret\nbob, hunter2\nalice, secret").unwrap();

        let approved = ApprovedUsers::load(&path).unwrap();
        assert_eq!(approved.len(), 2);
        assert!(approved.contains(&LoginCredentials::new("bob", "hunter2")));
    }

    #[test]
    fn test_load_rejects_malformed_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("approvedUsers.txt");
        std::fs::write(&path, "alice secret").unwrap();

        assert!(ApprovedUsers::load(&path).is_err());
    }
}
