//! A single stored credential.

use std::cmp::Ordering;
use std::fmt;

use crate::storage::Record;

/// Identity of an entry: the `(service, username)` pair.
///
/// Orders by service, then username, using plain byte-wise comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub service: String,
    pub username: String,
}

impl EntryKey {
    pub fn new(service: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            username: username.into(),
        }
    }
}

/// A `(service, username, password)` record.
///
/// Equality and ordering only look at the identity; the password is payload.
#[derive(Debug, Clone)]
pub struct Entry {
    pub service: String,
    pub username: String,
    pub password: String,
}

impl Entry {
    pub fn new(
        service: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the identity of this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.service.as_str(), self.username.as_str())
    }

    /// Case-insensitive substring match on service or username.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.service.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
    }

    /// Prefix match on service or username.
    ///
    /// Like [`Entry::matches`] this ignores case, so `"Net"` ranks `netflix`
    /// as a prefix hit. A case-sensitive prefix test would split such entries
    /// into the substring-only group.
    pub fn starts_with(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.service.to_lowercase().starts_with(&query)
            || self.username.to_lowercase().starts_with(&query)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.service == other.service && self.username == other.username
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.service
            .cmp(&other.service)
            .then_with(|| self.username.cmp(&other.username))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.service, self.username)
    }
}

impl Record for Entry {
    const FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Self {
        Entry::new(fields[0], fields[1], fields[2])
    }

    fn to_fields(&self) -> Vec<&str> {
        vec![
            self.service.as_str(),
            self.username.as_str(),
            self.password.as_str(),
        ]
    }
}
