//! The per-user collection of entries.

use std::collections::BTreeMap;
use std::path::Path;

use crate::entry::{Entry, EntryKey};
use crate::error::Result;
use crate::storage;

/// Entries keyed by identity, iterated in `(service, username)` order.
#[derive(Debug, Clone, Default)]
pub struct EntryCollection {
    entries: BTreeMap<EntryKey, Entry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns true if an entry with the same identity exists.
    pub fn contains(&self, candidate: &Entry) -> bool {
        self.entries.contains_key(&candidate.key())
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Inserts the entry, replacing any entry with the same identity.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn upsert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.key(), entry)
    }

    /// Replaces an existing entry. Returns false and changes nothing if absent.
    pub fn update(&mut self, entry: Entry) -> bool {
        match self.entries.get_mut(&entry.key()) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => false,
        }
    }

    /// Entries for which `predicate` holds, in collection order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&Entry>
    where
        P: Fn(&Entry) -> bool,
    {
        self.entries.values().filter(|&e| predicate(e)).collect()
    }

    /// Entries whose service or username contains `query`, ignoring case.
    ///
    /// Prefix matches come first, then the remaining substring matches. Both
    /// groups keep collection order.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        let (mut ranked, rest): (Vec<&Entry>, Vec<&Entry>) = self
            .filter(|e| e.matches(query))
            .into_iter()
            .partition(|e| e.starts_with(query));
        ranked.extend(rest);
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a collection from a store file.
    ///
    /// Later lines win when a file repeats an identity.
    pub fn load(path: &Path) -> Result<Self> {
        let entries: Vec<Entry> = storage::load(path)?;
        Ok(entries.into_iter().collect())
    }

    /// Overwrites the store file with the whole collection.
    pub fn save(&self, path: &Path) -> Result<()> {
        storage::save(path, self.iter())
    }
}

impl FromIterator<Entry> for EntryCollection {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut collection = EntryCollection::new();
        for entry in iter {
            collection.upsert(entry);
        }
        collection
    }
}
