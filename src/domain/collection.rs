//! Ordered, id-unique collection of journal entries

use crate::domain::{EntryId, JournalEntry};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// What an upsert did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New id, placed at the front
    Inserted,
    /// Existing id, replaced at its original position
    Replaced,
}

/// Entries in display order, newest insert first
///
/// Serialized as a bare JSON array. Ids are unique; a payload that
/// contains duplicates keeps the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryCollection {
    entries: Vec<JournalEntry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JournalEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.position(id).is_some()
    }

    /// Replace in place when the id exists, otherwise prepend
    pub fn upsert(&mut self, entry: JournalEntry) -> UpsertOutcome {
        match self.position(&entry.id) {
            Some(index) => {
                self.entries[index] = entry;
                UpsertOutcome::Replaced
            }
            None => {
                self.entries.insert(0, entry);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Remove the entry with `id`, if any
    pub fn remove(&mut self, id: &EntryId) -> Option<JournalEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }
}

impl From<Vec<JournalEntry>> for EntryCollection {
    fn from(entries: Vec<JournalEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect();
        EntryCollection { entries }
    }
}

impl<'de> Deserialize<'de> for EntryCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<JournalEntry>::deserialize(deserializer).map(EntryCollection::from)
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(id: &str, title: &str) -> JournalEntry {
        let mut e = JournalEntry::blank(Utc::now());
        e.id = EntryId::from(id);
        e.title = title.to_string();
        e
    }

    #[test]
    fn test_upsert_new_goes_to_front() {
        let mut c = EntryCollection::new();
        assert_eq!(c.upsert(entry("a", "first")), UpsertOutcome::Inserted);
        assert_eq!(c.upsert(entry("b", "second")), UpsertOutcome::Inserted);

        assert_eq!(c.len(), 2);
        assert_eq!(c.as_slice()[0].id.as_str(), "b");
        assert_eq!(c.as_slice()[1].id.as_str(), "a");
    }

    #[test]
    fn test_upsert_existing_keeps_position() {
        let mut c = EntryCollection::new();
        c.upsert(entry("a", "first"));
        c.upsert(entry("b", "second"));
        c.upsert(entry("c", "third"));

        assert_eq!(c.upsert(entry("b", "edited")), UpsertOutcome::Replaced);

        assert_eq!(c.len(), 3);
        assert_eq!(c.position(&EntryId::from("b")), Some(1));
        assert_eq!(c.as_slice()[1].title, "edited");
    }

    #[test]
    fn test_remove() {
        let mut c = EntryCollection::new();
        c.upsert(entry("a", "first"));
        c.upsert(entry("b", "second"));

        let removed = c.remove(&EntryId::from("a")).unwrap();
        assert_eq!(removed.title, "first");
        assert_eq!(c.len(), 1);

        assert!(c.remove(&EntryId::from("a")).is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_deserialize_drops_duplicate_ids() {
        let first = entry("a", "kept");
        let second = entry("a", "dropped");
        let json = serde_json::to_string(&vec![first, second]).unwrap();

        let c: EntryCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.as_slice()[0].title, "kept");
    }

    #[test]
    fn test_serializes_as_array() {
        let mut c = EntryCollection::new();
        c.upsert(entry("a", "first"));
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "a");
    }
}
