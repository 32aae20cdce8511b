//! Durable entry collection
//!
//! The store keeps the in-memory collection and its storage slot in step:
//! every mutation serializes the next collection, writes it, and only then
//! swaps it in. A failed write leaves memory exactly as it was.

use crate::application::events::{ChangeEvent, ChangeNotifier};
use crate::domain::{EntryCollection, EntryId, JournalEntry};
use crate::error::Result;
use crate::infrastructure::KeyValueStore;

/// Single source of truth for the journal entries
#[derive(Debug)]
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    key: String,
    entries: EntryCollection,
    notifier: ChangeNotifier,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Load the collection from `key`
    ///
    /// A missing or unreadable slot yields an empty collection. Entries that
    /// fail to parse are skipped; in that case the raw payload is copied to
    /// [`unreadable_key`] first so the next write cannot destroy it.
    pub fn load(mut storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let Loaded { entries, damaged } = read_collection(&storage, &key);
        if let Some(raw) = damaged {
            let backup = unreadable_key(&key);
            match storage.write(&backup, &raw) {
                Ok(()) => tracing::warn!(key = %key, backup = %backup, "kept unreadable payload"),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "could not keep unreadable payload")
                }
            }
        }
        tracing::debug!(key = %key, count = entries.len(), "loaded entries");

        EntryStore {
            storage,
            key,
            entries,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    pub fn get(&self, id: &EntryId) -> Option<&JournalEntry> {
        self.entries.get(id)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.notifier.subscribe(observer);
    }

    /// Write the whole collection to storage, overwriting the slot
    pub fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.entries)?;
        self.write_payload(&payload, self.entries.len())
    }

    /// Replace the entry with the same id in place, or prepend a new one
    pub fn upsert(&mut self, entry: JournalEntry) -> Result<&EntryCollection> {
        let id = entry.id.clone();
        let mut next = self.entries.clone();
        let outcome = next.upsert(entry);

        self.commit(next)?;
        tracing::info!(id = %id, ?outcome, "saved entry");
        self.notifier.notify(&ChangeEvent::EntrySaved { id, outcome });

        Ok(&self.entries)
    }

    /// Delete the entry with `id`; unknown ids leave the collection unchanged
    pub fn remove(&mut self, id: &EntryId) -> Result<&EntryCollection> {
        let mut next = self.entries.clone();
        let removed = next.remove(id).is_some();

        self.commit(next)?;
        if removed {
            tracing::info!(id = %id, "removed entry");
            self.notifier
                .notify(&ChangeEvent::EntryRemoved { id: id.clone() });
        }

        Ok(&self.entries)
    }

    fn commit(&mut self, next: EntryCollection) -> Result<()> {
        let payload = serde_json::to_string(&next)?;
        self.write_payload(&payload, next.len())?;
        self.entries = next;
        Ok(())
    }

    fn write_payload(&mut self, payload: &str, count: usize) -> Result<()> {
        self.storage.write(&self.key, payload)?;
        tracing::debug!(key = %self.key, count, "persisted entries");
        Ok(())
    }
}

/// Slot that receives a stored payload the loader could not fully read
pub fn unreadable_key(key: &str) -> String {
    format!("{}-unreadable", key)
}

struct Loaded {
    entries: EntryCollection,
    /// Raw payload, kept when some or all of it had to be dropped
    damaged: Option<String>,
}

fn read_collection<S: KeyValueStore>(storage: &S, key: &str) -> Loaded {
    let payload = match storage.read(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            return Loaded {
                entries: EntryCollection::new(),
                damaged: None,
            }
        }
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "could not read stored entries, starting empty");
            return Loaded {
                entries: EntryCollection::new(),
                damaged: None,
            };
        }
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&payload) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "stored entries are corrupt, starting empty");
            return Loaded {
                entries: EntryCollection::new(),
                damaged: Some(payload),
            };
        }
    };

    let mut entries = Vec::with_capacity(values.len());
    let mut skipped = 0;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<JournalEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                skipped += 1;
                tracing::warn!(key = %key, index, error = %e, "skipping unreadable stored entry");
            }
        }
    }

    Loaded {
        entries: EntryCollection::from(entries),
        damaged: (skipped > 0).then_some(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mood, UpsertOutcome};
    use crate::error::VaultError;
    use crate::infrastructure::storage::DEFAULT_STORAGE_KEY;
    use crate::infrastructure::MemoryStore;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entry(id: &str, title: &str) -> JournalEntry {
        let mut e = JournalEntry::blank(Utc::now());
        e.id = EntryId::from(id);
        e.title = title.to_string();
        e
    }

    fn empty_store() -> EntryStore<MemoryStore> {
        EntryStore::load(MemoryStore::new(), DEFAULT_STORAGE_KEY)
    }

    fn reload(store: EntryStore<MemoryStore>) -> EntryStore<MemoryStore> {
        let key = store.key().to_string();
        EntryStore::load(store.into_storage(), key)
    }

    /// Storage whose writes always fail, as if the quota were exhausted
    #[derive(Debug, Default)]
    struct FullStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for FullStore {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(VaultError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_load_empty_when_no_slot() {
        let store = empty_store();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_load_corrupt_payload_is_empty() {
        let storage = MemoryStore::new().with_slot(DEFAULT_STORAGE_KEY, "{not json");
        let store = EntryStore::load(storage, DEFAULT_STORAGE_KEY);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_load_corrupt_payload_is_kept_aside() {
        let storage = MemoryStore::new().with_slot(DEFAULT_STORAGE_KEY, "{not json");
        let mut store = EntryStore::load(storage, DEFAULT_STORAGE_KEY);
        store.upsert(entry("a", "fresh")).unwrap();

        assert_eq!(
            store.storage().slot(&unreadable_key(DEFAULT_STORAGE_KEY)),
            Some("{not json")
        );
    }

    #[test]
    fn test_unknown_mood_does_not_lose_entries() {
        let json = r#"[
            {"id":"1","title":"Morning","content":"","mood":"happy","date":"2025-01-17T08:00:00.000Z"},
            {"id":"2","title":"Kept for years","content":"","mood":"excited","date":"2025-01-16T08:00:00.000Z"}
        ]"#;
        let storage = MemoryStore::new().with_slot(DEFAULT_STORAGE_KEY, json);
        let mut store = EntryStore::load(storage, DEFAULT_STORAGE_KEY);

        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.get(&EntryId::from("2")).unwrap().mood, Mood::Neutral);

        store.upsert(entry("3", "new")).unwrap();
        let store = reload(store);
        assert_eq!(store.entries().len(), 3);
        assert_eq!(
            store.get(&EntryId::from("2")).unwrap().title,
            "Kept for years"
        );
        assert!(store
            .storage()
            .slot(&unreadable_key(DEFAULT_STORAGE_KEY))
            .is_none());
    }

    #[test]
    fn test_malformed_entry_is_skipped_and_payload_kept() {
        let json = r#"[
            {"id":"1","title":"Morning","mood":"happy","date":"2025-01-17T08:00:00.000Z"},
            {"id":"2","title":"No date"},
            {"id":"3","title":"Evening","mood":"down","date":"2025-01-17T20:00:00.000Z"}
        ]"#;
        let storage = MemoryStore::new().with_slot(DEFAULT_STORAGE_KEY, json);
        let mut store = EntryStore::load(storage, DEFAULT_STORAGE_KEY);

        assert_eq!(store.entries().len(), 2);
        assert!(store.get(&EntryId::from("2")).is_none());
        assert_eq!(store.entries().as_slice()[1].title, "Evening");

        store.upsert(entry("4", "new")).unwrap();
        assert_eq!(
            store.storage().slot(&unreadable_key(DEFAULT_STORAGE_KEY)),
            Some(json)
        );
    }

    #[test]
    fn test_load_existing_payload() {
        let json = r#"[
            {"id":"2","title":"Night","content":"","mood":"ominous","image":null,"date":"2025-01-17T21:00:00.000Z"},
            {"id":"1","title":"Morning","content":"","mood":"happy","date":"2025-01-17T08:00:00.000Z"}
        ]"#;
        let storage = MemoryStore::new().with_slot(DEFAULT_STORAGE_KEY, json);
        let store = EntryStore::load(storage, DEFAULT_STORAGE_KEY);

        assert_eq!(store.entries().len(), 2);
        let night = store.get(&EntryId::from("2")).unwrap();
        assert_eq!(night.mood, Mood::Gloomy);
        assert_eq!(store.entries().as_slice()[1].title, "Morning");
    }

    #[test]
    fn test_upsert_persists_immediately() {
        let mut store = empty_store();
        store.upsert(entry("a", "first")).unwrap();

        let raw = store.storage().slot(DEFAULT_STORAGE_KEY).unwrap();
        assert!(raw.contains("\"first\""));
    }

    #[test]
    fn test_upsert_new_id_goes_first() {
        let mut store = empty_store();
        store.upsert(entry("a", "first")).unwrap();
        let entries = store.upsert(entry("b", "second")).unwrap();

        assert_eq!(entries.as_slice()[0].id.as_str(), "b");
    }

    #[test]
    fn test_upsert_twice_is_idempotent_across_reload() {
        let mut store = empty_store();
        store.upsert(entry("a", "first")).unwrap();
        store.upsert(entry("b", "second")).unwrap();
        store.upsert(entry("a", "first, edited")).unwrap();
        store.upsert(entry("a", "first, edited")).unwrap();

        let store = reload(store);
        let entries = store.entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.position(&EntryId::from("a")), Some(1));
        assert_eq!(
            store.get(&EntryId::from("a")).unwrap().title,
            "first, edited"
        );
    }

    #[test]
    fn test_remove_then_remove_again() {
        let mut store = empty_store();
        store.upsert(entry("a", "first")).unwrap();
        store.upsert(entry("b", "second")).unwrap();

        assert_eq!(store.remove(&EntryId::from("a")).unwrap().len(), 1);
        assert_eq!(store.remove(&EntryId::from("a")).unwrap().len(), 1);

        let store = reload(store);
        assert_eq!(store.entries().len(), 1);
        assert!(store.get(&EntryId::from("b")).is_some());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = empty_store();
        store.upsert(entry("a", "first")).unwrap();

        let entries = store.remove(&EntryId::from("missing")).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_failure_leaves_memory_unchanged() {
        let mut store = EntryStore::load(FullStore::default(), DEFAULT_STORAGE_KEY);

        let err = store.upsert(entry("a", "first")).unwrap_err();
        assert!(matches!(err, VaultError::Storage(_)));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_notifies_observers() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = empty_store();
        let sink = Rc::clone(&events);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        store.upsert(entry("a", "first")).unwrap();
        store.upsert(entry("a", "again")).unwrap();
        store.remove(&EntryId::from("a")).unwrap();
        store.remove(&EntryId::from("a")).unwrap();

        let events = events.borrow();
        assert_eq!(
            *events,
            vec![
                ChangeEvent::EntrySaved {
                    id: EntryId::from("a"),
                    outcome: UpsertOutcome::Inserted
                },
                ChangeEvent::EntrySaved {
                    id: EntryId::from("a"),
                    outcome: UpsertOutcome::Replaced
                },
                ChangeEvent::EntryRemoved {
                    id: EntryId::from("a")
                },
            ]
        );
    }

    #[test]
    fn test_persist_writes_current_collection() {
        let storage = MemoryStore::new().with_slot(DEFAULT_STORAGE_KEY, "garbage");
        let mut store = EntryStore::load(storage, DEFAULT_STORAGE_KEY);

        store.persist().unwrap();
        assert_eq!(store.storage().slot(DEFAULT_STORAGE_KEY), Some("[]"));
    }
}
