//! Change notifications for the presentation layer

use crate::domain::{EntryId, Mode, UpsertOutcome};
use std::fmt;

/// Something observable changed in the store or the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// An entry was written to the collection
    EntrySaved { id: EntryId, outcome: UpsertOutcome },
    /// An entry was removed from the collection
    EntryRemoved { id: EntryId },
    /// The active draft was replaced by a new or opened entry
    DraftReplaced { id: EntryId, mode: Mode },
    /// A field of the active draft changed
    DraftEdited { id: EntryId, field: &'static str },
    /// The active draft switched between editing and viewing
    ModeChanged { id: EntryId, mode: Mode },
}

type Observer = Box<dyn FnMut(&ChangeEvent)>;

/// Fan-out of change events to registered observers, in registration order
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<Observer>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn notify(&mut self, event: &ChangeEvent) {
        for observer in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}
