//! Active draft and edit/view mode
//!
//! The session always holds exactly one draft. Opening an entry copies it
//! out of the store; nothing reaches storage until [`EditorSession::save`].

use crate::application::entry_store::EntryStore;
use crate::application::events::{ChangeEvent, ChangeNotifier};
use crate::domain::{EntryField, EntryId, JournalEntry, Mode};
use crate::error::Result;
use crate::infrastructure::{EncodedImage, ImageIngest, ImageTask, KeyValueStore};
use chrono::Utc;
use std::path::Path;

/// What happened to a pending image encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    /// The image was attached to the current draft
    Applied,
    /// The draft changed (or the task was cancelled) before the image arrived
    Discarded,
    /// No encode was in flight
    NoPending,
}

#[derive(Debug)]
pub struct EditorSession<S: KeyValueStore> {
    store: EntryStore<S>,
    draft: JournalEntry,
    mode: Mode,
    pending_image: Option<ImageTask>,
    notifier: ChangeNotifier,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Wrap a loaded store, starting on a blank draft
    pub fn new(store: EntryStore<S>) -> Self {
        EditorSession {
            store,
            draft: JournalEntry::blank(Utc::now()),
            mode: Mode::Editing,
            pending_image: None,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn draft(&self) -> &JournalEntry {
        &self.draft
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    /// True when the draft's id is already in the collection
    pub fn is_draft_saved(&self) -> bool {
        self.store.get(&self.draft.id).is_some()
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.notifier.subscribe(observer);
    }

    /// Replace the draft with a blank entry and start editing it
    pub fn start_new(&mut self) {
        self.cancel_pending_image();
        self.draft = JournalEntry::blank(Utc::now());
        self.mode = Mode::Editing;
        tracing::debug!(id = %self.draft.id, "started new draft");
        self.notify_draft_replaced();
    }

    /// Copy a stored entry into the draft for viewing
    ///
    /// Returns `false` and changes nothing when `id` is unknown.
    pub fn open(&mut self, id: &EntryId) -> bool {
        let Some(entry) = self.store.get(id).cloned() else {
            tracing::debug!(id = %id, "open ignored, no such entry");
            return false;
        };

        self.cancel_pending_image();
        self.draft = entry;
        self.mode = Mode::Viewing;
        self.notify_draft_replaced();
        true
    }

    /// Change one field of the draft; storage is untouched until `save`
    pub fn update_field(&mut self, field: EntryField) {
        let name = field.name();
        self.draft.apply(field);
        self.notifier.notify(&ChangeEvent::DraftEdited {
            id: self.draft.id.clone(),
            field: name,
        });
    }

    /// Commit the draft to the store and switch to viewing
    pub fn save(&mut self) -> Result<()> {
        self.store.upsert(self.draft.clone())?;
        self.set_mode(Mode::Viewing);
        Ok(())
    }

    /// Remove an entry; deleting the draft's own entry starts a new draft
    ///
    /// Callers are expected to confirm with the user first.
    pub fn delete(&mut self, id: &EntryId) -> Result<()> {
        self.store.remove(id)?;
        if &self.draft.id == id {
            self.start_new();
        }
        Ok(())
    }

    /// Reopen the current draft for editing without touching its fields
    pub fn enter_edit_mode(&mut self) {
        self.set_mode(Mode::Editing);
    }

    /// Start encoding `path` for the current draft
    ///
    /// Oversized or unsupported files are rejected immediately and the
    /// draft's image is left as it was. A previous pending encode is
    /// cancelled.
    pub fn attach_image(&mut self, path: &Path, ingest: &ImageIngest) -> Result<()> {
        let task = ingest.start(path, self.draft.id.clone())?;
        if let Some(previous) = self.pending_image.replace(task) {
            previous.cancel();
        }
        Ok(())
    }

    /// Wait for the pending encode and attach it if the draft is unchanged
    pub fn finish_image(&mut self) -> Result<ImageOutcome> {
        let Some(task) = self.pending_image.take() else {
            return Ok(ImageOutcome::NoPending);
        };

        let applied = match task.wait()? {
            Some(image) => self.apply_image(image),
            None => false,
        };

        if applied {
            Ok(ImageOutcome::Applied)
        } else {
            Ok(ImageOutcome::Discarded)
        }
    }

    /// Attach an encoded image if it was produced for the current draft
    pub fn apply_image(&mut self, image: EncodedImage) -> bool {
        if image.draft_id != self.draft.id {
            tracing::debug!(
                image_for = %image.draft_id,
                draft = %self.draft.id,
                "discarding image for a replaced draft"
            );
            return false;
        }

        self.update_field(EntryField::Image(Some(image.data_uri)));
        true
    }

    fn cancel_pending_image(&mut self) {
        if let Some(task) = &self.pending_image {
            task.cancel();
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.notifier.notify(&ChangeEvent::ModeChanged {
            id: self.draft.id.clone(),
            mode,
        });
    }

    fn notify_draft_replaced(&mut self) {
        self.notifier.notify(&ChangeEvent::DraftReplaced {
            id: self.draft.id.clone(),
            mode: self.mode,
        });
    }
}
