//! Domain layer - Entries, moods and derived views

pub mod collection;
pub mod entry;
pub mod mode;
pub mod mood;
pub mod query;

pub use collection::{EntryCollection, UpsertOutcome};
pub use entry::{EntryField, EntryId, JournalEntry};
pub use mode::Mode;
pub use mood::Mood;
pub use query::{filter_entries, insight_message, total_count, MoodHistogram};
