//! Journal entries and their identifiers

use crate::domain::Mood;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, immutable entry identifier
///
/// New entries get a random UUID. Any string is accepted when loading so
/// that payloads written by older versions keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        EntryId(s)
    }
}

/// One user-authored memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
    /// Encoded image as a `data:` URI
    #[serde(default)]
    pub image: Option<String>,
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    /// Create an empty entry stamped with `date`
    pub fn blank(date: DateTime<Utc>) -> Self {
        JournalEntry {
            id: EntryId::generate(),
            title: String::new(),
            content: String::new(),
            mood: Mood::default(),
            image: None,
            date,
        }
    }

    /// Apply a single field edit. `id` and `date` are never touched.
    pub fn apply(&mut self, field: EntryField) {
        match field {
            EntryField::Title(title) => self.title = title,
            EntryField::Content(content) => self.content = content,
            EntryField::Mood(mood) => self.mood = mood,
            EntryField::Image(image) => self.image = image,
        }
    }

    /// Title, or a placeholder when empty
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled Entry"
        } else {
            &self.title
        }
    }

    /// True when `query` (already lowercased) appears in the title or content
    pub fn matches_lowercase(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query) || self.content.to_lowercase().contains(query)
    }
}

/// An editable field of a draft and its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryField {
    Title(String),
    Content(String),
    Mood(Mood),
    Image(Option<String>),
}

impl EntryField {
    pub fn name(&self) -> &'static str {
        match self {
            EntryField::Title(_) => "title",
            EntryField::Content(_) => "content",
            EntryField::Mood(_) => "mood",
            EntryField::Image(_) => "image",
        }
    }
}
