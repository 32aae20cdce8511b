//! Derived views over the entry collection
//!
//! Everything here is a pure function of the entries passed in: search
//! filtering for the browse list and mood aggregates for analytics. No
//! state is carried between calls, so a filter can be recomputed on every
//! keystroke.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use mindvault::domain::{filter_entries, JournalEntry, Mood, MoodHistogram};
//!
//! let mut walk = JournalEntry::blank(Utc::now());
//! walk.title = "Morning Walk".to_string();
//! walk.mood = Mood::Happy;
//! let entries = vec![walk];
//!
//! assert_eq!(filter_entries(&entries, "WALK").len(), 1);
//! assert_eq!(MoodHistogram::from_entries(&entries).count(Mood::Happy), 1);
//! ```

use crate::domain::{JournalEntry, Mood};

/// Entries whose title or content contains `query`, ignoring case
///
/// An empty query returns every entry. Input order is preserved.
pub fn filter_entries<'a, I>(entries: I, query: &str) -> Vec<&'a JournalEntry>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    if query.is_empty() {
        return entries.into_iter().collect();
    }

    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| entry.matches_lowercase(&needle))
        .collect()
}

/// Number of entries
pub fn total_count<'a, I>(entries: I) -> usize
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    entries.into_iter().count()
}

/// Summary line shown under the analytics chart
pub fn insight_message(total: usize) -> String {
    format!(
        "You've recorded {} memories so far. Keep building your digital legacy.",
        total
    )
}

/// Entry count per mood over the whole enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoodHistogram {
    counts: [usize; Mood::COUNT],
}

impl MoodHistogram {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let mut histogram = MoodHistogram::default();
        for entry in entries {
            histogram.counts[entry.mood.index()] += 1;
        }
        histogram
    }

    pub fn count(&self, mood: Mood) -> usize {
        self.counts[mood.index()]
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bar length in `[0, 1]`, relative to the most frequent mood
    pub fn bar_ratio(&self, mood: Mood) -> f64 {
        self.count(mood) as f64 / self.max_count().max(1) as f64
    }

    /// `(mood, count)` pairs in canonical mood order
    pub fn iter(&self) -> impl Iterator<Item = (Mood, usize)> + '_ {
        Mood::ALL.iter().map(move |&mood| (mood, self.count(mood)))
    }
}
