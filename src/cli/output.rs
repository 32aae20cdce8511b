//! Output formatting utilities

use crate::domain::{insight_message, JournalEntry, Mode, MoodHistogram};

const BAR_WIDTH: usize = 20;

/// Format a list of entries for display
///
/// `query` only picks the empty-list message.
pub fn format_entry_list(entries: &[&JournalEntry], query: &str) -> String {
    if entries.is_empty() {
        return if query.is_empty() {
            "No entries yet".to_string()
        } else {
            "No results found".to_string()
        };
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {:<7}  {}  {}\n",
            entry.date.format("%d-%m-%Y"),
            entry.mood.as_str(),
            entry.id,
            entry.display_title()
        ));
    }
    output
}

/// Format a single entry the way the viewer shows it
pub fn format_entry(entry: &JournalEntry, mode: Mode) -> String {
    let title = if entry.title.is_empty() {
        "Untitled"
    } else {
        entry.title.as_str()
    };
    let content = if entry.content.is_empty() {
        "Memory is empty..."
    } else {
        entry.content.as_str()
    };

    let mut output = format!(
        "{}\n{}\n\n{}\nMood: {}\n",
        mode.heading(),
        entry.date.format("%A, %B %-d, %Y"),
        title,
        entry.mood.label()
    );
    if let Some(image) = &entry.image {
        output.push_str(&format!("Image: attached ({} bytes encoded)\n", image.len()));
    }
    output.push_str(&format!("\n{}\n", content));
    output
}

/// Format mood analytics as a bar chart with a summary line
pub fn format_mood_chart(histogram: &MoodHistogram, total: usize) -> String {
    let mut output = String::from("Mood Analytics\n\n");

    for (mood, count) in histogram.iter() {
        let filled = (histogram.bar_ratio(mood) * BAR_WIDTH as f64).round() as usize;
        output.push_str(&format!(
            "{:<8} {}{} {} entries\n",
            mood.label(),
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            count
        ));
    }

    output.push('\n');
    output.push_str(&insight_message(total));
    output.push('\n');
    output
}
