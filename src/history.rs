//! Bounded history of past uploads, persisted as JSON under `.cache/`.
//!
//! The list is newest-first and capped at [`HISTORY_LIMIT`] entries; adding
//! past the cap evicts the oldest. Load and save failures degrade to an empty
//! or unsaved list rather than interrupting the upload flow.

use crate::cache::history_path;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, warn};

pub const HISTORY_LIMIT: usize = 50;

/// Longest display name before truncation with an ellipsis.
const DISPLAY_NAME_CHARS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Insertion timestamp in epoch milliseconds; unique within the list.
    pub id: i64,
    /// Shortened name shown in the sidebar.
    pub name: String,
    /// Original filename as uploaded.
    pub full_name: String,
    /// Human-readable insertion date.
    pub date: String,
}

#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn load() -> Self {
        let entries = match fs::read_to_string(history_path()) {
            Ok(data) => parse_entries(&data),
            Err(_) => Vec::new(),
        };
        debug!(count = entries.len(), "Loaded upload history");
        History { entries }
    }

    pub fn save(&self) {
        let path = history_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string(&self.entries) {
            Ok(contents) => {
                if let Err(err) = fs::write(&path, contents) {
                    warn!(path = %path.display(), "Failed to save history: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize history: {err}"),
        }
    }

    /// Record a successful upload, evicting the oldest entry past the cap.
    pub fn record(&mut self, filename: &str) {
        let mut id = Local::now().timestamp_millis();
        while self.entries.iter().any(|entry| entry.id == id) {
            id += 1;
        }
        let entry = HistoryEntry {
            id,
            name: display_name(filename),
            full_name: filename.to_string(),
            date: Local::now().format("%b %e, %Y %H:%M").to_string(),
        };
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn remove(&mut self, id: i64) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entries(data: &str) -> Vec<HistoryEntry> {
    match serde_json::from_str(data) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Discarding unreadable history file: {err}");
            Vec::new()
        }
    }
}

fn display_name(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename);
    if stem.chars().count() <= DISPLAY_NAME_CHARS {
        stem.to_string()
    } else {
        let mut short: String = stem.chars().take(DISPLAY_NAME_CHARS).collect();
        short.push('…');
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_history_at_fifty_entries() {
        let mut history = History::default();
        for i in 0..(HISTORY_LIMIT + 1) {
            history.record(&format!("doc-{i}.pdf"));
        }
        assert_eq!(history.entries().len(), HISTORY_LIMIT);
        // Newest first; the very first upload was evicted.
        assert_eq!(history.entries()[0].full_name, "doc-50.pdf");
        assert!(
            !history
                .entries()
                .iter()
                .any(|entry| entry.full_name == "doc-0.pdf")
        );
    }

    #[test]
    fn entries_are_independently_removable() {
        let mut history = History::default();
        history.record("one.pdf");
        history.record("two.epub");
        let id = history.entries()[1].id;
        history.remove(id);
        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.entries()[0].full_name, "two.epub");
    }

    #[test]
    fn ids_are_unique_even_within_one_millisecond() {
        let mut history = History::default();
        history.record("a.pdf");
        history.record("b.pdf");
        history.record("c.pdf");
        let mut ids: Vec<i64> = history.entries().iter().map(|entry| entry.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn unreadable_history_degrades_to_empty() {
        assert!(parse_entries("not json at all").is_empty());
        assert!(parse_entries("{\"wrong\": \"shape\"}").is_empty());
    }

    #[test]
    fn long_names_are_truncated_for_display() {
        let name = display_name(&format!("{}.pdf", "x".repeat(64)));
        assert_eq!(name.chars().count(), DISPLAY_NAME_CHARS + 1);
        assert!(name.ends_with('…'));
    }
}
