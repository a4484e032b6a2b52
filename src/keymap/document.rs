//! ZIE `.kmp` document rendering.

use serde::Serialize;

use super::{split_key_value, EntryOrigin, KeymapError, MergedEntry};
use crate::constants::LINE_ENDING;

/// Section header that opens every ZIE keymap file.
pub const KEYMAP_HEADER: &str = "[KeyRemap]";

/// A merged keymap ready to be written as a ZIE `.kmp` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeymapDocument {
    entries: Vec<MergedEntry>,
}

impl KeymapDocument {
    /// Wraps merged rows in output order.
    pub fn new(entries: Vec<MergedEntry>) -> Self {
        Self { entries }
    }

    /// Merged rows in output order.
    pub fn entries(&self) -> &[MergedEntry] {
        &self.entries
    }

    /// Final value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Number of baseline keys overridden by a vendor value.
    pub fn overridden_count(&self) -> usize {
        self.count_origin(EntryOrigin::Vendor)
    }

    /// Number of passed-through vendor keys with no baseline counterpart.
    pub fn unmapped_count(&self) -> usize {
        self.count_origin(EntryOrigin::Unmapped)
    }

    fn count_origin(&self, origin: EntryOrigin) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.origin == origin)
            .count()
    }

    /// Renders the `.kmp` text.
    ///
    /// Whitespace is removed from keys and values, and every line ends with
    /// the platform line terminator.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * 24);
        out.push_str(KEYMAP_HEADER);
        out.push_str(LINE_ENDING);

        for entry in &self.entries {
            out.push_str(&strip_whitespace(&entry.key));
            out.push('=');
            out.push_str(&strip_whitespace(&entry.value));
            out.push_str(LINE_ENDING);
        }

        out
    }

    /// Reads the `KEY=VALUE` pairs back out of rendered `.kmp` text.
    ///
    /// Section headers and blank lines are skipped.
    pub fn parse(text: &str) -> Result<Vec<(String, String)>, KeymapError> {
        let mut pairs = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || (line.starts_with('[') && line.ends_with(']')) {
                continue;
            }
            pairs.push(split_key_value(idx + 1, line)?);
        }

        Ok(pairs)
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
