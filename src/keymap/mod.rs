//! PCOMM to ZIE keymap merging.
//!
//! A PCOMM `.kmp` export is parsed into `KEY=VALUE` pairs, vendor key names are
//! remapped onto ZIE identifiers, and the result is joined against the embedded
//! ZIE baseline. Every baseline key appears exactly once in the merged table;
//! the vendor value wins whenever one is supplied.

pub mod baseline;
mod document;

pub use document::{KeymapDocument, KEYMAP_HEADER};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::KEYMAP_EXTENSION;
use crate::output::{ensure_extension, write_atomic};
use baseline::{map_vendor_key, BASELINE_KEYMAP};

/// Number of leading lines in a PCOMM keymap export that precede the key data.
pub const DEFAULT_HEADER_LINES: usize = 4;

/// Errors raised while reading `KEY=VALUE` keymap lines.
///
/// Line numbers are 1-based and refer to the raw input, header included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    /// The line has no `=` separating key and value.
    #[error("line {line}: missing '=' delimiter in {text:?}")]
    MissingDelimiter {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
    /// The line has more than one `=`.
    #[error("line {line}: more than one '=' delimiter in {text:?}")]
    ExtraDelimiter {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
    /// The key part before `=` is empty.
    #[error("line {line}: empty key in {text:?}")]
    EmptyKey {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
}

/// What to do with vendor keys that do not join to any baseline key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnmappedKeyPolicy {
    /// Leave them out of the merged output
    #[default]
    Drop,
    /// Append them after the baseline rows, keyed by their vendor name
    PassThrough,
}

impl fmt::Display for UnmappedKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => write!(f, "drop"),
            Self::PassThrough => write!(f, "pass-through"),
        }
    }
}

impl FromStr for UnmappedKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "pass-through" | "passthrough" | "pass_through" => Ok(Self::PassThrough),
            other => Err(format!(
                "Invalid unmapped key policy '{other}'. Must be 'drop' or 'pass-through'"
            )),
        }
    }
}

/// Options controlling a keymap merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Leading lines of the vendor file to skip
    pub header_lines: usize,
    /// Handling of vendor keys without a baseline counterpart
    pub unmapped: UnmappedKeyPolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            unmapped: UnmappedKeyPolicy::default(),
        }
    }
}

/// One `KEY=VALUE` line from a vendor keymap file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorEntry {
    /// 1-based line number in the vendor file
    pub line: usize,
    /// Key as written by the vendor (e.g. `KEY112`)
    pub key: String,
    /// Value as written by the vendor
    pub value: String,
    /// Baseline key this vendor key remaps to, if any
    pub mapped_key: Option<&'static str>,
}

impl VendorEntry {
    /// Key used to join against the baseline table.
    ///
    /// Vendor keys with no mapping join under their own name, so a vendor
    /// file that already uses ZIE identifiers still lines up.
    pub fn join_key(&self) -> &str {
        self.mapped_key.unwrap_or(&self.key)
    }
}

/// Where the final value of a merged row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    /// Baseline default, no vendor override
    Baseline,
    /// Vendor value overriding a baseline key
    Vendor,
    /// Vendor key with no baseline counterpart (pass-through policy only)
    Unmapped,
}

/// A row of the merged keymap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedEntry {
    /// ZIE key identifier
    pub key: String,
    /// Final value written to the output
    pub value: String,
    /// Source of `value`
    pub origin: EntryOrigin,
}

/// Splits a single `KEY=VALUE` line.
///
/// Both halves are trimmed. Exactly one `=` is accepted.
pub(crate) fn split_key_value(line: usize, text: &str) -> Result<(String, String), KeymapError> {
    let Some((key, value)) = text.split_once('=') else {
        return Err(KeymapError::MissingDelimiter {
            line,
            text: text.to_string(),
        });
    };

    if value.contains('=') {
        return Err(KeymapError::ExtraDelimiter {
            line,
            text: text.to_string(),
        });
    }

    let key = key.trim();
    if key.is_empty() {
        return Err(KeymapError::EmptyKey {
            line,
            text: text.to_string(),
        });
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// Parses the lines of a PCOMM keymap export.
///
/// The first `header_lines` lines are skipped, as are blank lines. Any other
/// line that is not a well-formed `KEY=VALUE` pair fails the whole parse.
pub fn parse_vendor_keymap<S: AsRef<str>>(
    lines: &[S],
    header_lines: usize,
) -> Result<Vec<VendorEntry>, KeymapError> {
    let mut entries = Vec::new();

    for (idx, raw) in lines.iter().enumerate().skip(header_lines) {
        let line_no = idx + 1;
        let text = raw.as_ref().trim();
        if text.is_empty() {
            debug!(line = line_no, "skipping blank keymap line");
            continue;
        }

        let (key, value) = split_key_value(line_no, text)?;
        let mapped_key = map_vendor_key(&key);
        entries.push(VendorEntry {
            line: line_no,
            key,
            value,
            mapped_key,
        });
    }

    Ok(entries)
}

/// Joins vendor entries onto the baseline table.
///
/// Baseline rows keep their order. A vendor entry with a non-empty value
/// overrides the row it joins to; when several entries hit the same row the
/// last non-empty one wins. Empty values never touch an existing row, so an
/// empty duplicate neither wins nor restores the default. Entries that join
/// nothing are handled by `policy`, empty or not.
pub fn merge_keymap(vendor: &[VendorEntry], policy: UnmappedKeyPolicy) -> Vec<MergedEntry> {
    let mut merged: Vec<MergedEntry> = BASELINE_KEYMAP
        .iter()
        .map(|(key, value)| MergedEntry {
            key: (*key).to_string(),
            value: (*value).to_string(),
            origin: EntryOrigin::Baseline,
        })
        .collect();

    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(pos, entry)| (entry.key.clone(), pos))
        .collect();

    for entry in vendor {
        let key = entry.join_key();

        if let Some(&pos) = index.get(key) {
            if entry.value.is_empty() {
                debug!(line = entry.line, key, "empty vendor value, keeping current value");
                continue;
            }

            let row = &mut merged[pos];
            if row.origin != EntryOrigin::Baseline {
                warn!(
                    line = entry.line,
                    key,
                    previous = %row.value,
                    "duplicate vendor key, later value wins"
                );
            }
            row.value.clone_from(&entry.value);
            row.origin = if pos < BASELINE_KEYMAP.len() {
                EntryOrigin::Vendor
            } else {
                EntryOrigin::Unmapped
            };
            continue;
        }

        match policy {
            UnmappedKeyPolicy::Drop => {
                debug!(line = entry.line, key, "dropping unmapped vendor key");
            }
            UnmappedKeyPolicy::PassThrough => {
                index.insert(key.to_string(), merged.len());
                merged.push(MergedEntry {
                    key: key.to_string(),
                    value: entry.value.clone(),
                    origin: EntryOrigin::Unmapped,
                });
            }
        }
    }

    merged
}

/// Parses a vendor keymap and merges it with the baseline.
pub fn merge_vendor_keymap<S: AsRef<str>>(
    lines: &[S],
    options: &MergeOptions,
) -> Result<KeymapDocument, KeymapError> {
    let vendor = parse_vendor_keymap(lines, options.header_lines)?;
    debug!(entries = vendor.len(), "parsed vendor keymap");
    Ok(KeymapDocument::new(merge_keymap(&vendor, options.unmapped)))
}

/// Writes a merged keymap, forcing the `.kmp` extension.
///
/// Returns the path actually written.
pub fn write_keymap(document: &KeymapDocument, path: &Path) -> Result<PathBuf> {
    let path = ensure_extension(path, KEYMAP_EXTENSION);
    write_atomic(&path, &document.render())?;
    info!(path = %path.display(), entries = document.entries().len(), "wrote keymap");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::baseline::baseline_default;
    use super::*;

    fn vendor_file(body: &[&str]) -> Vec<String> {
        let mut lines = vec![
            "[Profile]".to_string(),
            "ID=KBD".to_string(),
            "Version=4".to_string(),
            "[KeyRemap]".to_string(),
        ];
        lines.extend(body.iter().map(|line| (*line).to_string()));
        lines
    }

    #[test]
    fn test_parse_skips_header_and_blank_lines() {
        let lines = vendor_file(&["KEY112=[pf13]", "", "   ", "B27=[reset]"]);
        let entries = parse_vendor_keymap(&lines, DEFAULT_HEADER_LINES).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].line, 5);
        assert_eq!(entries[0].key, "KEY112");
        assert_eq!(entries[0].value, "[pf13]");
        assert_eq!(entries[0].mapped_key, Some("B112"));
        assert_eq!(entries[1].line, 8);
        assert_eq!(entries[1].mapped_key, None);
        assert_eq!(entries[1].join_key(), "B27");
    }

    #[test]
    fn test_parse_header_lines_are_not_validated() {
        // The header of a real export contains lines without '='
        let lines = vendor_file(&[]);
        assert!(parse_vendor_keymap(&lines, DEFAULT_HEADER_LINES)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_missing_delimiter_fails() {
        let lines = vendor_file(&["KEY112=[pf13]", "garbage"]);
        let err = parse_vendor_keymap(&lines, DEFAULT_HEADER_LINES).unwrap_err();
        assert_eq!(
            err,
            KeymapError::MissingDelimiter {
                line: 6,
                text: "garbage".to_string()
            }
        );
        assert!(err.to_string().contains("line 6"));
    }

    #[test]
    fn test_parse_extra_delimiter_fails() {
        let lines = vendor_file(&["KEY112=a=b"]);
        let err = parse_vendor_keymap(&lines, DEFAULT_HEADER_LINES).unwrap_err();
        assert!(matches!(err, KeymapError::ExtraDelimiter { line: 5, .. }));
    }

    #[test]
    fn test_parse_empty_key_fails() {
        let lines = vendor_file(&["=value"]);
        let err = parse_vendor_keymap(&lines, DEFAULT_HEADER_LINES).unwrap_err();
        assert!(matches!(err, KeymapError::EmptyKey { line: 5, .. }));
    }

    #[test]
    fn test_parse_custom_header_length() {
        let lines = ["KEY113=[pf14]"];
        let entries = parse_vendor_keymap(&lines, 0).unwrap();
        assert_eq!(entries[0].mapped_key, Some("B113"));
    }

    #[test]
    fn test_merge_without_vendor_entries_is_baseline() {
        let merged = merge_keymap(&[], UnmappedKeyPolicy::Drop);
        assert_eq!(merged.len(), BASELINE_KEYMAP.len());
        for (entry, (key, value)) in merged.iter().zip(BASELINE_KEYMAP) {
            assert_eq!(entry.key, *key);
            assert_eq!(entry.value, *value);
            assert_eq!(entry.origin, EntryOrigin::Baseline);
        }
    }

    #[test]
    fn test_merge_vendor_value_overrides_mapped_key() {
        let lines = vendor_file(&["KEY112=[pf13]", "KEY123=[attn]"]);
        let doc = merge_vendor_keymap(&lines, &MergeOptions::default()).unwrap();

        assert_eq!(doc.get("B112"), Some("[pf13]"));
        assert_eq!(doc.get("B123"), Some("[attn]"));
        assert_eq!(doc.overridden_count(), 2);

        // Everything else keeps its default
        for entry in doc.entries() {
            if entry.key != "B112" && entry.key != "B123" {
                assert_eq!(Some(entry.value.as_str()), baseline_default(&entry.key));
            }
        }
    }

    #[test]
    fn test_merge_empty_vendor_value_keeps_default() {
        let lines = vendor_file(&["KEY112="]);
        let doc = merge_vendor_keymap(&lines, &MergeOptions::default()).unwrap();
        assert_eq!(doc.get("B112"), Some("[pf1]"));
        assert_eq!(doc.overridden_count(), 0);
    }

    #[test]
    fn test_merge_last_duplicate_wins() {
        let lines = vendor_file(&["KEY112=[pf13]", "B112=[pf24]"]);
        let doc = merge_vendor_keymap(&lines, &MergeOptions::default()).unwrap();
        assert_eq!(doc.get("B112"), Some("[pf24]"));
        assert_eq!(doc.entries().len(), BASELINE_KEYMAP.len());

        // An empty duplicate is ignored
        let lines = vendor_file(&["KEY112=[a]", "KEY112="]);
        let doc = merge_vendor_keymap(&lines, &MergeOptions::default()).unwrap();
        assert_eq!(doc.get("B112"), Some("[a]"));
        assert_eq!(doc.overridden_count(), 1);
    }

    #[test]
    fn test_merge_pass_through_keeps_empty_unmapped_value() {
        let options = MergeOptions {
            header_lines: 0,
            unmapped: UnmappedKeyPolicy::PassThrough,
        };
        let doc = merge_vendor_keymap(&["KEY999="], &options).unwrap();

        assert_eq!(doc.entries().len(), BASELINE_KEYMAP.len() + 1);
        assert_eq!(doc.get("KEY999"), Some(""));
        assert!(doc.render().contains("KEY999="));

        // Drop still omits it
        let options = MergeOptions {
            header_lines: 0,
            ..MergeOptions::default()
        };
        let doc = merge_vendor_keymap(&["KEY999="], &options).unwrap();
        assert_eq!(doc.get("KEY999"), None);
    }

    #[test]
    fn test_merge_drops_unmapped_keys_by_default() {
        let lines = vendor_file(&["KEY999=[sysreq]"]);
        let doc = merge_vendor_keymap(&lines, &MergeOptions::default()).unwrap();
        assert_eq!(doc.entries().len(), BASELINE_KEYMAP.len());
        assert_eq!(doc.get("KEY999"), None);
    }

    #[test]
    fn test_merge_pass_through_appends_unmapped_keys() {
        let lines = vendor_file(&["KEY999=[sysreq]", "KEY112=[pf13]", "KEY999=[attn]"]);
        let options = MergeOptions {
            unmapped: UnmappedKeyPolicy::PassThrough,
            ..MergeOptions::default()
        };
        let doc = merge_vendor_keymap(&lines, &options).unwrap();

        assert_eq!(doc.entries().len(), BASELINE_KEYMAP.len() + 1);
        let last = doc.entries().last().unwrap();
        assert_eq!(last.key, "KEY999");
        assert_eq!(last.value, "[attn]");
        assert_eq!(last.origin, EntryOrigin::Unmapped);
        assert_eq!(doc.get("B112"), Some("[pf13]"));
    }

    #[test]
    fn test_write_keymap_forces_extension() {
        let temp = tempfile::TempDir::new().unwrap();
        let doc = merge_vendor_keymap(&vendor_file(&["KEY112=[pf13]"]), &MergeOptions::default())
            .unwrap();

        let written = write_keymap(&doc, &temp.path().join("zie_keymap")).unwrap();
        assert_eq!(written, temp.path().join("zie_keymap.kmp"));

        let text = std::fs::read_to_string(&written).unwrap();
        assert_eq!(text, doc.render());
        assert!(text.starts_with(KEYMAP_HEADER));
        assert!(text.contains("B112=[pf13]"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("drop".parse::<UnmappedKeyPolicy>(), Ok(UnmappedKeyPolicy::Drop));
        assert_eq!("Pass-Through".parse::<UnmappedKeyPolicy>(), Ok(UnmappedKeyPolicy::PassThrough));
        assert_eq!("passthrough".parse::<UnmappedKeyPolicy>(), Ok(UnmappedKeyPolicy::PassThrough));
        assert!("keep".parse::<UnmappedKeyPolicy>().is_err());
        assert_eq!(UnmappedKeyPolicy::PassThrough.to_string(), "pass-through");
    }
}
