//! Conversion service.
//!
//! Combines parsing, rendering, and writing for both converters so every
//! front end (CLI, web API) follows the same convert-then-write sequence.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::keymap::{self, KeymapDocument, KeymapError, MergeOptions};
use crate::srl::{self, SrlError};

/// Errors returned by [`ConversionService`].
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The vendor keymap could not be parsed
    #[error("Invalid keymap input: {0}")]
    Keymap(#[from] KeymapError),

    /// The SRL script could not be parsed
    #[error("Invalid SRL input: {0}")]
    Srl(#[from] SrlError),

    /// Reading input or writing output failed
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl ConversionError {
    /// Returns true for errors caused by malformed input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Keymap(_) | Self::Srl(_))
    }
}

/// Result of a keymap merge.
#[derive(Debug, Clone)]
pub struct KeymapConversion {
    /// The merged keymap
    pub document: KeymapDocument,
    /// Rendered `.kmp` text
    pub text: String,
    /// File written, if an output path was given
    pub path: Option<PathBuf>,
}

/// Result of an SRL conversion.
#[derive(Debug, Clone)]
pub struct SftlConversion {
    /// Rendered SFTL text (CRLF line endings)
    pub text: String,
    /// Number of `<filexfer>` actions emitted
    pub directives: usize,
    /// File written, if an output path was given
    pub path: Option<PathBuf>,
}

/// Service running conversions end to end.
pub struct ConversionService;

impl ConversionService {
    /// Merges vendor keymap lines with the baseline.
    ///
    /// When `output` is given the document is written there (with `.kmp`
    /// forced); nothing is written if parsing fails.
    pub fn convert_keymap<S: AsRef<str>>(
        lines: &[S],
        options: &MergeOptions,
        output: Option<&Path>,
    ) -> Result<KeymapConversion, ConversionError> {
        let document = keymap::merge_vendor_keymap(lines, options)?;
        let path = output
            .map(|path| keymap::write_keymap(&document, path))
            .transpose()?;
        let text = document.render();

        Ok(KeymapConversion {
            document,
            text,
            path,
        })
    }

    /// Converts SRL lines to an SFTL script.
    ///
    /// When `output` is given the script is written there (with `.sftl`
    /// forced); nothing is written if parsing fails.
    pub fn convert_srl<S: AsRef<str>>(
        lines: &[S],
        output: Option<&Path>,
    ) -> Result<SftlConversion, ConversionError> {
        let directives = srl::parse_srl(lines)?;
        let text = srl::render_sftl(&directives);
        let path = output
            .map(|path| srl::write_sftl(&text, path))
            .transpose()?;

        Ok(SftlConversion {
            text,
            directives: directives.len(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_convert_keymap_writes_and_returns_same_text() {
        let temp = TempDir::new().unwrap();
        let lines = ["h1", "h2", "h3", "h4", "KEY120=[pf21]"];

        let result = ConversionService::convert_keymap(
            &lines,
            &MergeOptions::default(),
            Some(&temp.path().join("out")),
        )
        .unwrap();

        let path = result.path.unwrap();
        assert_eq!(path, temp.path().join("out.kmp"));
        assert_eq!(fs::read_to_string(&path).unwrap(), result.text);
        assert_eq!(result.document.get("B120"), Some("[pf21]"));
    }

    #[test]
    fn test_convert_keymap_without_output_writes_nothing() {
        let result =
            ConversionService::convert_keymap(&["h1", "h2", "h3", "h4"], &MergeOptions::default(), None)
                .unwrap();
        assert!(result.path.is_none());
        assert!(result.text.starts_with("[KeyRemap]"));
    }

    #[test]
    fn test_convert_keymap_parse_error_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.kmp");

        let err = ConversionService::convert_keymap(
            &["h1", "h2", "h3", "h4", "KEY112"],
            &MergeOptions::default(),
            Some(&output),
        )
        .unwrap_err();

        assert!(err.is_input_error());
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_srl_writes_crlf_file() {
        let temp = TempDir::new().unwrap();
        let lines = [r"C:\files\report.bin binary~REPORT.BIN"];

        let result =
            ConversionService::convert_srl(&lines, Some(&temp.path().join("send.sftl"))).unwrap();

        assert_eq!(result.directives, 1);
        let path = result.path.unwrap();
        assert_eq!(path, temp.path().join("send.sftl"));
        assert_eq!(fs::read_to_string(&path).unwrap(), result.text);
    }

    #[test]
    fn test_convert_srl_missing_delimiter_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.sftl");

        let err = ConversionService::convert_srl(&["no-tilde-here"], Some(&output)).unwrap_err();

        assert!(matches!(err, ConversionError::Srl(SrlError::MissingDelimiter { line: 1, .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_io_error_is_not_input_error() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("missing").join("out.sftl");

        let err = ConversionService::convert_srl(&["a~B"], Some(&output)).unwrap_err();
        assert!(!err.is_input_error());
    }
}
