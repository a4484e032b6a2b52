//! SRL to SFTL script conversion.
//!
//! Each non-blank SRL line describes one file upload as
//! `source [binary|text]~target`. The converter turns every line into a
//! HAScript `<filexfer>` action and wraps the actions in fixed SFTL
//! boilerplate.

mod template;

pub use template::{SFTL_FOOTER, SFTL_HEADER};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::SFTL_EXTENSION;
use crate::output::{ensure_extension, write_atomic};
use template::{escape_attr, filexfer_block};

/// Errors raised while parsing SRL lines.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SrlError {
    /// The line has no `~` between source and target.
    #[error("line {line}: missing '~' delimiter in {text:?}")]
    MissingDelimiter {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
    /// The line has more than one `~`.
    #[error("line {line}: more than one '~' delimiter in {text:?}")]
    ExtraDelimiter {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
    /// Nothing precedes the `~`.
    #[error("line {line}: empty source path in {text:?}")]
    EmptySource {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
    /// Nothing follows the `~`.
    #[error("line {line}: empty target name in {text:?}")]
    EmptyTarget {
        /// 1-based line number
        line: usize,
        /// Offending line
        text: String,
    },
}

/// Transfer mode named after the source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    /// Binary transfer, sent with `RECFM(V)`
    Binary,
    /// Text transfer
    Text,
    /// No type token on the line
    #[default]
    Unspecified,
}

impl TransferType {
    /// Value of the `options` attribute for this transfer.
    pub fn options(self) -> &'static str {
        match self {
            Self::Binary => "RECFM(V)",
            Self::Text | Self::Unspecified => "",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Text => write!(f, "text"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

impl FromStr for TransferType {
    type Err = ();

    /// Accepts only the explicit `binary` and `text` tokens, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("binary") {
            Ok(Self::Binary)
        } else if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else {
            Err(())
        }
    }
}

/// One parsed SRL line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferDirective {
    /// 1-based line number in the SRL input
    pub line: usize,
    /// Path of the file on the PC
    pub source: String,
    /// Transfer mode
    pub transfer_type: TransferType,
    /// Name of the file on the host
    pub target: String,
}

impl TransferDirective {
    /// Renders the `<filexfer>` action and its trailing pause.
    pub fn render_block(&self) -> String {
        filexfer_block(
            &escape_attr(&self.target),
            &escape_attr(&self.source),
            self.transfer_type.options(),
        )
    }
}

/// Parses a single non-blank SRL line.
///
/// The type token is looked for after the last space of the source segment,
/// since source paths may themselves contain spaces. Only `binary` and `text`
/// are trusted; anything else is treated as part of the path.
pub fn parse_directive(line: usize, text: &str) -> Result<TransferDirective, SrlError> {
    let trimmed = text.trim();
    let error_text = || trimmed.to_string();

    let Some((left, target)) = trimmed.split_once('~') else {
        return Err(SrlError::MissingDelimiter {
            line,
            text: error_text(),
        });
    };
    if target.contains('~') {
        return Err(SrlError::ExtraDelimiter {
            line,
            text: error_text(),
        });
    }

    let left = left.trim();
    let (source, transfer_type) = match left
        .rsplit_once(' ')
        .and_then(|(source, token)| Some((source, token.parse::<TransferType>().ok()?)))
    {
        Some((source, transfer_type)) => (source.trim(), transfer_type),
        None => (left, TransferType::Unspecified),
    };

    let target = target.trim();
    if source.is_empty() {
        return Err(SrlError::EmptySource {
            line,
            text: error_text(),
        });
    }
    if target.is_empty() {
        return Err(SrlError::EmptyTarget {
            line,
            text: error_text(),
        });
    }

    Ok(TransferDirective {
        line,
        source: source.to_string(),
        transfer_type,
        target: target.to_string(),
    })
}

/// Parses every non-blank line of an SRL script.
pub fn parse_srl<S: AsRef<str>>(lines: &[S]) -> Result<Vec<TransferDirective>, SrlError> {
    let mut directives = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let text = raw.as_ref();
        if text.trim().is_empty() {
            continue;
        }
        directives.push(parse_directive(idx + 1, text)?);
    }

    Ok(directives)
}

/// Builds the SFTL document for already parsed directives.
///
/// The result uses CRLF line endings.
pub fn render_sftl(directives: &[TransferDirective]) -> String {
    let mut doc = String::from(SFTL_HEADER);
    for directive in directives {
        doc.push_str(&directive.render_block());
    }
    doc.push_str(SFTL_FOOTER);
    to_crlf(&doc)
}

/// Converts SRL lines into an SFTL document.
///
/// Blocks appear in input order. Any malformed line fails the whole
/// conversion.
pub fn convert_srl_to_sftl<S: AsRef<str>>(lines: &[S]) -> Result<String, SrlError> {
    let directives = parse_srl(lines)?;
    debug!(directives = directives.len(), "parsed SRL script");
    Ok(render_sftl(&directives))
}

/// Writes an SFTL document with CRLF line endings, forcing the `.sftl` extension.
///
/// Returns the path actually written.
pub fn write_sftl(content: &str, path: &Path) -> Result<PathBuf> {
    let path = ensure_extension(path, SFTL_EXTENSION);
    write_atomic(&path, &to_crlf(content))?;
    info!(path = %path.display(), "wrote SFTL script");
    Ok(path)
}

/// Rewrites every line terminator as CRLF, ending the text with one.
pub fn to_crlf(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    for line in text.lines() {
        out.push_str(line);
        out.push_str("\r\n");
    }
    out
}
