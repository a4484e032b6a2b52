//! Output file handling shared by both converters.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Appends `extension` to `path` unless the path already ends with it.
///
/// The check is a plain suffix match, so `out.txt` becomes `out.txt.kmp`
/// rather than having its extension replaced.
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    if path.as_os_str().to_string_lossy().ends_with(extension) {
        return path.to_path_buf();
    }

    let mut name = path.as_os_str().to_os_string();
    name.push(extension);
    PathBuf::from(name)
}

/// Writes `content` to `path` in one piece.
///
/// The text goes to a sibling temp file first and is renamed into place, so a
/// failed write never leaves a truncated output behind.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let mut temp_name = OsString::from(path.as_os_str());
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err)
            .with_context(|| format!("Failed to rename temporary file to: {}", path.display()));
    }

    Ok(())
}

/// Reads an input file and splits it into lines.
///
/// Both LF and CRLF terminators are accepted.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}
