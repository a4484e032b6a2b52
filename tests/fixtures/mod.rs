//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the migemulator binary
pub fn migemulator_bin() -> &'static str {
    env!("CARGO_BIN_EXE_migemulator")
}

/// Header block of a PCOMM keymap export (skipped by the merger).
pub const PCOMM_HEADER: [&str; 4] = [
    "[Profile]",
    "ID=KBD",
    "Description=Keyboard Remap",
    "[KeyRemap]",
];

/// Builds the text of a PCOMM keymap file with the given data lines.
pub fn pcomm_keymap(body: &[&str]) -> String {
    let mut text = PCOMM_HEADER.join("\r\n");
    for line in body {
        text.push_str("\r\n");
        text.push_str(line);
    }
    text.push_str("\r\n");
    text
}

/// A typical PCOMM send script.
pub const SAMPLE_SRL: &str = "C:\\files\\report.bin binary~REPORT.BIN\n\
                              \n\
                              C:\\my notes.txt~NOTES.TXT\n\
                              C:\\jcl\\build.jcl text~BUILD.JCL\n";

/// Writes `content` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Creates a Command running in `work_dir` with an isolated config directory.
pub fn isolated_command(work_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(migemulator_bin());
    cmd.current_dir(work_dir);
    cmd.env("MIGEMULATOR_CONFIG_DIR", work_dir.join("config"));
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}
