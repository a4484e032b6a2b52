//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed output file extensions.

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "migemulator";

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = "MigEmulator";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "MIGEMULATOR_CONFIG_DIR";

/// Extension forced onto merged keymap output files.
pub const KEYMAP_EXTENSION: &str = ".kmp";

/// Extension forced onto SFTL output files.
pub const SFTL_EXTENSION: &str = ".sftl";

/// Platform default line terminator used for keymap output.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Platform default line terminator used for keymap output.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";
