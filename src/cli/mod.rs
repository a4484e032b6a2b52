//! CLI command handlers for MigEmulator.
//!
//! Each subcommand is a headless wrapper around one converter, suitable for
//! scripting a migration or running it in CI.

pub mod baseline;
pub mod common;
pub mod config;
pub mod keymap;
pub mod srl;

// Re-export types used by main.rs and tests
pub use baseline::BaselineArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use keymap::KeymapArgs;
pub use srl::SrlArgs;
