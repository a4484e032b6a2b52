//! MigEmulator Library
//!
//! Helpers for migrating terminal emulator assets from IBM PCOMM to ZIE:
//! merging PCOMM keymaps onto the ZIE baseline, and converting SRL
//! file-transfer scripts into SFTL HAScript macros.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod keymap;
pub mod logging;
pub mod output;
pub mod services;
pub mod srl;
#[cfg(feature = "web")]
pub mod web;
