//! Keymap conversion command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::keymap::{MergeOptions, UnmappedKeyPolicy};
use crate::output::read_lines;
use crate::services::ConversionService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Merge a PCOMM keymap with the ZIE baseline and write a ZIE .kmp file
#[derive(Debug, Clone, Args)]
pub struct KeymapArgs {
    /// PCOMM keymap file to convert
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (".kmp" is appended when missing)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Vendor keys without a ZIE counterpart: drop or pass-through
    #[arg(long, value_name = "POLICY")]
    pub unmapped: Option<String>,

    /// Number of header lines to skip in the PCOMM file
    #[arg(long, value_name = "N")]
    pub header_lines: Option<usize>,

    /// Output a summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not print the converted keymap
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct KeymapResponse {
    input: String,
    output: String,
    policy: UnmappedKeyPolicy,
    entries: usize,
    overridden: usize,
    unmapped: usize,
    keymap: String,
}

impl KeymapArgs {
    /// Execute the keymap command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        let unmapped = match &self.unmapped {
            Some(policy) => policy
                .parse::<UnmappedKeyPolicy>()
                .map_err(CliError::validation)?,
            None => config.keymap.unmapped_keys,
        };
        let options = MergeOptions {
            header_lines: self.header_lines.unwrap_or(config.keymap.header_lines),
            unmapped,
        };

        let lines = read_lines(&self.input).map_err(|e| CliError::io(format!("{e:#}")))?;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.keymap.default_output.clone());

        let result = ConversionService::convert_keymap(&lines, &options, Some(&output))?;
        let written = result.path.unwrap_or(output);

        if self.json {
            return print_json(&KeymapResponse {
                input: self.input.display().to_string(),
                output: written.display().to_string(),
                policy: unmapped,
                entries: result.document.entries().len(),
                overridden: result.document.overridden_count(),
                unmapped: result.document.unmapped_count(),
                keymap: result.text,
            });
        }

        if !self.quiet {
            print!("{}", result.text);
        }
        println!(
            "✓ Keymap converted: {} ({} of {} keys overridden)",
            written.display(),
            result.document.overridden_count(),
            result.document.entries().len()
        );

        Ok(())
    }
}
